//! `ca-dynamics`: the control-affine dynamics family.
//!
//! # Crate layout
//!
//! | Module                 | Contents                                                  |
//! |------------------------|-----------------------------------------------------------|
//! | [`model`]              | `Dynamics` trait, `Dims`, `StateVector`, `ControlMatrix`  |
//! | [`trivial`]            | `Trivial`: zero drift, no inputs                          |
//! | [`double_integrator`]  | `PlanarDoubleIntegrator`, `VerticalDoubleIntegrator`      |
//! | [`unicycle`]           | `Unicycle` (Dubins car) with single-wrap heading          |
//! | [`error`]              | `DynamicsError`, `DynamicsResult<T>`                      |
//!
//! # Update rule
//!
//! Every variant is control-affine,
//!
//! ```text
//!   ẋ = f(x) + B(x)·u
//! ```
//!
//! and is advanced with explicit forward Euler using only start-of-step values:
//!
//! ```text
//!   x' = x + dt · (f(x) + B(x)·u)
//! ```
//!
//! `f` and `B` are exposed separately ([`Dynamics::drift`],
//! [`Dynamics::control_coefficient`]) so safety filters can synthesise control
//! overrides without knowing which variant they are looking at.

pub mod double_integrator;
pub mod error;
pub mod model;
pub mod trivial;
pub mod unicycle;


pub use double_integrator::{PlanarDoubleIntegrator, VerticalDoubleIntegrator};
pub use error::{DynamicsError, DynamicsResult};
pub use model::{ControlMatrix, Dims, Dynamics, StateVector};
pub use trivial::Trivial;
pub use unicycle::{Unicycle, wrap_heading_once};
