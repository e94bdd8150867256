//! `ca-control`: the seam through which control inputs enter the driver.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`context`] | `ControlContext<'a>`: read-only snapshot for one tick        |
//! | [`model`]   | `Controller` trait, `FnController`, `from_fn`                |
//! | [`stock`]   | `ZeroControl`, `ConstantControl`                             |
//!
//! # Design notes
//!
//! The driver never decides what input to apply.  Once per integrated tick
//! it builds a [`ControlContext`], asks its controller for `u`, and hands the
//! result to `Agent::step`.  A controller that returns the wrong number of
//! components makes the tick fail with a dimension mismatch; nothing is
//! mutated in that case.

pub mod context;
pub mod model;
pub mod stock;

#[cfg(test)]
mod tests;

pub use context::ControlContext;
pub use model::{Controller, FnController, from_fn};
pub use stock::{ConstantControl, ZeroControl};
