//! `ca-sim`: the session driver.
//!
//! # Tick loop
//!
//! ```text
//! tick(Δt_wall):
//!   Countdown : accumulate wall time; once it exceeds warmup_ms the session
//!                turns Running and this same tick is integrated in full.
//!   Running   : ① dt = TimeScale::sim_dt(Δt_wall)
//!                ② settle: skip integration while the condition clock ≤ 0
//!                ③ u  = Controller::control(ctx)
//!                ④ Agent::step(dt, u)
//!                ⑤ proximity of the new position against every obstacle
//!                ⑥ reset on boundary crossing or horizon expiry
//!                ⑦ otherwise, on collision, halt the agent until next reset
//!   Complete  : no-op.
//! ```
//!
//! Wrapping the reset sequence back to its first condition completes the
//! session.  [`Driver::intervene`] forces a reset from outside at any time.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`config`]   | `DriverConfig`, `StateBound`                                |
//! | [`builder`]  | `DriverBuilder`: validates config, builds a `Driver`        |
//! | [`driver`]   | `Driver`, `Phase`, `TickOutcome`, `StepSummary`             |
//! | [`observer`] | `DriverObserver`, `NoopObserver`, event payloads            |
//! | [`error`]    | `SimError`, `SimResult<T>`                                  |
//!
//! # Cargo features
//!
//! | Feature | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on config and events.       |
//!
//! # Quick-start
//!
//! ```rust
//! use ca_dynamics::Unicycle;
//! use ca_sim::{DriverBuilder, DriverConfig, NoopObserver};
//!
//! let config = DriverConfig::reference(vec![vec![-8.0, 0.5, 0.0].into()]);
//! let mut driver = DriverBuilder::new(config, Unicycle::new(3.0)).build().unwrap();
//! for _ in 0..10 {
//!     driver.tick(16.0, &mut NoopObserver).unwrap();
//! }
//! assert_eq!(driver.condition_index().0, 0);
//! ```

pub mod builder;
pub mod config;
pub mod driver;
pub mod error;
pub mod observer;

#[cfg(test)]
mod tests;

pub use builder::DriverBuilder;
pub use config::{DriverConfig, StateBound};
pub use driver::{Driver, Phase, StepSummary, TickOutcome};
pub use error::{SimError, SimResult};
pub use observer::{
    DriverObserver, Intervention, NoopObserver, ResetCause, ResetEvent, SessionSummary,
    StateUpdate,
};
