//! Read-only tick snapshot passed to every controller call.

use ca_core::ConditionId;
use ca_dynamics::Dims;
use ndarray::ArrayView1;

/// What a [`Controller`][crate::Controller] may look at when choosing `u`.
///
/// All borrows end when the call returns; the driver never exposes mutable
/// state to a controller.
#[derive(Debug, Clone, Copy)]
pub struct ControlContext<'a> {
    /// Simulated seconds since the countdown ended.
    pub sim_secs: f64,

    /// Simulated seconds since the current initial condition was loaded,
    /// excluding the settle period.
    pub condition_secs: f64,

    /// Index of the current initial condition.
    pub condition: ConditionId,

    /// The agent's state at the start of the step.
    pub state: ArrayView1<'a, f64>,

    /// Dimensions of the agent's dynamics; `u` must have `dims.control`
    /// components.
    pub dims: Dims,

    /// Integration step the control will be applied over.
    pub dt: f64,
}
