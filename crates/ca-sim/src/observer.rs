//! Driver observer trait and the event payloads it receives.

use ca_core::{ConditionId, Pose};
use ca_dynamics::StateVector;
use ca_proximity::Proximity;

// ── Events ────────────────────────────────────────────────────────────────────

/// Snapshot after one integrated step.
#[derive(Debug, Clone, Copy)]
pub struct StateUpdate<'a> {
    /// Wall milliseconds since the session began.
    pub wall_ms: f64,
    /// Simulated seconds since the countdown ended.
    pub sim_secs: f64,
    pub condition: ConditionId,
    pub state: &'a StateVector,
    pub pose: Pose,
    /// Closest obstacle after the step.
    pub proximity: Proximity,
    pub collision: bool,
}

/// Why the agent was moved to the next initial condition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResetCause {
    /// The configured state bound was crossed.
    Boundary,
    /// The condition ran longer than the configured horizon.
    Horizon,
    /// An external supervisor asked for it.
    Intervention,
}

#[derive(Debug, Clone, Copy)]
pub struct ResetEvent<'a> {
    pub cause: ResetCause,
    pub wall_ms: f64,
    pub sim_secs: f64,
    /// Condition that was running before the reset.
    pub from: ConditionId,
    /// Condition that is now loaded.
    pub to: ConditionId,
    /// The freshly loaded state.
    pub state: &'a StateVector,
}

/// A supervisor signal, captured before the reset it causes.
#[derive(Debug, Clone, Copy)]
pub struct Intervention<'a> {
    pub wall_ms: f64,
    pub sim_secs: f64,
    pub condition: ConditionId,
    /// State at the moment of the signal.
    pub state: &'a StateVector,
}

/// Totals reported once when the reset sequence wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSummary {
    pub wall_ms: f64,
    pub sim_secs: f64,
    /// Length of the reset sequence.
    pub conditions: usize,
    pub resets: usize,
    pub interventions: usize,
    /// Number of times the agent went from clear to colliding.
    pub collisions: usize,
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Callbacks invoked by [`Driver`][crate::Driver] as the session runs.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Borrowed payloads live only for the
/// duration of the call.
///
/// # Example: reset counter
///
/// ```rust
/// use ca_sim::{DriverObserver, ResetEvent};
///
/// #[derive(Default)]
/// struct Resets(usize);
///
/// impl DriverObserver for Resets {
///     fn on_reset(&mut self, _event: &ResetEvent<'_>) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait DriverObserver {
    /// Called after every integrated step.
    fn on_state_updated(&mut self, _update: &StateUpdate<'_>) {}

    /// Called after the next initial condition has been loaded.
    fn on_reset(&mut self, _event: &ResetEvent<'_>) {}

    /// Called when a supervisor intervenes, before the resulting reset.
    fn on_intervention(&mut self, _event: &Intervention<'_>) {}

    /// Called exactly once per session, when the reset sequence wraps.
    fn on_session_complete(&mut self, _summary: &SessionSummary) {}
}

/// A [`DriverObserver`] that does nothing.
pub struct NoopObserver;

impl DriverObserver for NoopObserver {}
