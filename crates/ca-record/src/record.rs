//! Plain data written by [`SessionRecorder`][crate::SessionRecorder].

use ca_sim::{ResetCause, SessionSummary};
use serde::{Deserialize, Serialize};

/// One reset of the agent to a configured initial condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetRecord {
    pub cause:    ResetCause,
    pub wall_ms:  f64,
    pub sim_secs: f64,
    pub from:     u32,
    pub to:       u32,
    /// State loaded by the reset.
    pub state:    Vec<f64>,
}

/// A supervisor intervention and the state it interrupted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionRecord {
    pub wall_ms:   f64,
    pub sim_secs:  f64,
    pub condition: u32,
    pub state:     Vec<f64>,
}

/// Telemetry for one session.
///
/// The `*_trace` vectors are parallel: entry `i` of each describes the same
/// integrated step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Free-form label for the dynamics under test, e.g. `"unicycle"`.
    pub system: String,

    pub time_trace:      Vec<f64>,
    pub condition_trace: Vec<u32>,
    pub agent_trace:     Vec<Vec<f64>>,
    pub collision_trace: Vec<bool>,

    pub resets:        Vec<ResetRecord>,
    pub interventions: Vec<InterventionRecord>,

    /// Set once the reset sequence has wrapped.
    pub summary: Option<SessionSummary>,
}

impl SessionRecord {
    pub fn new(system: impl Into<String>) -> Self {
        Self { system: system.into(), ..Self::default() }
    }

    /// Number of recorded samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.time_trace.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.time_trace.is_empty()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.summary.is_some()
    }

    /// Samples recorded while the agent overlapped an obstacle.
    pub fn collision_samples(&self) -> usize {
        self.collision_trace.iter().filter(|&&c| c).count()
    }
}
