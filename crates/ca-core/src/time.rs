//! Session time model.
//!
//! # Design
//!
//! The host hands the driver elapsed **wall** milliseconds once per tick.  The
//! driver turns them into **simulated** seconds through a [`TimeScale`]:
//!
//!   sim_dt = min(wall_ms * factor, max_step)
//!
//! Keeping the factor as a named policy (rather than constants scattered
//! through the tick loop) makes recorded traces reproducible: the same wall
//! deltas and the same factor always yield the same integration steps.
//!
//! [`SessionClock`] keeps three running totals: wall time since the session
//! started, simulated time since the countdown ended, and simulated time since
//! the current initial condition was loaded.  The last one starts negative
//! when a settle period is configured and integration waits until it crosses
//! zero.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── TimeScale ─────────────────────────────────────────────────────────────────

/// Wall-clock → simulation-time conversion policy.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeScale {
    /// Simulated seconds per wall millisecond.
    pub factor: f64,

    /// Upper bound on one simulated step, in seconds.  `None` disables the
    /// clamp so the step is always `wall_ms * factor`.
    pub max_step: Option<f64>,
}

impl TimeScale {
    /// Reference factor: half a simulated millisecond per wall millisecond,
    /// played back four times faster (0.0005 × 4).
    pub const REFERENCE_FACTOR: f64 = 0.0005 * 4.0;

    /// The reference policy with no step clamp.
    pub const REFERENCE: TimeScale = TimeScale {
        factor:   Self::REFERENCE_FACTOR,
        max_step: None,
    };

    #[inline]
    pub fn new(factor: f64) -> Self {
        Self { factor, max_step: None }
    }

    /// Clamp every simulated step to at most `max_step` seconds.
    #[inline]
    pub fn with_max_step(mut self, max_step: f64) -> Self {
        self.max_step = Some(max_step);
        self
    }

    /// Simulated step for an elapsed wall time.  Negative input yields 0.
    #[inline]
    pub fn sim_dt(&self, wall_ms: f64) -> f64 {
        let dt = wall_ms.max(0.0) * self.factor;
        match self.max_step {
            Some(max) => dt.min(max),
            None => dt,
        }
    }

    /// Reject non-finite or non-positive factors and clamps.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.factor.is_finite() && self.factor > 0.0) {
            return Err(CoreError::Config(format!(
                "time scale factor must be finite and positive, got {}",
                self.factor
            )));
        }
        if let Some(max) = self.max_step {
            if !(max.is_finite() && max > 0.0) {
                return Err(CoreError::Config(format!(
                    "time scale max_step must be finite and positive, got {max}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::REFERENCE
    }
}

// ── SessionClock ──────────────────────────────────────────────────────────────

/// Running time totals for one session.
///
/// Plain data: cheap to copy, no heap.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionClock {
    /// Wall milliseconds since the session was created (countdown included).
    pub wall_ms: f64,

    /// Simulated seconds since the countdown ended.
    pub sim_secs: f64,

    /// Simulated seconds since the current initial condition was loaded.
    /// Negative while the settle period is running.
    pub condition_secs: f64,
}

impl SessionClock {
    /// A clock at session start whose first condition settles for
    /// `settle_secs` simulated seconds.
    pub fn new(settle_secs: f64) -> Self {
        Self {
            wall_ms:        0.0,
            sim_secs:       0.0,
            condition_secs: -settle_secs,
        }
    }

    #[inline]
    pub fn advance_wall(&mut self, wall_ms: f64) {
        self.wall_ms += wall_ms;
    }

    /// Advance both simulated totals by `dt` seconds.
    #[inline]
    pub fn advance_sim(&mut self, dt: f64) {
        self.sim_secs += dt;
        self.condition_secs += dt;
    }

    /// Start timing a freshly loaded condition.
    #[inline]
    pub fn restart_condition(&mut self, settle_secs: f64) {
        self.condition_secs = -settle_secs;
    }

    /// `true` until the current condition's settle period has elapsed.
    #[inline]
    pub fn is_settling(&self) -> bool {
        self.condition_secs <= 0.0
    }
}

impl fmt::Display for SessionClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "wall {:.0} ms, sim {:.3} s (condition {:.3} s)",
            self.wall_ms, self.sim_secs, self.condition_secs
        )
    }
}
