//! Driver configuration records.

use ca_core::{DVec2, TimeScale};
use ca_dynamics::StateVector;
use ca_proximity::Obstacle;
use ndarray::ArrayView1;

// ── StateBound ────────────────────────────────────────────────────────────────

/// Upper bound on one state component.  Crossing it triggers a reset.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateBound {
    /// Index into the state vector.
    pub component: usize,
    /// The bound is crossed when `state[component] > max`.
    pub max: f64,
}

impl StateBound {
    #[inline]
    pub fn new(component: usize, max: f64) -> Self {
        Self { component, max }
    }

    /// `false` when the component does not exist.
    #[inline]
    pub fn is_exceeded(&self, state: ArrayView1<'_, f64>) -> bool {
        state.get(self.component).is_some_and(|&v| v > self.max)
    }
}

// ── DriverConfig ──────────────────────────────────────────────────────────────

/// Everything a [`Driver`][crate::Driver] needs apart from the dynamics and
/// the controller.
///
/// All fields are public; [`DriverBuilder::build`][crate::DriverBuilder::build]
/// checks them before a driver is created.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverConfig {
    /// Reset sequence.  The session starts at index 0 and completes when a
    /// reset wraps back to it.  Must be non-empty.
    pub initial_conditions: Vec<StateVector>,

    /// Wall → simulated time conversion.
    pub time_scale: TimeScale,

    /// Wall milliseconds of countdown before integration starts.
    pub warmup_ms: f64,

    /// Obstacles checked every integrated tick.  Inactive (NaN radius)
    /// obstacles are kept but ignored.
    pub obstacles: Vec<Obstacle>,

    /// Radius of the disc the agent occupies for proximity purposes.
    pub agent_effective_radius: f64,

    /// Reset when this bound is crossed.  `None` disables boundary resets.
    pub boundary: Option<StateBound>,

    /// Reset when the current condition has run this many simulated seconds
    /// (settle period excluded).  `None` disables horizon resets.
    pub horizon: Option<f64>,

    /// Simulated seconds after every reset during which the agent is frozen.
    pub settle_time: f64,

    /// Forward speed restored on every reset.  `None` leaves speed alone.
    pub reset_speed: Option<f64>,

    /// Proximity values below this are collisions.
    pub collision_threshold: f64,
}

impl DriverConfig {
    pub const REFERENCE_WARMUP_MS: f64 = 3000.0;
    pub const REFERENCE_START_X: f64 = -8.0;
    pub const REFERENCE_OBSTACLE_RADIUS: f64 = 1.8;
    pub const REFERENCE_AGENT_RADIUS: f64 = 0.55;
    pub const REFERENCE_SETTLE_SECS: f64 = 1.0;
    pub const REFERENCE_SPEED: f64 = 3.0;

    /// Run length that lets an agent starting at `REFERENCE_START_X` reach
    /// `x = 2` at reference speed: `(2 − x₀) / 3`.
    pub const REFERENCE_HORIZON: f64 = (2.0 - Self::REFERENCE_START_X) / 3.0;

    /// Minimal configuration: reference countdown and time scale, no
    /// obstacles, no reset triggers, no settle period.
    pub fn new(initial_conditions: Vec<StateVector>) -> Self {
        Self {
            initial_conditions,
            time_scale:             TimeScale::REFERENCE,
            warmup_ms:              Self::REFERENCE_WARMUP_MS,
            obstacles:              Vec::new(),
            agent_effective_radius: 0.0,
            boundary:               None,
            horizon:                None,
            settle_time:            0.0,
            reset_speed:            None,
            collision_threshold:    0.0,
        }
    }

    /// The obstacle-avoidance session: one circular obstacle of radius 1.8 at
    /// the origin, agent radius 0.55, reset when `x > 1` or after
    /// [`REFERENCE_HORIZON`](Self::REFERENCE_HORIZON), one second of settle
    /// time and speed 3 restored on each reset.
    pub fn reference(initial_conditions: Vec<StateVector>) -> Self {
        // `Obstacle::new` only rejects negative radii, and this one is
        // checked at compile time, so the `Err` arm is unreachable.
        const { assert!(Self::REFERENCE_OBSTACLE_RADIUS >= 0.0) };
        let obstacles = match Obstacle::new(DVec2::ZERO, Self::REFERENCE_OBSTACLE_RADIUS) {
            Ok(obstacle) => vec![obstacle],
            Err(_) => Vec::new(),
        };
        Self {
            obstacles,
            agent_effective_radius: Self::REFERENCE_AGENT_RADIUS,
            boundary:    Some(StateBound::new(0, 1.0)),
            horizon:     Some(Self::REFERENCE_HORIZON),
            settle_time: Self::REFERENCE_SETTLE_SECS,
            reset_speed: Some(Self::REFERENCE_SPEED),
            ..Self::new(initial_conditions)
        }
    }

    pub fn with_obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }
}
