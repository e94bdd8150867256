//! Fluent builder for constructing a [`Driver`].

use ca_agent::Agent;
use ca_control::{Controller, ZeroControl};
use ca_core::SessionClock;
use ca_dynamics::Dynamics;
use ca_proximity::ProximityEvaluator;

use crate::driver::Phase;
use crate::{Driver, DriverConfig, SimError, SimResult};

/// Fluent builder for [`Driver<D, C>`].
///
/// # Required inputs
///
/// - [`DriverConfig`]: reset sequence, countdown, obstacles, …
/// - `D: Dynamics`: the agent's dynamics, carrying its initial speed
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                               |
/// |-------------------|---------------------------------------|
/// | `.controller(c)`  | [`ZeroControl`]                       |
///
/// # Example
///
/// ```rust
/// use ca_control::ConstantControl;
/// use ca_dynamics::PlanarDoubleIntegrator;
/// use ca_sim::{DriverBuilder, DriverConfig};
///
/// let config = DriverConfig::new(vec![vec![0.0; 4].into()]);
/// let driver = DriverBuilder::new(config, PlanarDoubleIntegrator)
///     .controller(ConstantControl::new([1.0, 0.0]))
///     .build()
///     .unwrap();
/// assert_eq!(driver.agent().state().len(), 4);
/// ```
pub struct DriverBuilder<D: Dynamics, C: Controller = ZeroControl> {
    config:     DriverConfig,
    dynamics:   D,
    controller: C,
}

impl<D: Dynamics> DriverBuilder<D, ZeroControl> {
    /// Create a builder with all required inputs.
    pub fn new(config: DriverConfig, dynamics: D) -> Self {
        Self { config, dynamics, controller: ZeroControl }
    }
}

impl<D: Dynamics, C: Controller> DriverBuilder<D, C> {
    /// Supply the controller asked for `u` on every integrated tick.
    pub fn controller<C2: Controller>(self, controller: C2) -> DriverBuilder<D, C2> {
        DriverBuilder {
            config:   self.config,
            dynamics: self.dynamics,
            controller,
        }
    }

    /// Validate the configuration against the dynamics and return a driver
    /// in [`Phase::Countdown`] at the first initial condition.
    pub fn build(self) -> SimResult<Driver<D, C>> {
        let config = self.config;
        let dims = self.dynamics.dims();

        // ── Reset sequence ────────────────────────────────────────────────
        if config.initial_conditions.is_empty() {
            return Err(SimError::Config("at least one initial condition is required".into()));
        }
        if u32::try_from(config.initial_conditions.len()).is_err() {
            return Err(SimError::Config("too many initial conditions".into()));
        }
        for (i, ic) in config.initial_conditions.iter().enumerate() {
            if ic.len() != dims.state {
                return Err(SimError::Config(format!(
                    "initial condition {i} has length {}, dynamics state dimension is {}",
                    ic.len(),
                    dims.state
                )));
            }
            if ic.iter().any(|v| !v.is_finite()) {
                return Err(SimError::Config(format!("initial condition {i} is not finite")));
            }
        }

        // ── Timing ────────────────────────────────────────────────────────
        config
            .time_scale
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;
        if !(config.warmup_ms.is_finite() && config.warmup_ms > 0.0) {
            return Err(SimError::Config(format!(
                "warm-up must be finite and positive, got {} ms",
                config.warmup_ms
            )));
        }
        if !(config.settle_time.is_finite() && config.settle_time >= 0.0) {
            return Err(SimError::Config(format!(
                "settle time must be finite and non-negative, got {}",
                config.settle_time
            )));
        }
        if let Some(h) = config.horizon {
            if !(h.is_finite() && h > 0.0) {
                return Err(SimError::Config(format!("horizon must be finite and positive, got {h}")));
            }
        }

        // ── Geometry ──────────────────────────────────────────────────────
        if let Some(bound) = config.boundary {
            if bound.component >= dims.state {
                return Err(SimError::Config(format!(
                    "boundary component {} out of range for state dimension {}",
                    bound.component, dims.state
                )));
            }
            if bound.max.is_nan() {
                return Err(SimError::Config("boundary limit is NaN".into()));
            }
        }
        for (i, obstacle) in config.obstacles.iter().enumerate() {
            if obstacle.radius() < 0.0 {
                return Err(SimError::Config(format!(
                    "obstacle {i} has negative radius {}",
                    obstacle.radius()
                )));
            }
        }
        if !config.collision_threshold.is_finite() {
            return Err(SimError::Config("collision threshold must be finite".into()));
        }
        let evaluator = ProximityEvaluator::new(config.agent_effective_radius)
            .map_err(|e| SimError::Config(e.to_string()))?
            .with_threshold(config.collision_threshold);

        if let Some(speed) = config.reset_speed {
            if !speed.is_finite() {
                return Err(SimError::Config(format!("reset speed must be finite, got {speed}")));
            }
        }

        // ── Assemble ──────────────────────────────────────────────────────
        let agent = Agent::new(self.dynamics, config.initial_conditions[0].clone())?;
        let last_proximity = evaluator.nearest(agent.position(), &config.obstacles);

        Ok(Driver {
            agent,
            controller: self.controller,
            clock: SessionClock::new(config.settle_time),
            phase: Phase::Countdown,
            condition: 0,
            last_proximity,
            colliding: false,
            resets: 0,
            interventions: 0,
            collisions: 0,
            evaluator,
            initial_conditions: config.initial_conditions,
            obstacles: config.obstacles,
            time_scale: config.time_scale,
            warmup_ms: config.warmup_ms,
            boundary: config.boundary,
            horizon: config.horizon,
            settle_time: config.settle_time,
            reset_speed: config.reset_speed,
        })
    }
}
