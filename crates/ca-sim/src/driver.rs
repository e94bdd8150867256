//! The `Driver` struct and its tick loop.

use ca_agent::Agent;
use ca_control::{ControlContext, Controller};
use ca_core::{ConditionId, SessionClock, TimeScale};
use ca_dynamics::{Dynamics, StateVector};
use ca_proximity::{Obstacle, Proximity, ProximityEvaluator};
use log::{debug, info, warn};

use crate::{
    DriverObserver, Intervention, ResetCause, ResetEvent, SessionSummary, SimResult, StateBound,
    StateUpdate,
};

// ── Phase / outcomes ──────────────────────────────────────────────────────────

/// Session lifecycle.  Moves forward only.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Warm-up: wall time accumulates, nothing is integrated.
    Countdown,
    Running,
    /// The reset sequence has wrapped.  Ticks are no-ops.
    Complete,
}

/// What happened during one integrated step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepSummary {
    /// Simulated seconds integrated.
    pub dt: f64,
    pub proximity: Proximity,
    pub collision: bool,
    /// Set when the step ended with a reset.
    pub reset: Option<ResetCause>,
}

/// Result of [`Driver::tick`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Still counting down.
    Countdown { remaining_ms: f64 },
    /// Time advanced but the agent is frozen after a reset.
    Settling { dt: f64 },
    Stepped(StepSummary),
    /// The session is complete; nothing changed.
    Idle,
}

// ── Driver ────────────────────────────────────────────────────────────────────

/// Orchestrates one agent, one controller and a fixed obstacle set.
///
/// `Driver<D, C>` owns everything that changes during a session: the agent,
/// the clock, the reset index and the running totals.  Every mutation goes
/// through [`tick`](Self::tick) or [`intervene`](Self::intervene), both of
/// which take `&mut self`.
///
/// Create via [`DriverBuilder`][crate::DriverBuilder].
#[derive(Debug)]
pub struct Driver<D: Dynamics, C: Controller> {
    pub(crate) agent:      Agent<D>,
    pub(crate) controller: C,

    pub(crate) initial_conditions: Vec<StateVector>,
    pub(crate) obstacles:          Vec<Obstacle>,
    pub(crate) evaluator:          ProximityEvaluator,
    pub(crate) time_scale:         TimeScale,
    pub(crate) warmup_ms:          f64,
    pub(crate) boundary:           Option<StateBound>,
    pub(crate) horizon:            Option<f64>,
    pub(crate) settle_time:        f64,
    pub(crate) reset_speed:        Option<f64>,

    pub(crate) clock:          SessionClock,
    pub(crate) phase:          Phase,
    pub(crate) condition:      usize,
    pub(crate) last_proximity: Proximity,
    pub(crate) colliding:      bool,
    pub(crate) resets:         usize,
    pub(crate) interventions:  usize,
    pub(crate) collisions:     usize,
}

impl<D: Dynamics, C: Controller> Driver<D, C> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Advance the session by `wall_dt_ms` wall milliseconds.
    ///
    /// Negative or non-finite deltas are treated as zero.  If the controller
    /// returns a control vector of the wrong length the tick fails with
    /// [`SimError::Dynamics`][crate::SimError::Dynamics] and neither the
    /// clock nor the agent changes.
    pub fn tick<O: DriverObserver>(
        &mut self,
        wall_dt_ms: f64,
        observer:   &mut O,
    ) -> SimResult<TickOutcome> {
        let wall = sanitize_wall_ms(wall_dt_ms);

        match self.phase {
            Phase::Complete => return Ok(TickOutcome::Idle),
            Phase::Countdown if self.clock.wall_ms + wall <= self.warmup_ms => {
                self.clock.advance_wall(wall);
                return Ok(TickOutcome::Countdown { remaining_ms: self.countdown_remaining_ms() });
            }
            _ => {}
        }

        // Work on a copy so a failed step leaves the clock untouched.
        let dt = self.time_scale.sim_dt(wall);
        let mut clock = self.clock;
        clock.advance_wall(wall);
        clock.advance_sim(dt);

        if clock.is_settling() {
            self.commit(clock);
            debug!("settling: {:.3} s until condition {} starts", -clock.condition_secs, self.condition);
            return Ok(TickOutcome::Settling { dt });
        }

        // ── Control + integration ─────────────────────────────────────────
        let condition = self.condition_index();
        let u = {
            let ctx = ControlContext {
                sim_secs: clock.sim_secs,
                condition_secs: clock.condition_secs,
                condition,
                state: self.agent.state().view(),
                dims: self.agent.dims(),
                dt,
            };
            self.controller.control(&ctx)
        };
        self.agent.step(dt, &u)?;
        self.commit(clock);

        // ── Proximity ─────────────────────────────────────────────────────
        let proximity = self.evaluator.nearest(self.agent.position(), &self.obstacles);
        let collision = self.evaluator.is_collision(proximity.value);
        self.last_proximity = proximity;

        observer.on_state_updated(&StateUpdate {
            wall_ms: self.clock.wall_ms,
            sim_secs: self.clock.sim_secs,
            condition,
            state: self.agent.state(),
            pose: self.agent.display_pose(),
            proximity,
            collision,
        });

        // ── Reset / collision response ────────────────────────────────────
        let reset = self.reset_cause();
        match reset {
            Some(cause) => {
                self.load_next(cause, observer)?;
            }
            None if collision => self.respond_to_collision(),
            None => self.colliding = false,
        }

        Ok(TickOutcome::Stepped(StepSummary { dt, proximity, collision, reset }))
    }

    /// Supervisor signal: record the current state, then load the next
    /// initial condition exactly as a policy reset would.
    ///
    /// Valid in every phase.  After completion the index keeps cycling but
    /// completion is not reported again.
    pub fn intervene<O: DriverObserver>(&mut self, observer: &mut O) -> SimResult<ConditionId> {
        self.interventions += 1;
        info!(
            "intervention on condition {} at {}",
            self.condition,
            self.agent.display_pose()
        );
        observer.on_intervention(&Intervention {
            wall_ms:   self.clock.wall_ms,
            sim_secs:  self.clock.sim_secs,
            condition: self.condition_index(),
            state:     self.agent.state(),
        });
        self.load_next(ResetCause::Intervention, observer)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Wall milliseconds left in the countdown; `0.0` once it has ended.
    pub fn countdown_remaining_ms(&self) -> f64 {
        match self.phase {
            Phase::Countdown => (self.warmup_ms - self.clock.wall_ms).max(0.0),
            _ => 0.0,
        }
    }

    /// Whole seconds to show on a countdown display (`3, 2, 1`).
    ///
    /// The float-to-int cast saturates, so a warm-up beyond `u64::MAX`
    /// seconds reads as `u64::MAX`.  The remaining time is never negative
    /// or NaN because the builder only accepts finite warm-ups.
    pub fn countdown_seconds(&self) -> u64 {
        (self.countdown_remaining_ms() / 1000.0).ceil() as u64
    }

    #[inline]
    pub fn condition_index(&self) -> ConditionId {
        ConditionId(self.condition as u32)
    }

    #[inline]
    pub fn initial_conditions(&self) -> &[StateVector] {
        &self.initial_conditions
    }

    #[inline]
    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    #[inline]
    pub fn agent(&self) -> &Agent<D> {
        &self.agent
    }

    #[inline]
    pub fn controller(&self) -> &C {
        &self.controller
    }

    #[inline]
    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    #[inline]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Proximity as of the last integrated step or reset.
    #[inline]
    pub fn last_proximity(&self) -> Proximity {
        self.last_proximity
    }

    /// Running totals so far.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            wall_ms:       self.clock.wall_ms,
            sim_secs:      self.clock.sim_secs,
            conditions:    self.initial_conditions.len(),
            resets:        self.resets,
            interventions: self.interventions,
            collisions:    self.collisions,
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn commit(&mut self, clock: SessionClock) {
        self.clock = clock;
        if self.phase == Phase::Countdown {
            self.phase = Phase::Running;
            info!("countdown finished after {:.0} ms; session running", clock.wall_ms);
        }
    }

    fn reset_cause(&self) -> Option<ResetCause> {
        let state = self.agent.state().view();
        if self.boundary.is_some_and(|b| b.is_exceeded(state)) {
            Some(ResetCause::Boundary)
        } else if self.horizon.is_some_and(|h| self.clock.condition_secs > h) {
            Some(ResetCause::Horizon)
        } else {
            None
        }
    }

    fn respond_to_collision(&mut self) {
        if !self.colliding {
            self.colliding = true;
            self.collisions += 1;
            debug!(
                "collision on condition {} at {} (proximity {:.3})",
                self.condition,
                self.agent.display_pose(),
                self.last_proximity.value
            );
        }
        if self.agent.speed().is_some() && !self.agent.is_halted() {
            self.agent.halt();
        }
    }

    /// Load the next initial condition, wrapping to 0 after the last one.
    fn load_next<O: DriverObserver>(
        &mut self,
        cause:    ResetCause,
        observer: &mut O,
    ) -> SimResult<ConditionId> {
        let from = self.condition_index();
        let next = (self.condition + 1) % self.initial_conditions.len();

        self.agent.reset_to(&self.initial_conditions[next])?;
        if let Some(speed) = self.reset_speed {
            self.agent.set_speed(speed);
        }
        self.clock.restart_condition(self.settle_time);
        self.condition = next;
        self.resets += 1;
        self.colliding = false;
        self.last_proximity = self.evaluator.nearest(self.agent.position(), &self.obstacles);

        let to = self.condition_index();
        info!("{cause:?} reset: condition {} -> {}", from.0, to.0);
        observer.on_reset(&ResetEvent {
            cause,
            wall_ms: self.clock.wall_ms,
            sim_secs: self.clock.sim_secs,
            from,
            to,
            state: self.agent.state(),
        });

        if next == 0 && self.phase != Phase::Complete {
            self.phase = Phase::Complete;
            let summary = self.summary();
            info!(
                "session complete: {} conditions, {} resets, {} interventions, {} collisions",
                summary.conditions, summary.resets, summary.interventions, summary.collisions
            );
            observer.on_session_complete(&summary);
        }
        Ok(to)
    }
}

fn sanitize_wall_ms(wall_dt_ms: f64) -> f64 {
    if wall_dt_ms.is_finite() && wall_dt_ms >= 0.0 {
        wall_dt_ms
    } else {
        warn!("discarding wall-clock delta of {wall_dt_ms} ms");
        0.0
    }
}
