//! Unit tests for ca-sim.

use approx::assert_abs_diff_eq;
use ca_core::{DVec2, TimeScale};
use ca_dynamics::StateVector;
use ca_proximity::Obstacle;
use ndarray::array;

use crate::{
    DriverConfig, DriverObserver, Intervention, ResetCause, ResetEvent, SessionSummary,
    StateUpdate,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// One 8 ms tick is exactly one simulated second.
const TICK_MS: f64 = 8.0;

/// Countdown of one tick, one simulated second per tick, nothing else.
fn fast_config(initial_conditions: Vec<StateVector>) -> DriverConfig {
    DriverConfig {
        time_scale: TimeScale::new(0.125),
        warmup_ms: TICK_MS,
        ..DriverConfig::new(initial_conditions)
    }
}

#[derive(Default)]
struct Recording {
    updates:       Vec<(f64, StateVector, bool)>,
    resets:        Vec<(ResetCause, u32, u32, StateVector)>,
    interventions: Vec<(f64, StateVector)>,
    completions:   Vec<SessionSummary>,
}

impl DriverObserver for Recording {
    fn on_state_updated(&mut self, update: &StateUpdate<'_>) {
        self.updates.push((update.sim_secs, update.state.clone(), update.collision));
    }

    fn on_reset(&mut self, event: &ResetEvent<'_>) {
        self.resets.push((event.cause, event.from.0, event.to.0, event.state.clone()));
    }

    fn on_intervention(&mut self, event: &Intervention<'_>) {
        self.interventions.push((event.sim_secs, event.state.clone()));
    }

    fn on_session_complete(&mut self, summary: &SessionSummary) {
        self.completions.push(*summary);
    }
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use ca_dynamics::{PlanarDoubleIntegrator, Trivial, Unicycle};

    use super::*;
    use crate::{DriverBuilder, Phase, SimError, StateBound};

    #[test]
    fn builds_in_countdown_at_first_condition() {
        let driver = DriverBuilder::new(fast_config(vec![array![1.0, 2.0, 0.0]]), Unicycle::new(3.0))
            .build()
            .unwrap();
        assert_eq!(driver.phase(), Phase::Countdown);
        assert_eq!(driver.condition_index().0, 0);
        assert_eq!(*driver.agent().state(), array![1.0, 2.0, 0.0]);
        assert_eq!(driver.countdown_remaining_ms(), TICK_MS);
    }

    #[test]
    fn empty_reset_sequence_errors() {
        let result = DriverBuilder::new(fast_config(vec![]), Trivial::default()).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn condition_length_mismatch_errors() {
        let config = fast_config(vec![array![0.0, 0.0, 0.0, 0.0], array![0.0, 0.0]]);
        let err = DriverBuilder::new(config, PlanarDoubleIntegrator).build().unwrap_err();
        match err {
            SimError::Config(msg) => assert!(msg.contains("initial condition 1"), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn timing_is_validated() {
        let mut zero_warmup = fast_config(vec![array![0.0]]);
        zero_warmup.warmup_ms = 0.0;
        assert!(DriverBuilder::new(zero_warmup, Trivial::default()).build().is_err());

        let mut bad_scale = fast_config(vec![array![0.0]]);
        bad_scale.time_scale = TimeScale::new(-1.0);
        assert!(DriverBuilder::new(bad_scale, Trivial::default()).build().is_err());

        let mut bad_horizon = fast_config(vec![array![0.0]]);
        bad_horizon.horizon = Some(0.0);
        assert!(DriverBuilder::new(bad_horizon, Trivial::default()).build().is_err());

        let mut bad_settle = fast_config(vec![array![0.0]]);
        bad_settle.settle_time = -1.0;
        assert!(DriverBuilder::new(bad_settle, Trivial::default()).build().is_err());
    }

    #[test]
    fn geometry_is_validated() {
        let mut bad_radius = fast_config(vec![array![0.0, 0.0, 0.0]]);
        bad_radius.agent_effective_radius = -0.5;
        assert!(DriverBuilder::new(bad_radius, Unicycle::new(1.0)).build().is_err());

        let mut bad_bound = fast_config(vec![array![0.0, 0.0, 0.0]]);
        bad_bound.boundary = Some(StateBound::new(3, 1.0));
        assert!(DriverBuilder::new(bad_bound, Unicycle::new(1.0)).build().is_err());
    }

    #[test]
    fn reference_config_matches_the_avoidance_session() {
        let config = DriverConfig::reference(vec![array![-8.0, 0.0, 0.0]]);
        assert_eq!(config.warmup_ms, 3000.0);
        assert_abs_diff_eq!(config.time_scale.factor, 0.002, epsilon = 1e-15);
        assert_eq!(config.obstacles.len(), 1);
        assert_eq!(config.obstacles[0].radius(), 1.8);
        assert_eq!(config.agent_effective_radius, 0.55);
        assert_eq!(config.boundary, Some(StateBound::new(0, 1.0)));
        assert_abs_diff_eq!(config.horizon.unwrap(), 10.0 / 3.0, epsilon = 1e-12);
        assert_eq!(config.reset_speed, Some(3.0));
        assert_eq!(config.settle_time, 1.0);
    }
}

// ── Countdown and time scaling ────────────────────────────────────────────────

#[cfg(test)]
mod countdown_tests {
    use ca_control::ConstantControl;
    use ca_dynamics::PlanarDoubleIntegrator;

    use super::*;
    use crate::{DriverBuilder, NoopObserver, Phase, TickOutcome};

    #[test]
    fn nothing_moves_during_countdown() {
        let config = DriverConfig::new(vec![array![0.0, 0.0, 0.0, 0.0]]);
        let mut driver = DriverBuilder::new(config, PlanarDoubleIntegrator)
            .controller(ConstantControl::new([1.0, 1.0]))
            .build()
            .unwrap();
        let mut rec = Recording::default();

        let outcome = driver.tick(500.0, &mut rec).unwrap();
        assert_eq!(outcome, TickOutcome::Countdown { remaining_ms: 2500.0 });
        assert_eq!(driver.countdown_seconds(), 3);
        driver.tick(1600.0, &mut rec).unwrap();
        assert_eq!(driver.countdown_seconds(), 1);

        assert_eq!(driver.phase(), Phase::Countdown);
        assert_eq!(*driver.agent().state(), array![0.0, 0.0, 0.0, 0.0]);
        assert!(rec.updates.is_empty());
        assert_eq!(driver.clock().sim_secs, 0.0);
    }

    #[test]
    fn countdown_seconds_saturates_for_huge_warmups() {
        let mut config = DriverConfig::new(vec![array![0.0, 0.0, 0.0, 0.0]]);
        config.warmup_ms = 1e30;
        let mut driver = DriverBuilder::new(config, PlanarDoubleIntegrator).build().unwrap();
        assert_eq!(driver.countdown_seconds(), u64::MAX);

        let mut config = DriverConfig::new(vec![array![0.0, 0.0, 0.0, 0.0]]);
        config.warmup_ms = 5e12;
        driver = DriverBuilder::new(config, PlanarDoubleIntegrator).build().unwrap();
        assert_eq!(driver.countdown_seconds(), 5_000_000_000);
        driver.tick(5e12 + 1.0, &mut NoopObserver).unwrap();
        assert_eq!(driver.countdown_seconds(), 0);
    }

    #[test]
    fn transition_tick_integrates_full_delta() {
        let mut driver = DriverBuilder::new(fast_config(vec![array![0.0, 0.0, 0.0, 0.0]]), PlanarDoubleIntegrator)
            .controller(ConstantControl::new([1.0, 0.0]))
            .build()
            .unwrap();

        // 16 ms crosses the 8 ms countdown; all 16 ms count.
        let outcome = driver.tick(2.0 * TICK_MS, &mut NoopObserver).unwrap();
        match outcome {
            TickOutcome::Stepped(step) => assert_eq!(step.dt, 2.0),
            other => panic!("expected a step, got {other:?}"),
        }
        assert_eq!(driver.phase(), Phase::Running);
        assert_eq!(driver.countdown_remaining_ms(), 0.0);
        assert_eq!(*driver.agent().state(), array![0.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn planar_reference_trace_through_driver() {
        let mut driver = DriverBuilder::new(fast_config(vec![array![0.0, 0.0, 0.0, 0.0]]), PlanarDoubleIntegrator)
            .controller(ConstantControl::new([1.0, 0.0]))
            .build()
            .unwrap();
        let mut rec = Recording::default();
        for _ in 0..3 {
            driver.tick(TICK_MS, &mut rec).unwrap();
        }
        assert_eq!(*driver.agent().state(), array![1.0, 2.0, 0.0, 0.0]);
        assert_eq!(rec.updates.len(), 2);
        assert_eq!(rec.updates[0].0, 1.0);
        assert_eq!(rec.updates[1].0, 2.0);
    }

    #[test]
    fn max_step_clamps_jitter() {
        let mut config = fast_config(vec![array![0.0, 0.0, 0.0, 0.0]]);
        config.time_scale = TimeScale::new(0.125).with_max_step(0.5);
        let mut driver = DriverBuilder::new(config, PlanarDoubleIntegrator).build().unwrap();
        driver.tick(TICK_MS, &mut NoopObserver).unwrap();
        let outcome = driver.tick(10.0 * TICK_MS, &mut NoopObserver).unwrap();
        assert!(matches!(outcome, TickOutcome::Stepped(s) if s.dt == 0.5));
    }

    #[test]
    fn bad_wall_deltas_count_as_zero() {
        let config = DriverConfig::new(vec![array![0.0, 0.0, 0.0, 0.0]]);
        let mut driver = DriverBuilder::new(config, PlanarDoubleIntegrator).build().unwrap();
        driver.tick(-20.0, &mut NoopObserver).unwrap();
        driver.tick(f64::NAN, &mut NoopObserver).unwrap();
        driver.tick(f64::INFINITY, &mut NoopObserver).unwrap();
        assert_eq!(driver.clock().wall_ms, 0.0);
        assert_eq!(driver.phase(), Phase::Countdown);
    }
}

// ── Settle period ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod settle_tests {
    use ca_dynamics::Unicycle;

    use super::*;
    use crate::{DriverBuilder, TickOutcome};

    #[test]
    fn agent_waits_for_settle_period() {
        let mut config = fast_config(vec![array![0.0, 0.0, 0.0]]);
        config.settle_time = 1.0;
        let mut driver = DriverBuilder::new(config, Unicycle::new(1.0)).build().unwrap();
        let mut rec = Recording::default();

        driver.tick(TICK_MS, &mut rec).unwrap();
        let outcome = driver.tick(TICK_MS, &mut rec).unwrap();
        assert_eq!(outcome, TickOutcome::Settling { dt: 1.0 });
        assert_eq!(*driver.agent().state(), array![0.0, 0.0, 0.0]);
        assert!(rec.updates.is_empty());

        driver.tick(TICK_MS, &mut rec).unwrap();
        assert_eq!(*driver.agent().state(), array![1.0, 0.0, 0.0]);
        assert_eq!(driver.clock().sim_secs, 2.0);
        assert_eq!(driver.clock().condition_secs, 1.0);
    }

    #[test]
    fn settle_restarts_after_every_reset() {
        let mut config = fast_config(vec![array![0.0, 0.0, 0.0], array![0.0, 1.0, 0.0]]);
        config.settle_time = 2.0;
        let mut driver = DriverBuilder::new(config, Unicycle::new(1.0)).build().unwrap();
        let mut rec = Recording::default();

        driver.intervene(&mut rec).unwrap();
        assert_eq!(driver.clock().condition_secs, -2.0);
        driver.tick(TICK_MS, &mut rec).unwrap();
        assert!(matches!(driver.tick(TICK_MS, &mut rec).unwrap(), TickOutcome::Settling { .. }));
        assert!(matches!(driver.tick(TICK_MS, &mut rec).unwrap(), TickOutcome::Settling { .. }));
        assert!(matches!(driver.tick(TICK_MS, &mut rec).unwrap(), TickOutcome::Stepped(_)));
        assert_eq!(*driver.agent().state(), array![1.0, 1.0, 0.0]);
    }
}

// ── Reset policy and completion ───────────────────────────────────────────────

#[cfg(test)]
mod reset_tests {
    use ca_dynamics::{Trivial, Unicycle};

    use super::*;
    use crate::{DriverBuilder, Phase, StateBound, TickOutcome};

    #[test]
    fn boundary_crossing_loads_next_condition_and_wraps_to_completion() {
        let mut config = fast_config(vec![array![0.0, 0.0, 0.0], array![0.0, 5.0, 0.0]]);
        config.boundary = Some(StateBound::new(0, 1.5));
        let mut driver = DriverBuilder::new(config, Unicycle::new(1.0)).build().unwrap();
        let mut rec = Recording::default();

        driver.tick(TICK_MS, &mut rec).unwrap();
        driver.tick(TICK_MS, &mut rec).unwrap();
        let outcome = driver.tick(TICK_MS, &mut rec).unwrap();
        assert!(matches!(outcome, TickOutcome::Stepped(s) if s.reset == Some(ResetCause::Boundary)));
        assert_eq!(driver.condition_index().0, 1);
        assert_eq!(*driver.agent().state(), array![0.0, 5.0, 0.0]);
        assert!(rec.completions.is_empty());

        driver.tick(TICK_MS, &mut rec).unwrap();
        driver.tick(TICK_MS, &mut rec).unwrap();
        assert_eq!(driver.phase(), Phase::Complete);
        assert_eq!(driver.condition_index().0, 0);
        assert_eq!(rec.resets.len(), 2);
        assert_eq!((rec.resets[1].1, rec.resets[1].2), (1, 0));
        assert_eq!(rec.completions.len(), 1);
        assert_eq!(rec.completions[0].resets, 2);
        assert_eq!(rec.completions[0].conditions, 2);
    }

    #[test]
    fn completed_session_ignores_ticks() {
        let mut config = fast_config(vec![array![0.0, 0.0, 0.0]]);
        config.boundary = Some(StateBound::new(0, 0.5));
        let mut driver = DriverBuilder::new(config, Unicycle::new(1.0)).build().unwrap();
        let mut rec = Recording::default();
        driver.tick(TICK_MS, &mut rec).unwrap();
        driver.tick(TICK_MS, &mut rec).unwrap();
        assert!(driver.is_complete());

        let clock = *driver.clock();
        let state = driver.agent().state().clone();
        assert_eq!(driver.tick(TICK_MS, &mut rec).unwrap(), TickOutcome::Idle);
        assert_eq!(*driver.clock(), clock);
        assert_eq!(*driver.agent().state(), state);
        assert_eq!(rec.updates.len(), 1);
    }

    #[test]
    fn horizon_expiry_resets() {
        let mut config = fast_config(vec![array![0.0], array![1.0], array![2.0]]);
        config.horizon = Some(2.5);
        let mut driver = DriverBuilder::new(config, Trivial::default()).build().unwrap();
        let mut rec = Recording::default();

        for _ in 0..3 {
            driver.tick(TICK_MS, &mut rec).unwrap();
        }
        assert!(rec.resets.is_empty());
        let outcome = driver.tick(TICK_MS, &mut rec).unwrap();
        assert!(matches!(outcome, TickOutcome::Stepped(s) if s.reset == Some(ResetCause::Horizon)));
        assert_eq!(*driver.agent().state(), array![1.0]);
        assert_eq!(driver.clock().condition_secs, 0.0);
    }

    #[test]
    fn n_resets_complete_once_then_keep_cycling() {
        let config = fast_config(vec![array![0.0], array![1.0], array![2.0]]);
        let mut driver = DriverBuilder::new(config, Trivial::default()).build().unwrap();
        let mut rec = Recording::default();

        for _ in 0..2 {
            driver.intervene(&mut rec).unwrap();
        }
        assert!(rec.completions.is_empty());
        assert_eq!(driver.intervene(&mut rec).unwrap().0, 0);
        assert_eq!(rec.completions.len(), 1);
        assert_eq!(rec.completions[0].interventions, 3);

        assert_eq!(driver.intervene(&mut rec).unwrap().0, 1);
        assert_eq!(*driver.agent().state(), array![1.0]);
        assert_eq!(rec.completions.len(), 1);
        assert_eq!(driver.phase(), Phase::Complete);
    }
}

// ── Intervention ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod intervention_tests {
    use ca_dynamics::Unicycle;

    use super::*;
    use crate::{DriverBuilder, Phase};

    #[test]
    fn records_state_then_resets() {
        let mut config = fast_config(vec![array![0.0, 0.0, 0.0], array![-8.0, 2.0, 0.0]]);
        config.reset_speed = Some(3.0);
        config.settle_time = 0.5;
        let mut driver = DriverBuilder::new(config, Unicycle::new(1.0)).build().unwrap();
        let mut rec = Recording::default();

        driver.tick(TICK_MS, &mut rec).unwrap();
        driver.tick(TICK_MS, &mut rec).unwrap();
        driver.tick(TICK_MS, &mut rec).unwrap();
        assert_eq!(*driver.agent().state(), array![2.0, 0.0, 0.0]);

        let next = driver.intervene(&mut rec).unwrap();
        assert_eq!(next.0, 1);
        assert_eq!(rec.interventions.len(), 1);
        assert_eq!(rec.interventions[0].1, array![2.0, 0.0, 0.0]);
        assert_eq!(rec.interventions[0].0, 2.0);
        assert_eq!(rec.resets[0].0, ResetCause::Intervention);
        assert_eq!(*driver.agent().state(), array![-8.0, 2.0, 0.0]);
        assert_eq!(driver.agent().speed(), Some(3.0));
        assert_eq!(driver.clock().condition_secs, -0.5);
        assert_eq!(driver.summary().interventions, 1);
    }

    #[test]
    fn allowed_during_countdown() {
        let config = fast_config(vec![array![0.0, 0.0, 0.0], array![0.0, 1.0, 0.0]]);
        let mut driver = DriverBuilder::new(config, Unicycle::new(1.0)).build().unwrap();
        let mut rec = Recording::default();
        driver.intervene(&mut rec).unwrap();
        assert_eq!(driver.phase(), Phase::Countdown);
        assert_eq!(driver.condition_index().0, 1);
        assert_eq!(rec.interventions[0].0, 0.0);
    }
}

// ── Collision response ────────────────────────────────────────────────────────

#[cfg(test)]
mod collision_tests {
    use ca_dynamics::{PlanarDoubleIntegrator, Unicycle};
    use ca_control::ConstantControl;

    use super::*;
    use crate::{DriverBuilder, StateBound, TickOutcome};

    fn head_on(initial_conditions: Vec<StateVector>) -> DriverConfig {
        let mut config = fast_config(initial_conditions);
        config.obstacles = vec![Obstacle::new(DVec2::ZERO, 1.0).unwrap()];
        config.agent_effective_radius = 0.5;
        config
    }

    #[test]
    fn collision_halts_the_unicycle() {
        let mut driver = DriverBuilder::new(head_on(vec![array![-3.0, 0.0, 0.0]]), Unicycle::new(1.0))
            .build()
            .unwrap();
        let mut rec = Recording::default();

        driver.tick(TICK_MS, &mut rec).unwrap();
        driver.tick(TICK_MS, &mut rec).unwrap();
        assert_abs_diff_eq!(driver.last_proximity().value, 0.5, epsilon = 1e-12);

        let outcome = driver.tick(TICK_MS, &mut rec).unwrap();
        let TickOutcome::Stepped(step) = outcome else {
            panic!("expected a step, got {outcome:?}");
        };
        assert!(step.collision);
        assert_abs_diff_eq!(step.proximity.value, -0.5, epsilon = 1e-12);
        assert_eq!(driver.agent().speed(), Some(0.0));
        assert!(driver.agent().is_halted());

        driver.tick(TICK_MS, &mut rec).unwrap();
        assert_eq!(*driver.agent().state(), array![-1.0, 0.0, 0.0]);
        assert_eq!(driver.summary().collisions, 1);
        assert_eq!(rec.updates.iter().filter(|u| u.2).count(), 2);
    }

    #[test]
    fn reset_restores_speed_after_collision() {
        let mut config = head_on(vec![array![-3.0, 0.0, 0.0], array![-3.0, 4.0, 0.0]]);
        config.horizon = Some(3.5);
        config.reset_speed = Some(3.0);
        let mut driver = DriverBuilder::new(config, Unicycle::new(1.0)).build().unwrap();
        let mut rec = Recording::default();

        for _ in 0..4 {
            driver.tick(TICK_MS, &mut rec).unwrap();
        }
        assert_eq!(driver.agent().speed(), Some(0.0));

        let outcome = driver.tick(TICK_MS, &mut rec).unwrap();
        assert!(matches!(outcome, TickOutcome::Stepped(s) if s.reset == Some(ResetCause::Horizon)));
        assert_eq!(driver.agent().speed(), Some(3.0));
        assert!(!driver.agent().is_halted());
    }

    #[test]
    fn halt_is_released_on_reset_without_reset_speed() {
        let mut config = head_on(vec![array![-3.0, 0.0, 0.0], array![-3.0, 4.0, 0.0]]);
        config.horizon = Some(3.5);
        assert_eq!(config.reset_speed, None);
        let mut driver = DriverBuilder::new(config, Unicycle::new(1.0)).build().unwrap();
        let mut rec = Recording::default();

        for _ in 0..4 {
            driver.tick(TICK_MS, &mut rec).unwrap();
        }
        assert!(driver.agent().is_halted());
        assert_eq!(*driver.agent().state(), array![-1.0, 0.0, 0.0]);

        let outcome = driver.tick(TICK_MS, &mut rec).unwrap();
        assert!(matches!(outcome, TickOutcome::Stepped(s) if s.reset == Some(ResetCause::Horizon)));
        assert_eq!(driver.agent().speed(), Some(1.0));
        assert!(!driver.agent().is_halted());
        assert_eq!(*driver.agent().state(), array![-3.0, 4.0, 0.0]);

        let outcome = driver.tick(TICK_MS, &mut rec).unwrap();
        assert!(matches!(outcome, TickOutcome::Stepped(s) if !s.collision && s.reset.is_none()));
        assert_abs_diff_eq!(driver.agent().state()[0], -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(driver.agent().state()[1], 4.0, epsilon = 1e-12);
    }

    #[test]
    fn intervention_releases_a_collision_halt() {
        let mut driver = DriverBuilder::new(
            head_on(vec![array![-3.0, 0.0, 0.0], array![-3.0, -4.0, 0.0]]),
            Unicycle::new(1.0),
        )
        .build()
        .unwrap();
        let mut rec = Recording::default();

        for _ in 0..3 {
            driver.tick(TICK_MS, &mut rec).unwrap();
        }
        assert!(driver.agent().is_halted());

        driver.intervene(&mut rec).unwrap();
        assert_eq!(driver.agent().speed(), Some(1.0));
        driver.tick(TICK_MS, &mut rec).unwrap();
        assert_abs_diff_eq!(driver.agent().state()[0], -2.0, epsilon = 1e-12);
    }

    #[test]
    fn no_halt_on_a_reset_tick() {
        let mut config = fast_config(vec![array![0.0, 0.0, 0.0], array![0.0, 9.0, 0.0]]);
        config.obstacles = vec![Obstacle::new(DVec2::new(2.0, 0.0), 1.0).unwrap()];
        config.boundary = Some(StateBound::new(0, 1.5));
        let mut driver = DriverBuilder::new(config, Unicycle::new(1.0)).build().unwrap();
        let mut rec = Recording::default();

        driver.tick(TICK_MS, &mut rec).unwrap();
        let first = driver.tick(TICK_MS, &mut rec).unwrap();
        assert!(matches!(first, TickOutcome::Stepped(s) if !s.collision));

        let second = driver.tick(TICK_MS, &mut rec).unwrap();
        assert!(matches!(
            second,
            TickOutcome::Stepped(s) if s.collision && s.reset == Some(ResetCause::Boundary)
        ));
        assert_eq!(driver.agent().speed(), Some(1.0));
        assert_eq!(driver.summary().collisions, 0);
    }

    #[test]
    fn inactive_obstacles_never_collide() {
        let mut config = fast_config(vec![array![0.0, 0.0, 0.0]]);
        config.obstacles = vec![Obstacle::inactive(DVec2::ZERO)];
        config.agent_effective_radius = 0.55;
        let mut driver = DriverBuilder::new(config, Unicycle::new(1.0)).build().unwrap();
        driver.tick(TICK_MS, &mut Recording::default()).unwrap();
        let outcome = driver.tick(TICK_MS, &mut Recording::default()).unwrap();
        assert!(matches!(outcome, TickOutcome::Stepped(s) if !s.collision && s.proximity.obstacle.is_none()));
        assert_eq!(driver.agent().speed(), Some(1.0));
    }

    #[test]
    fn speedless_models_are_flagged_but_not_halted() {
        let mut config = head_on(vec![array![0.0, 0.0, 0.0, 0.0]]);
        config.agent_effective_radius = 0.0;
        let mut driver = DriverBuilder::new(config, PlanarDoubleIntegrator)
            .controller(ConstantControl::new([1.0, 0.0]))
            .build()
            .unwrap();
        driver.tick(TICK_MS, &mut Recording::default()).unwrap();
        driver.tick(TICK_MS, &mut Recording::default()).unwrap();
        driver.tick(TICK_MS, &mut Recording::default()).unwrap();
        // Still accelerating through the obstacle: [1, 2, 0, 0].
        assert_eq!(*driver.agent().state(), array![1.0, 2.0, 0.0, 0.0]);
        assert_eq!(driver.summary().collisions, 1);
    }
}

// ── Tick atomicity ────────────────────────────────────────────────────────────

#[cfg(test)]
mod atomicity_tests {
    use ca_control::{ConstantControl, from_fn};
    use ca_dynamics::{DynamicsError, PlanarDoubleIntegrator, Unicycle};

    use super::*;
    use crate::{DriverBuilder, Phase, SimError};

    #[test]
    fn wrong_control_length_fails_without_mutation() {
        let mut driver = DriverBuilder::new(fast_config(vec![array![1.0, 0.0, 2.0, 0.0]]), PlanarDoubleIntegrator)
            .controller(ConstantControl::new([1.0]))
            .build()
            .unwrap();
        let mut rec = Recording::default();
        driver.tick(TICK_MS, &mut rec).unwrap();
        let clock = *driver.clock();

        let err = driver.tick(TICK_MS, &mut rec).unwrap_err();
        assert_eq!(
            err,
            SimError::Dynamics(DynamicsError::DimensionMismatch { what: "control", expected: 2, got: 1 })
        );
        assert_eq!(*driver.clock(), clock);
        assert_eq!(driver.phase(), Phase::Countdown);
        assert_eq!(*driver.agent().state(), array![1.0, 0.0, 2.0, 0.0]);
        assert!(rec.updates.is_empty());
    }

    #[test]
    fn controller_sees_pre_step_state_and_timing() {
        let mut seen = Vec::new();
        {
            let controller = from_fn(|ctx| {
                seen.push((ctx.state.to_vec(), ctx.dt, ctx.condition_secs));
                vec![0.0]
            });
            let mut driver = DriverBuilder::new(fast_config(vec![array![0.0, 0.0, 0.0]]), Unicycle::new(1.0))
                .controller(controller)
                .build()
                .unwrap();
            for _ in 0..3 {
                driver.tick(TICK_MS, &mut Recording::default()).unwrap();
            }
        }
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], (vec![0.0, 0.0, 0.0], 1.0, 1.0));
        assert_eq!(seen[1], (vec![1.0, 0.0, 0.0], 1.0, 2.0));
    }
}
