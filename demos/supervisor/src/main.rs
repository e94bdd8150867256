//! supervisor: headless replay of the obstacle-avoidance supervision session.
//!
//! A unicycle drives along +x from 42 lateral offsets towards a round
//! obstacle at the origin and never steers.  A simulated supervisor watches
//! each run and, for some runs, "flinches" once the car gets closer to the
//! obstacle than a personal margin.  Every flinch resets the car to the next
//! offset, just like crossing the finish line or running out of time.
//!
//! Frames arrive every ~16 ms of wall time with jitter; both the jitter and
//! the supervisor are seeded, so a given seed always replays the same session.
//!
//! Usage: `supervisor [OUTPUT_JSON]` (default `output/supervisor/session.json`).
//! Set `RUST_LOG=info` to follow resets as they happen.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Result, bail};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use ca_core::ConditionId;
use ca_dynamics::{StateVector, Unicycle};
use ca_record::SessionRecorder;
use ca_sim::{
    DriverBuilder, DriverConfig, DriverObserver, Intervention, ResetCause, ResetEvent,
    SessionSummary, StateUpdate, TickOutcome,
};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:               u64   = 42;
const FRAME_MS:           f64   = 16.0;
const FRAME_JITTER_MS:    f64   = 4.0;
const MAX_FRAMES:         usize = 100_000;
/// Chance that the supervisor reacts at all during a given run.
const FLINCH_PROBABILITY: f64   = 0.5;
/// Record one state sample out of this many.
const SAMPLE_EVERY:       usize = 5;

/// Lateral start offsets, in presentation order.
const LATERAL_OFFSETS: [f64; 42] = [
    -2.0, 1.75, 0.25, 0.50, 0.0, 1.50, -0.75, -1.75, 1.75, 1.25, -1.25,
    0.75, 0.75, -2.25, 2.25, -1.50, -1.75, -0.25, -0.50, 0.0, 2.0, -1.0, 0.0, -2.0, 0.0,
    1.25, 1.0, -0.75, 0.25, -1.50, 0.50, 0.0, -1.25, -1.0, 1.50, 1.0, -0.50, 0.0, 2.0, -2.25,
    -0.25, 2.25,
];

// ── Supervisor ────────────────────────────────────────────────────────────────

/// Decides, per run, whether and how early to flinch.
struct Supervisor {
    rng:    SmallRng,
    margin: Option<f64>,
}

impl Supervisor {
    fn new(seed: u64) -> Self {
        let mut supervisor = Self { rng: SmallRng::seed_from_u64(seed), margin: None };
        supervisor.next_run();
        supervisor
    }

    fn next_run(&mut self) {
        self.margin = if self.rng.gen_bool(FLINCH_PROBABILITY) {
            Some(self.rng.gen_range(0.0..2.0))
        } else {
            None
        };
    }

    fn flinches_at(&self, proximity: f64) -> bool {
        self.margin.is_some_and(|m| proximity < m)
    }
}

// ── Observer wrapper to tally events ──────────────────────────────────────────

struct TallyObserver {
    inner:      SessionRecorder,
    boundary:   usize,
    horizon:    usize,
    flinches:   usize,
    collisions: usize,
    summary:    Option<SessionSummary>,
}

impl TallyObserver {
    fn new(inner: SessionRecorder) -> Self {
        Self { inner, boundary: 0, horizon: 0, flinches: 0, collisions: 0, summary: None }
    }
}

impl DriverObserver for TallyObserver {
    fn on_state_updated(&mut self, update: &StateUpdate<'_>) {
        if update.collision {
            self.collisions += 1;
        }
        self.inner.on_state_updated(update);
    }

    fn on_reset(&mut self, event: &ResetEvent<'_>) {
        match event.cause {
            ResetCause::Boundary => self.boundary += 1,
            ResetCause::Horizon => self.horizon += 1,
            ResetCause::Intervention => self.flinches += 1,
        }
        self.inner.on_reset(event);
    }

    fn on_intervention(&mut self, event: &Intervention<'_>) {
        self.inner.on_intervention(event);
    }

    fn on_session_complete(&mut self, summary: &SessionSummary) {
        self.summary = Some(*summary);
        self.inner.on_session_complete(summary);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let output: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output/supervisor/session.json"));

    println!("=== supervisor — obstacle-avoidance session replay ===");
    println!("Runs: {}  |  Seed: {SEED}", LATERAL_OFFSETS.len());
    println!();

    // 1. Reference session: start at x = -8, heading +x, speed 3.
    let initial_conditions: Vec<StateVector> = LATERAL_OFFSETS
        .iter()
        .map(|&y| ndarray::array![DriverConfig::REFERENCE_START_X, y, 0.0])
        .collect();
    let config = DriverConfig::reference(initial_conditions);
    println!(
        "Obstacle r = {}, car r = {}, horizon {:.3} s, warm-up {} ms",
        DriverConfig::REFERENCE_OBSTACLE_RADIUS,
        config.agent_effective_radius,
        config.horizon.unwrap_or(f64::INFINITY),
        config.warmup_ms,
    );

    // 2. Driver with the default zero controller: the car never steers.
    let mut driver = DriverBuilder::new(config, Unicycle::new(DriverConfig::REFERENCE_SPEED)).build()?;
    let mut observer =
        TallyObserver::new(SessionRecorder::new("dubins").with_sample_every(SAMPLE_EVERY));

    // 3. Run.
    let mut frames_rng = SmallRng::seed_from_u64(SEED);
    let mut supervisor = Supervisor::new(SEED.wrapping_add(1));
    let mut run = ConditionId(0);
    let mut frames = 0usize;

    let t0 = Instant::now();
    while !driver.is_complete() && frames < MAX_FRAMES {
        frames += 1;
        let wall_ms = FRAME_MS + frames_rng.gen_range(-FRAME_JITTER_MS..FRAME_JITTER_MS);
        let outcome = driver.tick(wall_ms, &mut observer)?;

        let mid_run = matches!(outcome, TickOutcome::Stepped(step) if step.reset.is_none());
        if mid_run && supervisor.flinches_at(driver.last_proximity().value) {
            driver.intervene(&mut observer)?;
        }
        if driver.condition_index() != run {
            run = driver.condition_index();
            supervisor.next_run();
        }
    }
    let elapsed = t0.elapsed();

    let Some(summary) = observer.summary else {
        bail!("session did not complete within {MAX_FRAMES} frames");
    };

    // 4. Summary.
    println!("Replayed {frames} frames in {:.3} s", elapsed.as_secs_f64());
    println!(
        "  wall {:.1} s, simulated {:.2} s",
        summary.wall_ms / 1000.0,
        summary.sim_secs
    );
    println!();
    println!("{:<14} {:>6}", "Reset cause", "Count");
    println!("{}", "-".repeat(21));
    println!("{:<14} {:>6}", "finish line", observer.boundary);
    println!("{:<14} {:>6}", "time out", observer.horizon);
    println!("{:<14} {:>6}", "flinch", observer.flinches);
    println!("{}", "-".repeat(21));
    println!("{:<14} {:>6}", "total", summary.resets);
    println!();
    println!(
        "Collisions: {} runs ({} colliding frames)",
        summary.collisions, observer.collisions
    );

    // 5. Record.
    let record = observer.inner.into_record();
    if let Some(dir) = output.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&output, serde_json::to_string_pretty(&record)?)?;
    println!(
        "Wrote {} samples, {} flinches to {}",
        record.len(),
        record.interventions.len(),
        output.display()
    );

    Ok(())
}
