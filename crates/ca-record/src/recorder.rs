//! `SessionRecorder`: bridges `DriverObserver` to a `SessionRecord`.

use ca_sim::{DriverObserver, Intervention, ResetEvent, SessionSummary, StateUpdate};

use crate::{InterventionRecord, ResetRecord, SessionRecord};

/// A [`DriverObserver`] that appends every notification to an in-memory
/// [`SessionRecord`].
///
/// State updates can be thinned with [`with_sample_every`](Self::with_sample_every);
/// resets, interventions and completion are always kept.
pub struct SessionRecorder {
    record:       SessionRecord,
    sample_every: usize,
    seen:         usize,
}

impl SessionRecorder {
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            record:       SessionRecord::new(system),
            sample_every: 1,
            seen:         0,
        }
    }

    /// Keep one state update out of every `n`.  `0` is treated as `1`.
    pub fn with_sample_every(mut self, n: usize) -> Self {
        self.sample_every = n.max(1);
        self
    }

    #[inline]
    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    /// Unwrap the record once the session is over.
    pub fn into_record(self) -> SessionRecord {
        self.record
    }
}

impl DriverObserver for SessionRecorder {
    fn on_state_updated(&mut self, update: &StateUpdate<'_>) {
        let keep = self.seen % self.sample_every == 0;
        self.seen += 1;
        if !keep {
            return;
        }
        self.record.time_trace.push(update.sim_secs);
        self.record.condition_trace.push(update.condition.0);
        self.record.agent_trace.push(update.state.to_vec());
        self.record.collision_trace.push(update.collision);
    }

    fn on_reset(&mut self, event: &ResetEvent<'_>) {
        self.record.resets.push(ResetRecord {
            cause:    event.cause,
            wall_ms:  event.wall_ms,
            sim_secs: event.sim_secs,
            from:     event.from.0,
            to:       event.to.0,
            state:    event.state.to_vec(),
        });
    }

    fn on_intervention(&mut self, event: &Intervention<'_>) {
        self.record.interventions.push(InterventionRecord {
            wall_ms:   event.wall_ms,
            sim_secs:  event.sim_secs,
            condition: event.condition.0,
            state:     event.state.to_vec(),
        });
    }

    fn on_session_complete(&mut self, summary: &SessionSummary) {
        self.record.summary = Some(*summary);
    }
}
