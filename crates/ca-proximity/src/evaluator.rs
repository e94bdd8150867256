//! Signed proximity between the agent disc and obstacles.

use ca_core::{DVec2, ObstacleId};

use crate::{Obstacle, ProximityError, ProximityResult};

/// Value reported when there is nothing to collide with.
pub const NO_OBSTACLE: f64 = f64::INFINITY;

// ── Proximity ─────────────────────────────────────────────────────────────────

/// Result of checking one position against a set of obstacles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximity {
    /// Smallest proximity value over all active obstacles.
    pub value: f64,
    /// The obstacle that produced `value`; `None` when nothing is active.
    pub obstacle: Option<ObstacleId>,
}

impl Proximity {
    pub const CLEAR: Proximity = Proximity { value: NO_OBSTACLE, obstacle: None };
}

// ── ProximityEvaluator ────────────────────────────────────────────────────────

/// Stateless evaluator for a disc-shaped agent of fixed radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityEvaluator {
    agent_radius: f64,
    threshold:    f64,
}

impl ProximityEvaluator {
    pub fn new(agent_radius: f64) -> ProximityResult<Self> {
        if !agent_radius.is_finite() || agent_radius < 0.0 {
            return Err(ProximityError::InvalidAgentRadius { radius: agent_radius });
        }
        Ok(Self { agent_radius, threshold: 0.0 })
    }

    /// Values strictly below `threshold` count as collisions (default `0.0`).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[inline]
    pub fn agent_radius(&self) -> f64 {
        self.agent_radius
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// `|position − center| − (radius + agent_radius)`, or [`NO_OBSTACLE`]
    /// for an inactive obstacle.
    pub fn evaluate(&self, position: DVec2, obstacle: &Obstacle) -> f64 {
        if !obstacle.is_active() {
            return NO_OBSTACLE;
        }
        position.distance(obstacle.center()) - (obstacle.radius() + self.agent_radius)
    }

    /// The closest obstacle to `position`.
    pub fn nearest(&self, position: DVec2, obstacles: &[Obstacle]) -> Proximity {
        let mut best = Proximity::CLEAR;
        for (i, obstacle) in obstacles.iter().enumerate() {
            if !obstacle.is_active() {
                continue;
            }
            let value = self.evaluate(position, obstacle);
            if best.obstacle.is_none() || value < best.value {
                best = Proximity {
                    value,
                    obstacle: ObstacleId::try_from(i).ok(),
                };
            }
        }
        best
    }

    #[inline]
    pub fn is_collision(&self, value: f64) -> bool {
        value < self.threshold
    }
}
