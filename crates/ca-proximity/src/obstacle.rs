//! Circular obstacles.

use ca_core::DVec2;

use crate::{ProximityError, ProximityResult};

/// A circle in simulation coordinates.
///
/// A NaN radius marks the obstacle as inactive: it stays in the list (so
/// indices remain stable) but never produces a collision.  `spin` is carried
/// for renderers and ignored by evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    center: DVec2,
    radius: f64,
    spin:   Option<f64>,
}

impl Obstacle {
    /// Returns `InvalidObstacle` for a negative radius.  NaN is accepted.
    pub fn new(center: DVec2, radius: f64) -> ProximityResult<Self> {
        if radius < 0.0 {
            return Err(ProximityError::InvalidObstacle { radius });
        }
        Ok(Self { center, radius, spin: None })
    }

    /// An obstacle that is present but switched off.
    pub fn inactive(center: DVec2) -> Self {
        Self { center, radius: f64::NAN, spin: None }
    }

    pub fn with_spin(mut self, spin: f64) -> Self {
        self.spin = Some(spin);
        self
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn spin(&self) -> Option<f64> {
        self.spin
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        !self.radius.is_nan()
    }
}
