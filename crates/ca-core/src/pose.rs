//! Display pose handed to the external renderer.
//!
//! Poses are in simulation coordinates.  Mapping to screen pixels is the
//! renderer's job; nothing in the core ever sees a screen coordinate.

use glam::DVec2;

/// Planar position plus heading (radians, counter-clockwise from +x).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub x:       f64,
    pub y:       f64,
    pub heading: f64,
}

impl Pose {
    #[inline]
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }

    /// The planar position as a vector, for distance queries.
    #[inline]
    pub fn position(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl std::fmt::Display for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}) @ {:.3} rad", self.x, self.y, self.heading)
    }
}
