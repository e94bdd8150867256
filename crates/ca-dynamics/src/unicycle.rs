//! Unicycle / Dubins car: constant forward speed, steered by turn rate.

use std::f64::consts::{PI, TAU};

use ca_core::Pose;
use ndarray::{ArrayView1, array};

use crate::{ControlMatrix, Dims, Dynamics, StateVector};

/// Dubins car.
///
/// State `[x, y, θ]`, control `[ω]`, plus a forward `speed` that is a model
/// parameter rather than a state component.
///
/// ```text
///   f(x) = [s·cos θ, s·sin θ, 0]        B = [0; 0; 1]
/// ```
///
/// After each step θ is brought back toward `(−π, π]` by
/// [`wrap_heading_once`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unicycle {
    speed: f64,
}

impl Unicycle {
    #[inline]
    pub fn new(speed: f64) -> Self {
        Self { speed }
    }
}

impl Dynamics for Unicycle {
    fn dims(&self) -> Dims {
        Dims::new(3, 1)
    }

    fn drift(&self, state: ArrayView1<'_, f64>) -> StateVector {
        let theta = state[2];
        array![self.speed * theta.cos(), self.speed * theta.sin(), 0.0]
    }

    fn control_coefficient(&self, _state: ArrayView1<'_, f64>) -> ControlMatrix {
        array![[0.0], [0.0], [1.0]]
    }

    fn display_pose(&self, state: ArrayView1<'_, f64>) -> Pose {
        Pose::new(state[0], state[1], state[2])
    }

    fn normalize(&self, state: &mut StateVector) {
        state[2] = wrap_heading_once(state[2]);
    }

    fn speed(&self) -> Option<f64> {
        Some(self.speed)
    }

    fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }
}

/// Apply at most one ±2π correction toward `(−π, π]`.
///
/// Headings more than one turn out of range stay out of range.  Recorded
/// traces depend on this, so it is not a full normalisation.
#[inline]
pub fn wrap_heading_once(theta: f64) -> f64 {
    if theta > PI {
        theta - TAU
    } else if theta <= -PI {
        theta + TAU
    } else {
        theta
    }
}
