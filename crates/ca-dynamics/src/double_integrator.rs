//! Double-integrator point masses: acceleration in, position out.

use ca_core::Pose;
use ndarray::{ArrayView1, array};

use crate::{ControlMatrix, Dims, Dynamics, StateVector};

// ── PlanarDoubleIntegrator ────────────────────────────────────────────────────

/// Simplified quadrotor moving in the plane.
///
/// State `[x, vx, y, vy]`, control `[ax, ay]`.
///
/// ```text
///   f(x) = [vx, 0, vy, 0]        B = [0 0; 1 0; 0 0; 0 1]
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanarDoubleIntegrator;

impl Dynamics for PlanarDoubleIntegrator {
    fn dims(&self) -> Dims {
        Dims::new(4, 2)
    }

    fn drift(&self, state: ArrayView1<'_, f64>) -> StateVector {
        array![state[1], 0.0, state[3], 0.0]
    }

    fn control_coefficient(&self, _state: ArrayView1<'_, f64>) -> ControlMatrix {
        array![
            [0.0, 0.0],
            [1.0, 0.0],
            [0.0, 0.0],
            [0.0, 1.0]
        ]
    }

    fn display_pose(&self, state: ArrayView1<'_, f64>) -> Pose {
        Pose::new(state[0], state[2], 0.0)
    }
}

// ── VerticalDoubleIntegrator ──────────────────────────────────────────────────

/// Simplified quadrotor restricted to the vertical axis.
///
/// State `[y, vy]`, control `[ay]`.  Displayed on the `x = 0` line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerticalDoubleIntegrator;

impl Dynamics for VerticalDoubleIntegrator {
    fn dims(&self) -> Dims {
        Dims::new(2, 1)
    }

    fn drift(&self, state: ArrayView1<'_, f64>) -> StateVector {
        array![state[1], 0.0]
    }

    fn control_coefficient(&self, _state: ArrayView1<'_, f64>) -> ControlMatrix {
        array![[0.0], [1.0]]
    }

    fn display_pose(&self, state: ArrayView1<'_, f64>) -> Pose {
        Pose::new(0.0, state[0], 0.0)
    }
}
