//! The no-op variant.

use ca_core::Pose;
use ndarray::{Array1, Array2, ArrayView1};

use crate::{ControlMatrix, Dims, Dynamics, DynamicsResult, StateVector};

/// Zero drift, no control inputs.  The state never changes.
///
/// Used as a placeholder agent (the renderer still gets a pose) and as the
/// default when no other variant is chosen.  Any control vector is accepted
/// and ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trivial {
    state_dim: usize,
}

impl Trivial {
    /// A trivial model over `state_dim` components.
    pub fn new(state_dim: usize) -> Self {
        Self { state_dim }
    }
}

impl Default for Trivial {
    /// Single-component state.
    fn default() -> Self {
        Self::new(1)
    }
}

impl Dynamics for Trivial {
    fn dims(&self) -> Dims {
        Dims::new(self.state_dim, 0)
    }

    fn drift(&self, _state: ArrayView1<'_, f64>) -> StateVector {
        Array1::zeros(self.state_dim)
    }

    fn control_coefficient(&self, _state: ArrayView1<'_, f64>) -> ControlMatrix {
        Array2::zeros((self.state_dim, 0))
    }

    /// Components 0, 1 and 2 read as `x`, `y` and heading; missing ones are 0.
    fn display_pose(&self, state: ArrayView1<'_, f64>) -> Pose {
        let at = |i: usize| state.get(i).copied().unwrap_or(0.0);
        Pose::new(at(0), at(1), at(2))
    }

    fn check_control(&self, _control: &[f64]) -> DynamicsResult<()> {
        Ok(())
    }
}
