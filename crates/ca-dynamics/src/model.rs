//! The `Dynamics` trait: the shared interface of every variant.

use std::fmt;

use ca_core::Pose;
use ndarray::{Array1, Array2, ArrayView1};

use crate::{DynamicsError, DynamicsResult};

/// Ordered state components.  Length always equals [`Dims::state`].
pub type StateVector = Array1<f64>;

/// Control-affine coefficient `B(x)`, shaped `state × control`: column `j`
/// is the rate contributed by one unit of control input `j`.
pub type ControlMatrix = Array2<f64>;

/// State and control dimensions of a variant.  Fixed per variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dims {
    pub state:   usize,
    pub control: usize,
}

impl Dims {
    #[inline]
    pub const fn new(state: usize, control: usize) -> Self {
        Self { state, control }
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.state, self.control)
    }
}

/// A discrete-time, control-affine state transition.
///
/// Implementors provide the drift `f(x)`, the coefficient `B(x)` and a
/// display pose; [`step`](Self::step) is shared and performs one explicit
/// forward-Euler update followed by [`normalize`](Self::normalize).
///
/// # Required methods
///
/// [`dims`](Self::dims), [`drift`](Self::drift),
/// [`control_coefficient`](Self::control_coefficient) and
/// [`display_pose`](Self::display_pose).  The speed hooks and
/// `normalize` default to no-ops.
///
/// # Example
///
/// ```rust
/// use ca_dynamics::{Dynamics, PlanarDoubleIntegrator};
/// use ndarray::array;
///
/// let model = PlanarDoubleIntegrator;
/// let next = model.step(array![0.0, 0.0, 0.0, 0.0].view(), &[1.0, 0.0], 1.0).unwrap();
/// assert_eq!(next, array![0.0, 1.0, 0.0, 0.0]);
/// ```
pub trait Dynamics: fmt::Debug + Send + Sync + 'static {
    /// `(state_dim, control_dim)` for this variant.
    fn dims(&self) -> Dims;

    /// Autonomous rate `f(x)`: the part of the update that does not depend on
    /// the control input.
    fn drift(&self, state: ArrayView1<'_, f64>) -> StateVector;

    /// Control-affine coefficient `B(x)`.
    fn control_coefficient(&self, state: ArrayView1<'_, f64>) -> ControlMatrix;

    /// Position and heading to hand to the renderer.
    fn display_pose(&self, state: ArrayView1<'_, f64>) -> Pose;

    /// Post-integration fix-up applied once per step (e.g. angle wrapping).
    fn normalize(&self, _state: &mut StateVector) {}

    /// Forward speed parameter for Unicycle-class variants.
    fn speed(&self) -> Option<f64> {
        None
    }

    /// Set the forward speed.  Variants without a speed parameter ignore it.
    fn set_speed(&mut self, _speed: f64) {}

    /// Validate a control vector against [`Dims::control`].
    fn check_control(&self, control: &[f64]) -> DynamicsResult<()> {
        let expected = self.dims().control;
        if control.len() != expected {
            return Err(DynamicsError::DimensionMismatch {
                what: "control",
                expected,
                got: control.len(),
            });
        }
        Ok(())
    }

    /// Full rate `f(x) + B(x)·u`.
    fn rate(&self, state: ArrayView1<'_, f64>, control: &[f64]) -> DynamicsResult<StateVector> {
        let dims = self.dims();
        if state.len() != dims.state {
            return Err(DynamicsError::DimensionMismatch {
                what:     "state",
                expected: dims.state,
                got:      state.len(),
            });
        }
        self.check_control(control)?;

        let mut rate = self.drift(state);
        if dims.control > 0 {
            let b = self.control_coefficient(state);
            rate += &b.dot(&ArrayView1::from(control));
        }
        Ok(rate)
    }

    /// One explicit forward-Euler step: `x + dt · (f(x) + B(x)·u)`.
    ///
    /// Returns a new vector; `state` is never touched, so a failed step
    /// leaves the caller's state exactly as it was.
    fn step(
        &self,
        state:   ArrayView1<'_, f64>,
        control: &[f64],
        dt:      f64,
    ) -> DynamicsResult<StateVector> {
        let rate = self.rate(state, control)?;
        let mut next = state.to_owned();
        next.scaled_add(dt, &rate);
        self.normalize(&mut next);
        Ok(next)
    }
}
