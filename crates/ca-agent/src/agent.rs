//! The `Agent` type.

use ca_core::{DVec2, Pose};
use ca_dynamics::{ControlMatrix, Dims, Dynamics, DynamicsError, DynamicsResult, StateVector};

/// A robot: one state vector driven by one dynamics model.
///
/// The state length is checked at construction and on every reset, so it
/// always equals `dynamics.dims().state`.
#[derive(Debug, Clone)]
pub struct Agent<D: Dynamics> {
    dynamics: D,
    state:    StateVector,
    halted:   bool,
    /// Speed in force when `halt` was called, put back by the next reset.
    resume_speed: Option<f64>,
}

impl<D: Dynamics> Agent<D> {
    /// Create an agent at `initial_state`.
    ///
    /// Returns `DimensionMismatch` if the state length differs from the
    /// model's state dimension.
    pub fn new(dynamics: D, initial_state: impl Into<StateVector>) -> DynamicsResult<Self> {
        let state = initial_state.into();
        check_state_len(&dynamics, &state)?;
        Ok(Self { dynamics, state, halted: false, resume_speed: None })
    }

    #[inline]
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    #[inline]
    pub fn dynamics(&self) -> &D {
        &self.dynamics
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dynamics.dims()
    }

    /// Advance by `dt` seconds under `control`.
    ///
    /// Atomic: on error the state is left exactly as it was.
    pub fn step(&mut self, dt: f64, control: &[f64]) -> DynamicsResult<&StateVector> {
        let next = self.dynamics.step(self.state.view(), control, dt)?;
        self.state = next;
        Ok(&self.state)
    }

    /// Replace the state, e.g. with the next configured initial condition.
    ///
    /// Releases a halt: the speed recorded by [`halt`](Self::halt) is
    /// restored.  On a length mismatch nothing changes, the halt included.
    pub fn reset_to(&mut self, state: &StateVector) -> DynamicsResult<()> {
        check_state_len(&self.dynamics, state)?;
        self.state.assign(state);
        if let Some(speed) = self.resume_speed.take() {
            self.dynamics.set_speed(speed);
        }
        self.halted = false;
        Ok(())
    }

    /// Zero the forward speed until the next reset.  No effect on variants
    /// without a speed parameter beyond setting the flag.
    ///
    /// Halting twice keeps the speed from before the first halt.
    pub fn halt(&mut self) {
        if !self.halted {
            self.resume_speed = self.dynamics.speed();
        }
        self.dynamics.set_speed(0.0);
        self.halted = true;
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    #[inline]
    pub fn speed(&self) -> Option<f64> {
        self.dynamics.speed()
    }

    #[inline]
    pub fn set_speed(&mut self, speed: f64) {
        self.dynamics.set_speed(speed);
    }

    /// Pose for the external renderer.
    #[inline]
    pub fn display_pose(&self) -> Pose {
        self.dynamics.display_pose(self.state.view())
    }

    /// Planar position used for proximity checks.
    #[inline]
    pub fn position(&self) -> DVec2 {
        self.display_pose().position()
    }

    /// Drift `f(x)` at the current state.
    pub fn drift(&self) -> StateVector {
        self.dynamics.drift(self.state.view())
    }

    /// `B(x)` at the current state, for safety collaborators.
    pub fn control_coefficient(&self) -> ControlMatrix {
        self.dynamics.control_coefficient(self.state.view())
    }
}

fn check_state_len<D: Dynamics>(dynamics: &D, state: &StateVector) -> DynamicsResult<()> {
    let expected = dynamics.dims().state;
    if state.len() != expected {
        return Err(DynamicsError::DimensionMismatch {
            what: "state",
            expected,
            got: state.len(),
        });
    }
    Ok(())
}
