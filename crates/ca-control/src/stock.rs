//! Ready-made controllers.

use crate::{ControlContext, Controller};

/// Always applies zero input of the right length.
///
/// The default when no controller is supplied; with a Unicycle this drives
/// straight ahead at the current speed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroControl;

impl Controller for ZeroControl {
    fn control(&mut self, ctx: &ControlContext<'_>) -> Vec<f64> {
        vec![0.0; ctx.dims.control]
    }
}

/// Applies the same input every step, whatever the state.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantControl {
    u: Vec<f64>,
}

impl ConstantControl {
    pub fn new(u: impl Into<Vec<f64>>) -> Self {
        Self { u: u.into() }
    }

    pub fn input(&self) -> &[f64] {
        &self.u
    }
}

impl Controller for ConstantControl {
    fn control(&mut self, _ctx: &ControlContext<'_>) -> Vec<f64> {
        self.u.clone()
    }
}
