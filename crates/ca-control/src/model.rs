//! The `Controller` trait: the main extension point for user code.

use crate::ControlContext;

/// Produces the control input for one step.
///
/// Takes `&mut self` so controllers can keep their own history (filters,
/// integrators, recorded inputs).  The driver is single-threaded, so no
/// `Send`/`Sync` bound is imposed.
///
/// # Example
///
/// ```rust
/// use ca_control::{ControlContext, Controller};
///
/// /// Steer back towards the lateral centre line.
/// struct CenterLine { gain: f64 }
///
/// impl Controller for CenterLine {
///     fn control(&mut self, ctx: &ControlContext<'_>) -> Vec<f64> {
///         vec![-self.gain * ctx.state[1]]
///     }
/// }
/// ```
pub trait Controller {
    /// Return `u` with `ctx.dims.control` components.
    fn control(&mut self, ctx: &ControlContext<'_>) -> Vec<f64>;
}

impl<C: Controller + ?Sized> Controller for Box<C> {
    fn control(&mut self, ctx: &ControlContext<'_>) -> Vec<f64> {
        (**self).control(ctx)
    }
}

/// Adapter turning a closure into a [`Controller`].  Build with [`from_fn`].
pub struct FnController<F>(F);

impl<F> Controller for FnController<F>
where
    F: FnMut(&ControlContext<'_>) -> Vec<f64>,
{
    fn control(&mut self, ctx: &ControlContext<'_>) -> Vec<f64> {
        (self.0)(ctx)
    }
}

/// Wrap a closure as a controller.
///
/// ```rust
/// use ca_control::Controller;
///
/// let mut turn_left = ca_control::from_fn(|ctx| vec![0.5; ctx.dims.control]);
/// # let _ = &mut turn_left as &mut dyn Controller;
/// ```
pub fn from_fn<F>(f: F) -> FnController<F>
where
    F: FnMut(&ControlContext<'_>) -> Vec<f64>,
{
    FnController(f)
}
