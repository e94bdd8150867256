//! Unit tests for ca-control.

#[cfg(test)]
mod helpers {
    use ca_core::ConditionId;
    use ca_dynamics::Dims;
    use ndarray::ArrayView1;

    use crate::ControlContext;

    pub fn ctx<'a>(state: &'a [f64], dims: Dims) -> ControlContext<'a> {
        ControlContext {
            sim_secs: 1.0,
            condition_secs: 0.5,
            condition: ConditionId(0),
            state: ArrayView1::from(state),
            dims,
            dt: 0.004,
        }
    }
}

#[cfg(test)]
mod stock {
    use ca_dynamics::Dims;

    use super::helpers::ctx;
    use crate::{ConstantControl, Controller, ZeroControl};

    #[test]
    fn zero_control_matches_control_dimension() {
        let state = [0.0; 4];
        assert_eq!(ZeroControl.control(&ctx(&state, Dims::new(4, 2))), vec![0.0, 0.0]);
        assert!(ZeroControl.control(&ctx(&state[..1], Dims::new(1, 0))).is_empty());
    }

    #[test]
    fn constant_control_ignores_state() {
        let mut c = ConstantControl::new([1.0, -1.0]);
        let a = c.control(&ctx(&[0.0, 0.0, 0.0, 0.0], Dims::new(4, 2)));
        let b = c.control(&ctx(&[9.0, 9.0, 9.0, 9.0], Dims::new(4, 2)));
        assert_eq!(a, b);
        assert_eq!(c.input(), &[1.0, -1.0]);
    }
}

#[cfg(test)]
mod closures {
    use approx::assert_relative_eq;
    use ca_dynamics::Dims;

    use super::helpers::ctx;
    use crate::{Controller, from_fn};

    #[test]
    fn closure_sees_the_state() {
        let mut steer = from_fn(|c| vec![-2.0 * c.state[1]]);
        let u = steer.control(&ctx(&[-8.0, 0.25, 0.0], Dims::new(3, 1)));
        assert_relative_eq!(u[0], -0.5);
    }

    #[test]
    fn closure_can_keep_history() {
        let mut calls = 0;
        {
            let mut counting = from_fn(|_| {
                calls += 1;
                vec![0.0]
            });
            for _ in 0..3 {
                counting.control(&ctx(&[0.0, 0.0, 0.0], Dims::new(3, 1)));
            }
        }
        assert_eq!(calls, 3);
    }

    #[test]
    fn boxed_controllers_are_controllers() {
        let mut boxed: Box<dyn Controller> = Box::new(from_fn(|_| vec![1.0]));
        assert_eq!(boxed.control(&ctx(&[0.0, 0.0], Dims::new(2, 1))), vec![1.0]);
    }
}
