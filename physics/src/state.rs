//! State/derivative pairs exchanged with the integrator.
use serde::{Deserialize, Serialize};

/// A quantity and its time derivative.
///
/// `value` belongs to the integrator driving the model; `derivative` is only written by
/// [`RoverModel::update`](crate::RoverModel::update).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IntegratedState<Q> {
    /// current value.
    pub value: Q,
    /// rate of change of `value` at the last evaluation.
    pub derivative: Q,
}

impl<Q: Default> IntegratedState<Q> {
    pub fn new(value: Q) -> Self {
        //! starts with a default (zero) derivative.
        Self {
            value,
            derivative: Q::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rover_utils::{Matrix3, Vector3};

    #[test]
    fn new_zeroes_derivative() {
        let s = IntegratedState::new(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(s.derivative, Vector3::zeros());
        let a = IntegratedState::new(Matrix3::<f32>::identity());
        assert_eq!(a.derivative, Matrix3::zeros());
    }
}
