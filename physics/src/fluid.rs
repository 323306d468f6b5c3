//! Extension point for the fluid effects the rigid-body equations don't model themselves: added mass and
//! hydrodynamic disturbances (drag, currents). [`StillWater`] is the default and contributes nothing.
use rover_utils::{Matrix3, Scalar, Vector3};

/// Motion of the vehicle as seen by a fluid model when the derivatives are evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion<T> {
    /// CG velocity, inertial frame.
    pub velocity: Vector3<T>,
    /// angular velocity, body frame.
    pub angvel: Vector3<T>,
    /// body -> inertial DCM.
    pub attitude: Matrix3<T>,
}

/// Apparent extra inertia from fluid accelerated along with the hull.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AddedMass<T> {
    /// added rotational inertia, body frame.
    pub inertia: Matrix3<T>,
    /// added translational mass.
    pub mass: T,
}

impl<T: Scalar> AddedMass<T> {
    pub fn none() -> Self {
        //! no added mass or inertia.
        Self {
            inertia: Matrix3::zeros(),
            mass: T::ZERO,
        }
    }
}

/// External force and torque pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Wrench<T> {
    /// force, inertial frame.
    pub force_inertial: Vector3<T>,
    /// torque about the CG, body frame.
    pub torque_body: Vector3<T>,
}

impl<T: Scalar> Wrench<T> {
    pub fn zero() -> Self {
        //! no force and no torque.
        Self {
            force_inertial: Vector3::zeros(),
            torque_body: Vector3::zeros(),
        }
    }
}

/// Fluid effects queried once per derivative evaluation. Implementations must be pure functions of `motion`; the
/// dynamics rely on repeated evaluation with the same state giving the same answer.
pub trait FluidModel<T: Scalar> {
    /// (dI, dm) correction from added mass.
    fn added_mass(&self, motion: &Motion<T>) -> AddedMass<T> {
        let _ = motion;
        AddedMass::none()
    }

    /// drag, current and other disturbance loads.
    fn disturbance(&self, motion: &Motion<T>) -> Wrench<T> {
        let _ = motion;
        Wrench::zero()
    }
}

/// Inviscid, motionless water with no added mass. Drag and currents are left unmodeled, so results are only
/// trustworthy at low speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StillWater;

impl<T: Scalar> FluidModel<T> for StillWater {}
