//! 6DOF rigid-body dynamics of the rover. [`RoverModel::update`] evaluates the time derivative of every state pair
//! from the current values and a thruster command vector; advancing the values is left to the caller's integrator.
//!
//! Frames: position and velocity are of the CG in the inertial (NED) frame. Angular velocity, inertia, thruster
//! geometry and the CB offset are in the body frame. `attitude` maps body vectors into the inertial frame.
//!
//! The derivative of the DCM is not re-orthonormalised here. Integrators must periodically restore it (see
//! [`Matrix3::orthonormalized`]) or the attitude drifts off SO(3).
use rover_utils::{Matrix3, Scalar, Vector3};
use tracing::{debug, trace, warn};

use crate::{
    environment::Environment,
    error::RoverError,
    fluid::{AddedMass, FluidModel, Motion, StillWater, Wrench},
    state::IntegratedState,
    thrusters::ThrusterArray,
};

/// thruster count of the reference vehicle.
pub const REFERENCE_THRUSTER_COUNT: usize = 5;

/// The reference double-precision rover.
pub type Rover = RoverModel<f64, REFERENCE_THRUSTER_COUNT>;

/// Physical description needed to build a [`RoverModel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleParams<T, const N: usize> {
    /// total mass, including any ballast or stored water.
    pub mass: T,
    /// dry displaced volume.
    pub volume: T,
    /// inertia tensor about the CG, body frame.
    pub inertia: Matrix3<T>,
    /// centre of buoyancy relative to CG, body frame.
    pub cb: Vector3<T>,
    /// thruster geometry, one entry per command slot.
    pub thrusters: ThrusterArray<T, N>,
    /// relative threshold below which the inertia tensor or attitude is refused as singular. Usually
    /// `T::SINGULARITY_EPSILON`; see [`Matrix3::is_singular`].
    pub singularity_epsilon: T,
}

/// Loads computed by the last successful [`RoverModel::update`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ForceSummary<T> {
    /// sum of thruster forces, body frame.
    pub thrust_force_body: Vector3<T>,
    /// sum of thruster moments about the CG, body frame.
    pub thrust_torque_body: Vector3<T>,
    /// buoyancy, inertial frame.
    pub buoyancy_force_inertial: Vector3<T>,
    /// moment of buoyancy acting at the CB, body frame.
    pub buoyancy_torque_body: Vector3<T>,
    /// weight of the dry mass, inertial frame.
    pub weight_inertial: Vector3<T>,
    /// loads reported by the fluid model.
    pub disturbance: Wrench<T>,
    /// added mass reported by the fluid model.
    pub added_mass: AddedMass<T>,
    /// everything acting on the CG, inertial frame.
    pub net_force_inertial: Vector3<T>,
    /// everything acting about the CG, body frame.
    pub net_torque_body: Vector3<T>,
}

/// Rigid-body state plus the physical parameters of one vehicle.
///
/// Not internally synchronised; give each integrator or vehicle its own instance.
#[derive(Debug, Clone)]
pub struct RoverModel<T, const N: usize, F = StillWater> {
    /// CG position, inertial frame.
    pub position: IntegratedState<Vector3<T>>,
    /// CG velocity, inertial frame.
    pub velocity: IntegratedState<Vector3<T>>,
    /// angular velocity, body frame.
    pub angvel: IntegratedState<Vector3<T>>,
    /// body -> inertial DCM.
    pub attitude: IntegratedState<Matrix3<T>>,

    mass: T,
    volume: T,
    moi: Matrix3<T>,
    moi_inv: Matrix3<T>, // always the inverse of moi; only written by invert_inertia().
    cb: Vector3<T>,
    thrusters: ThrusterArray<T, N>,
    singularity_epsilon: T,

    environment: Environment<T>,
    fluid: F,
    last_forces: ForceSummary<T>,
}

impl<T: Scalar, const N: usize> RoverModel<T, N, StillWater> {
    pub fn new(params: VehicleParams<T, N>, environment: Environment<T>) -> Result<Self, RoverError> {
        //! builds a model in still water, at rest at the origin with identity attitude.
        Self::with_fluid_model(params, environment, StillWater)
    }
}

impl<T: Scalar, const N: usize, F: FluidModel<T>> RoverModel<T, N, F> {
    pub fn with_fluid_model(
        params: VehicleParams<T, N>,
        environment: Environment<T>,
        fluid: F,
    ) -> Result<Self, RoverError> {
        //! builds a model whose unmodelled fluid effects come from `fluid`. Fails if the inertia tensor is singular.
        let moi_inv = invert_inertia(&params.inertia, params.singularity_epsilon)?;

        debug!(
            mass = %params.mass,
            volume = %params.volume,
            thrusters = N,
            gravity = %environment.gravity,
            water_density = %environment.water_density,
            "rover model constructed"
        );

        Ok(Self {
            position: IntegratedState::new(Vector3::zeros()),
            velocity: IntegratedState::new(Vector3::zeros()),
            angvel: IntegratedState::new(Vector3::zeros()),
            attitude: IntegratedState::new(Matrix3::identity()),
            mass: params.mass,
            volume: params.volume,
            moi: params.inertia,
            moi_inv,
            cb: params.cb,
            thrusters: params.thrusters,
            singularity_epsilon: params.singularity_epsilon,
            environment,
            fluid,
            last_forces: ForceSummary::default(),
        })
    }

    pub fn mass(&self) -> T {
        //! total mass [kg].
        self.mass
    }

    pub fn volume(&self) -> T {
        //! displaced volume [m^3].
        self.volume
    }

    pub fn moi(&self) -> &Matrix3<T> {
        //! inertia tensor about the CG, body frame.
        &self.moi
    }

    pub fn moi_inv(&self) -> &Matrix3<T> {
        //! inverse of [`moi`](Self::moi).
        &self.moi_inv
    }

    pub fn cb(&self) -> &Vector3<T> {
        //! centre of buoyancy relative to CG, body frame.
        &self.cb
    }

    pub fn thrusters(&self) -> &ThrusterArray<T, N> {
        //! thruster geometry, body frame.
        &self.thrusters
    }

    pub fn singularity_epsilon(&self) -> T {
        //! relative threshold used when inverting the inertia tensor and the attitude.
        self.singularity_epsilon
    }

    pub fn environment(&self) -> &Environment<T> {
        //! gravity and water density the model was built with.
        &self.environment
    }

    pub fn fluid_model(&self) -> &F {
        //! source of added mass and disturbance loads.
        &self.fluid
    }

    pub fn last_forces(&self) -> &ForceSummary<T> {
        //! loads from the most recent successful [`update`](Self::update); all zero before the first.
        &self.last_forces
    }

    pub fn set_mass(&mut self, mass: T) {
        //! e.g. after taking on or pumping out ballast water.
        debug!(old = %self.mass, new = %mass, "mass changed");
        self.mass = mass;
    }

    pub fn set_volume(&mut self, volume: T) {
        //! new displaced volume, e.g. from a variable-buoyancy bladder.
        debug!(old = %self.volume, new = %volume, "volume changed");
        self.volume = volume;
    }

    pub fn set_inertia(&mut self, inertia: Matrix3<T>) -> Result<(), RoverError> {
        //! replaces the inertia tensor and its inverse together. On failure neither is changed.
        self.moi_inv = invert_inertia(&inertia, self.singularity_epsilon)?;
        self.moi = inertia;
        Ok(())
    }

    pub fn motion(&self) -> Motion<T> {
        //! current velocity, angular velocity and attitude, as handed to the fluid model.
        Motion {
            velocity: self.velocity.value,
            angvel: self.angvel.value,
            attitude: self.attitude.value,
        }
    }

    pub fn added_mass(&self) -> AddedMass<T> {
        //! effective (dI, dm) due to motion through the water at the current state.
        self.fluid.added_mass(&self.motion())
    }

    pub fn update(&mut self, thrusts: &[T; N]) -> Result<(), RoverError> {
        //! Recomputes every `derivative` from the current `value`s and `thrusts`. Values and parameters are left
        //! untouched, so repeated calls with the same inputs give the same result.
        //!
        //! The net force includes the vehicle's weight alongside buoyancy, so with `volume == 0` a thruster alone
        //! gives `F / m` only under zero gravity.
        //!
        //! Fails only when the attitude matrix is singular while a buoyancy moment has to be resolved into the body
        //! frame (non-zero buoyancy and CB offset). In that case no derivative is written.
        let motion = self.motion();
        let added = self.fluid.added_mass(&motion);

        let thrust_force = self.thrusters.net_force(thrusts); // body
        let thrust_torque = self.thrusters.net_torque(thrusts); // body

        let buoyancy_force = self.environment.buoyancy(self.volume); // inertial
        let buoyancy_torque = if buoyancy_force == Vector3::zeros() || self.cb == Vector3::zeros() {
            Vector3::zeros()
        } else {
            let inertial_to_body = self
                .attitude
                .value
                .inverse_with_epsilon(self.singularity_epsilon)
                .map_err(RoverError::SingularAttitude)?;
            self.cb.cross(&(inertial_to_body * buoyancy_force)) // body
        };
        let weight = self.environment.weight(self.mass); // inertial
        let disturbance = self.fluid.disturbance(&motion);

        let net_torque_body = buoyancy_torque + thrust_torque + disturbance.torque_body;
        let net_force_inertial = buoyancy_force
            + weight
            + self.attitude.value * thrust_force
            + disturbance.force_inertial;

        // Equations of motion. Rotation uses the rigid-body inertia only; `added.inertia` is reported, not applied.
        let w = self.angvel.value;
        self.position.derivative = self.velocity.value;
        self.velocity.derivative = net_force_inertial / (self.mass + added.mass);
        self.angvel.derivative = self.moi_inv * (net_torque_body - w.cross(&(self.moi * w)));
        self.attitude.derivative = self.attitude.value * Matrix3::skew(&w);

        self.last_forces = ForceSummary {
            thrust_force_body: thrust_force,
            thrust_torque_body: thrust_torque,
            buoyancy_force_inertial: buoyancy_force,
            buoyancy_torque_body: buoyancy_torque,
            weight_inertial: weight,
            disturbance,
            added_mass: added,
            net_force_inertial,
            net_torque_body,
        };

        trace!(
            net_force = %net_force_inertial,
            net_torque = %net_torque_body,
            "derivatives updated"
        );
        Ok(())
    }
}

fn invert_inertia<T: Scalar>(inertia: &Matrix3<T>, epsilon: T) -> Result<Matrix3<T>, RoverError> {
    inertia.inverse_with_epsilon(epsilon).map_err(|e| {
        warn!(%inertia, error = %e, "rejected inertia tensor");
        RoverError::SingularInertia(e)
    })
}
