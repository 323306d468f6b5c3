//! This file is responsible for the time-step simulation driving the rover dynamics forward.
//! The dynamics only provide derivatives; stepping them, and keeping the attitude orthonormal, happens here.
use rover_physics::{FluidModel, RoverError, RoverModel};
use rover_utils::{LinalgError, Matrix3};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("time step must be positive and finite, got {0}")]
    BadTimeStep(f64),
    #[error("print and renormalisation intervals must be non-zero")]
    BadInterval,
    #[error(transparent)]
    Dynamics(#[from] RoverError),
    #[error("attitude collapsed while renormalising: {0}")]
    Attitude(#[from] LinalgError),
}

/// Fixed-step loop parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// step length [s].
    pub dt: f64,
    pub steps: usize,
    /// re-orthonormalise the DCM every this many steps.
    pub renormalise_every: usize,
    /// log the state every this many steps.
    pub print_every: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dt: 0.01,
            steps: 1000,
            renormalise_every: 10,
            print_every: 100,
        }
    }
}

pub fn step<const N: usize, F: FluidModel<f64>>(
    rover: &mut RoverModel<f64, N, F>,
    thrusts: &[f64; N],
    dt: f64,
) -> Result<(), RoverError> {
    //! one semi-implicit Euler step: rates are advanced first and the new velocity carries the position.
    rover.update(thrusts)?;

    rover.velocity.value += rover.velocity.derivative * dt;
    rover.angvel.value += rover.angvel.derivative * dt;
    rover.position.value += rover.velocity.value * dt;
    rover.attitude.value += rover.attitude.derivative * dt;
    Ok(())
}

pub fn orthonormality_error(attitude: &Matrix3<f64>) -> f64 {
    //! largest entry of |R R^T - I|. Zero for a proper rotation.
    let residual = *attitude * attitude.transpose() - Matrix3::identity();
    residual
        .rows
        .iter()
        .flat_map(|r| r.to_array())
        .fold(0.0, |worst: f64, e| worst.max(e.abs()))
}

pub fn simulate<const N: usize, F: FluidModel<f64>>(
    rover: &mut RoverModel<f64, N, F>,
    thrusts: &[f64; N],
    settings: &Settings,
) -> Result<(), SimulationError> {
    if !(settings.dt.is_finite() && settings.dt > 0.0) {
        return Err(SimulationError::BadTimeStep(settings.dt));
    }
    if settings.renormalise_every == 0 || settings.print_every == 0 {
        return Err(SimulationError::BadInterval);
    }

    for n in 0..settings.steps {
        if n % settings.print_every == 0 {
            // print data for current step.
            info!(
                t = n as f64 * settings.dt,
                position = %rover.position.value,
                velocity = %rover.velocity.value,
                angvel = %rover.angvel.value,
                "state"
            );
        }

        step(rover, thrusts, settings.dt)?;

        if (n + 1) % settings.renormalise_every == 0 {
            let drift = orthonormality_error(&rover.attitude.value);
            rover.attitude.value = rover.attitude.value.orthonormalized()?;
            debug!(step = n + 1, drift, "attitude renormalised");
        }
    }

    info!(
        t = settings.steps as f64 * settings.dt,
        position = %rover.position.value,
        velocity = %rover.velocity.value,
        attitude = %rover.attitude.value,
        "final state"
    );
    Ok(())
}
