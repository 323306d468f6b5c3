//! Rigid-body dynamics of an underwater rover. Evaluates the instantaneous time derivatives of the 6DOF state from the
//! current state and a thruster command vector; integrating them forward is the caller's job.
pub mod config;
pub mod environment;
pub mod error;
pub mod fluid;
pub mod rover;
pub mod state;
pub mod thrusters;

pub use config::{ThrusterConfig, VehicleConfig};
pub use environment::Environment;
pub use error::RoverError;
pub use fluid::{AddedMass, FluidModel, Motion, StillWater, Wrench};
pub use rover::{ForceSummary, Rover, RoverModel, VehicleParams, REFERENCE_THRUSTER_COUNT};
pub use state::IntegratedState;
pub use thrusters::{Thruster, ThrusterArray};
