//! Vehicle description as loaded from disk. Produces a ready-to-run [`RoverModel`].
use std::path::Path;

use rover_utils::{Matrix3, Scalar, Vector3};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    environment::Environment,
    error::RoverError,
    rover::{RoverModel, VehicleParams},
    thrusters::{Thruster, ThrusterArray},
};

/// One thruster mount as written in a vehicle description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThrusterConfig {
    /// mount point relative to CG [m], body frame.
    pub position: [f64; 3],
    /// unit thrust direction, body frame.
    pub direction: [f64; 3],
}

impl ThrusterConfig {
    fn to_thruster(self) -> Thruster<f64> {
        Thruster::new(
            Vector3::from_array(self.position),
            Vector3::from_array(self.direction),
        )
    }
}

/// Physical vehicle configuration, all in SI units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleConfig {
    /// surrounding water and gravity; standard seawater when omitted.
    #[serde(default)]
    pub environment: Environment<f64>,
    /// total mass [kg].
    pub mass: f64,
    /// dry displaced volume [m^3].
    pub volume: f64,
    /// body-frame inertia tensor about the CG [kg m^2], row-major.
    pub inertia: [[f64; 3]; 3],
    /// centre of buoyancy relative to CG [m], body frame.
    #[serde(default)]
    pub cb: [f64; 3],
    /// thruster mounts in command-slot order.
    pub thrusters: Vec<ThrusterConfig>,
    /// relative threshold for refusing a near-singular inertia tensor or attitude.
    #[serde(default = "default_singularity_epsilon")]
    pub singularity_epsilon: f64,
}

fn default_singularity_epsilon() -> f64 {
    f64::SINGULARITY_EPSILON
}

impl VehicleConfig {
    pub fn reference() -> Self {
        //! the five-thruster reference rover: twin aft surge thrusters, fore/aft heave, one sway. Slightly
        //! positively buoyant with the CB above the CG.
        let thruster = |position, direction| ThrusterConfig {
            position,
            direction,
        };
        Self {
            environment: Environment::default(),
            mass: 12.0,
            volume: 0.0118,
            inertia: [[0.25, 0.0, 0.0], [0.0, 0.45, 0.0], [0.0, 0.0, 0.40]],
            cb: [0.0, 0.0, -0.02],
            thrusters: vec![
                thruster([-0.30, -0.15, 0.0], [1.0, 0.0, 0.0]),
                thruster([-0.30, 0.15, 0.0], [1.0, 0.0, 0.0]),
                thruster([0.20, 0.0, 0.0], [0.0, 0.0, 1.0]),
                thruster([-0.20, 0.0, 0.0], [0.0, 0.0, 1.0]),
                thruster([0.0, 0.0, 0.05], [0.0, 1.0, 0.0]),
            ],
            singularity_epsilon: default_singularity_epsilon(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, RoverError> {
        //! parses a JSON vehicle description. Unknown fields are rejected.
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RoverError> {
        //! reads and parses the JSON file at `path`.
        let path = path.as_ref();
        let config = Self::from_json_str(&std::fs::read_to_string(path)?)?;
        info!(path = %path.display(), thrusters = config.thrusters.len(), "loaded vehicle config");
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, RoverError> {
        //! pretty-printed JSON, readable back by [`from_json_str`](Self::from_json_str).
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn params<const N: usize>(&self) -> Result<VehicleParams<f64, N>, RoverError> {
        //! typed parameters for an `N`-thruster model; the thruster list must have exactly `N` entries.
        let thrusters: [Thruster<f64>; N] = self
            .thrusters
            .iter()
            .copied()
            .map(ThrusterConfig::to_thruster)
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|_| RoverError::ThrusterCountMismatch {
                expected: N,
                got: self.thrusters.len(),
            })?;

        Ok(VehicleParams {
            mass: self.mass,
            volume: self.volume,
            inertia: Matrix3::from_array(self.inertia),
            cb: Vector3::from_array(self.cb),
            thrusters: ThrusterArray::new(thrusters),
            singularity_epsilon: self.singularity_epsilon,
        })
    }

    pub fn build<const N: usize>(&self) -> Result<RoverModel<f64, N>, RoverError> {
        //! a still-water model at rest, ready for [`RoverModel::update`].
        debug!(expected = N, "building rover model from config");
        RoverModel::new(self.params()?, self.environment)
    }
}
