//! Environmental constants the dynamics are evaluated under. Passed into the model at construction so the same vehicle
//! can be run against different water and gravity.
//!
//! The inertial frame is north-east-down: gravity pulls along +z, buoyancy pushes along -z.
use rover_utils::{Scalar, Vector3};
use serde::{Deserialize, Serialize};

/// standard gravitational acceleration, m/s^2.
pub const STANDARD_GRAVITY: f64 = 9.81;
/// density of seawater in the operating region, kg/m^3.
pub const SEAWATER_DENSITY: f64 = 1035.0;

/// Surrounding medium. Missing fields fall back to [`STANDARD_GRAVITY`] and [`SEAWATER_DENSITY`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Scalar + Deserialize<'de>"))]
pub struct Environment<T> {
    /// gravitational acceleration magnitude, m/s^2.
    pub gravity: T,
    /// density of the surrounding water, kg/m^3.
    pub water_density: T,
}

impl<T: Scalar> Default for Environment<T> {
    fn default() -> Self {
        Self {
            gravity: T::from_f64(STANDARD_GRAVITY),
            water_density: T::from_f64(SEAWATER_DENSITY),
        }
    }
}

impl<T: Scalar> Environment<T> {
    pub fn new(gravity: T, water_density: T) -> Self {
        //! e.g. `Environment::new(0.0, 1035.0)` to switch gravity off.
        Self {
            gravity,
            water_density,
        }
    }

    pub fn gravity_vector(&self) -> Vector3<T> {
        //! acceleration due to gravity, inertial frame.
        Vector3::new(T::ZERO, T::ZERO, self.gravity)
    }

    pub fn weight(&self, mass: T) -> Vector3<T> {
        //! gravitational force on `mass`, inertial frame.
        self.gravity_vector() * mass
    }

    pub fn buoyancy(&self, volume: T) -> Vector3<T> {
        //! g * rho * V, directed opposite gravity. Inertial frame.
        -self.gravity_vector() * (self.water_density * volume)
    }

    pub fn neutral_volume(&self, mass: T) -> T {
        //! displaced volume at which buoyancy exactly cancels the weight of `mass`.
        mass / self.water_density
    }
}
