//! Minimal fixed-size linear algebra for the rover dynamics. Pulling a general-purpose linear algebra crate onto the
//! embedded target isn't practical, so this covers exactly what the dynamics need: 3-vectors and 3x3 matrices,
//! generic over the float type, plain `Copy` values with no heap allocation.
mod error;
mod matrix3;
mod scalar;
mod vector3;

pub use error::LinalgError;
pub use matrix3::Matrix3;
pub use scalar::Scalar;
pub use vector3::Vector3;
