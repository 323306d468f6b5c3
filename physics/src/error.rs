//! Errors raised while building or evaluating a rover model.
use rover_utils::LinalgError;
use thiserror::Error;

/// Failures of model construction, configuration loading and derivative evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoverError {
    /// inertia tensor has no inverse, so angular accelerations are undefined.
    #[error("inertia tensor cannot be inverted: {0}")]
    SingularInertia(#[source] LinalgError),
    /// attitude DCM has degenerated too far to rotate inertial forces into the body frame.
    #[error("attitude matrix cannot be inverted: {0}")]
    SingularAttitude(#[source] LinalgError),
    /// configuration thruster list does not match the model's command slots.
    #[error("expected {expected} thrusters, configuration lists {got}")]
    ThrusterCountMismatch {
        /// thruster count the model was built for.
        expected: usize,
        /// thrusters listed in the configuration.
        got: usize,
    },
    /// unreadable or malformed vehicle description.
    #[error("invalid vehicle configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for RoverError {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value.to_string())
    }
}

impl From<std::io::Error> for RoverError {
    fn from(value: std::io::Error) -> Self {
        Self::Config(value.to_string())
    }
}
