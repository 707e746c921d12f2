//! Core error types for cfdrift.

use thiserror::Error;

/// Core error type for cfdrift operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Required configuration keys are absent from the environment.
    #[error("Missing configuration: {}", .0.join(", "))]
    MissingConfiguration(Vec<String>),

    /// A configuration value is present but unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The statistics store failed.
    #[error("Store error: {0}")]
    Store(String),

    /// A collaborator returned data of an unexpected shape.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
