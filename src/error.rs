//! Simulation error types.
//!
//! Every failure is detected before or during strategy execution and is
//! returned whole; a failed run never yields a partial timeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationError;

/// Result alias for simulation operations.
pub type Result<T> = std::result::Result<T, SimulationError>;

/// Errors returned by the simulation engine.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "error_type", content = "details")]
#[non_exhaustive]
pub enum SimulationError {
    /// Malformed processes or options. Carries every detected problem.
    #[error("Invalid input: {}", join_messages(.errors))]
    InvalidInput {
        /// All validation failures, in detection order.
        errors: Vec<ValidationError>,
    },

    /// The algorithm identifier is not one of the supported policies.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// No processes were supplied.
    #[error("Empty input: at least one process is required")]
    EmptyInput,
}

impl SimulationError {
    /// Creates an invalid input error from collected validation failures.
    pub fn invalid_input(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput { errors }
    }

    /// Creates an unsupported algorithm error.
    pub fn unsupported_algorithm(name: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm(name.into())
    }

    /// Validation failures carried by this error (empty for other kinds).
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidInput { errors } => errors,
            _ => &[],
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
