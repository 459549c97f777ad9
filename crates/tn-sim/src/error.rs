//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while preparing or running a time integration.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The implicit step matrix (I - dt*As) is not invertible.
    #[error("Integration failed: {what}")]
    Integration { what: &'static str },

    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<tn_model::ModelError> for SimError {
    fn from(e: tn_model::ModelError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}
