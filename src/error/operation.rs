//! The uniform failure envelope for REST and GraphQL calls.

use thiserror::Error;

use super::phase::ErrorPhase;
use super::validation::ValidationError;
use crate::traits::HttpError;

/// A failed REST or GraphQL operation.
///
/// Mutually exclusive with [`RequestResult`](crate::models::RequestResult)
/// for any single call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct OperationError {
    /// Phase the operation failed in
    pub phase: ErrorPhase,
    /// Human-readable diagnostic
    pub message: String,
}

impl OperationError {
    pub fn new(phase: ErrorPhase, message: impl Into<String>) -> Self {
        Self {
            phase,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorPhase::Transport, message)
    }
}

impl From<ValidationError> for OperationError {
    fn from(err: ValidationError) -> Self {
        Self::new(err.phase(), err.to_string())
    }
}

impl From<HttpError> for OperationError {
    fn from(err: HttpError) -> Self {
        Self::transport(err.to_string())
    }
}
