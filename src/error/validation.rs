//! Input validation errors.

use thiserror::Error;

use super::phase::ErrorPhase;
use crate::headers::HeaderParseError;

/// Malformed user input.
///
/// Always detected before any network activity and never mutates session
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please provide a request URL.")]
    MissingRequestUrl,

    #[error("Please provide an endpoint URL.")]
    MissingEndpointUrl,

    #[error("Please provide a WebSocket URL.")]
    MissingSocketUrl,

    #[error("GraphQL query is required.")]
    MissingQuery,

    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error(transparent)]
    InvalidHeader(#[from] HeaderParseError),

    /// GraphQL variables text is not valid JSON; carries the parser diagnostic.
    #[error("Variables must be valid JSON: {0}")]
    InvalidVariables(String),

    #[error("Message is empty.")]
    EmptyMessage,
}

impl ValidationError {
    /// The phase this error is reported under.
    ///
    /// Bad variables are a decode failure; everything else is validation.
    pub fn phase(&self) -> ErrorPhase {
        match self {
            ValidationError::InvalidVariables(_) => ErrorPhase::Decode,
            _ => ErrorPhase::Validation,
        }
    }
}
