use std::time::Duration;

use crate::error::OperationError;
use crate::headers::HeaderSet;

/// A completed HTTP exchange.
///
/// Only produced when the transport delivered a full response; never
/// partially populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestResult {
    pub status: u16,
    /// Reason phrase for the status code; empty when there is none
    pub reason: String,
    /// Time from issuing the request until the body was read
    pub elapsed: Duration,
    pub headers: HeaderSet,
    pub body: String,
}

impl RequestResult {
    /// Elapsed time in fractional milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Exactly one of a result or an error, per call.
pub type Outcome = Result<RequestResult, OperationError>;
