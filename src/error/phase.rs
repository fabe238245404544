//! Error phase classification.
//!
//! Every failed operation is tagged with the phase it failed in, so the UI
//! can tell malformed input apart from network trouble.

use std::fmt;

/// The phase an operation failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorPhase {
    /// Malformed user input, detected before any network activity.
    Validation,

    /// DNS, connect, TLS, timeout or protocol failure.
    Transport,

    /// User-supplied structured data (GraphQL variables) failed to decode.
    Decode,
}

impl ErrorPhase {
    /// Short label suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorPhase::Validation => "validation",
            ErrorPhase::Transport => "transport",
            ErrorPhase::Decode => "decode",
        }
    }
}

impl fmt::Display for ErrorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
