//! WebSocket session errors.

use thiserror::Error;

use super::validation::ValidationError;
use crate::traits::WsError;

/// A rejected or failed session operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Already connected. Disconnect first.")]
    AlreadyConnected,

    #[error("Connect before sending messages.")]
    NotConnected,

    #[error("No active connection.")]
    NoActiveConnection,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] WsError),
}

impl SessionError {
    /// Whether this is a lifecycle rejection rather than a fault.
    ///
    /// State errors are informational: the session is left untouched.
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            SessionError::AlreadyConnected
                | SessionError::NotConnected
                | SessionError::NoActiveConnection
        )
    }
}
