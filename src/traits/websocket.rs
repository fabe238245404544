//! WebSocket connection trait abstraction.
//!
//! Provides a trait-based abstraction for WebSocket operations, enabling
//! dependency injection and mocking in tests. A connection is handed out as
//! two independent halves so one task can wait on inbound frames while it
//! still takes writes.

use async_trait::async_trait;

use crate::headers::HeaderSet;

/// Close code reported when a close frame carried no status.
pub const CLOSE_NO_STATUS: u16 = 1005;

/// Close code reported when the stream ended without any close frame.
pub const CLOSE_ABNORMAL: u16 = 1006;

/// An inbound WebSocket frame, reduced to what the session cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WsFrame {
    Text(String),
    Binary(Vec<u8>),
    /// The peer started (or answered) a close handshake
    Close { code: u16, reason: String },
}

/// WebSocket connection errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WsError {
    /// URL could not be turned into a handshake request
    InvalidUrl(String),
    /// Header name or value rejected by the handshake builder
    InvalidHeader(String),
    /// Connection or handshake failed
    ConnectionFailed(String),
    /// Handshake did not finish in time
    Timeout(String),
    /// Failed to send message
    SendFailed(String),
    /// Failed to close cleanly
    CloseFailed(String),
    /// Failed to read from the connection
    ReceiveFailed(String),
    /// Disconnected from server
    Disconnected,
}

impl std::fmt::Display for WsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WsError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            WsError::InvalidHeader(msg) => write!(f, "Invalid header: {}", msg),
            WsError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            WsError::Timeout(msg) => write!(f, "Connection timeout: {}", msg),
            WsError::SendFailed(msg) => write!(f, "Send failed: {}", msg),
            WsError::CloseFailed(msg) => write!(f, "Close failed: {}", msg),
            WsError::ReceiveFailed(msg) => write!(f, "Receive failed: {}", msg),
            WsError::Disconnected => write!(f, "Disconnected from server"),
        }
    }
}

impl std::error::Error for WsError {}

/// Writing half of a connection.
#[async_trait]
pub trait WsSender: Send {
    /// Send one text message.
    async fn send_text(&mut self, text: &str) -> Result<(), WsError>;

    /// Start the close handshake.
    async fn close(&mut self) -> Result<(), WsError>;
}

/// Reading half of a connection.
#[async_trait]
pub trait WsReceiver: Send {
    /// Next inbound frame in wire order.
    ///
    /// `None` means the stream ended without a close frame.
    async fn recv(&mut self) -> Option<Result<WsFrame, WsError>>;
}

/// An open connection, split into its two halves.
pub struct WsConnection {
    pub sender: Box<dyn WsSender>,
    pub receiver: Box<dyn WsReceiver>,
}

impl std::fmt::Debug for WsConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsConnection").finish_non_exhaustive()
    }
}

/// Trait for opening WebSocket connections.
///
/// # Example
///
/// ```ignore
/// use apibench::traits::WsConnector;
///
/// async fn open<C: WsConnector>(connector: &C) -> Result<(), WsError> {
///     let mut conn = connector.connect("wss://echo.websocket.org", &HeaderSet::new()).await?;
///     conn.sender.send_text("hello").await?;
///     let reply = conn.receiver.recv().await;
///     conn.sender.close().await
/// }
/// ```
#[async_trait]
pub trait WsConnector: Send + Sync {
    /// Perform the handshake with `headers` attached.
    async fn connect(&self, url: &str, headers: &HeaderSet) -> Result<WsConnection, WsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws_error_display() {
        assert_eq!(
            WsError::ConnectionFailed("refused".to_string()).to_string(),
            "Connection failed: refused"
        );
        assert_eq!(WsError::Disconnected.to_string(), "Disconnected from server");
        assert_eq!(
            WsError::SendFailed("broken pipe".to_string()).to_string(),
            "Send failed: broken pipe"
        );
        assert_eq!(
            WsError::Timeout("10s".to_string()).to_string(),
            "Connection timeout: 10s"
        );
        assert_eq!(
            WsError::InvalidHeader("bad name".to_string()).to_string(),
            "Invalid header: bad name"
        );
    }

    #[test]
    fn test_ws_error_implements_error_trait() {
        let err = WsError::Disconnected;
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_close_codes() {
        assert_eq!(CLOSE_NO_STATUS, 1005);
        assert_eq!(CLOSE_ABNORMAL, 1006);
    }
}
