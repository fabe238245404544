//! WebSocket sessions.
//!
//! [`SessionManager`] owns the one live connection, driven by a connection
//! task that reads inbound frames and applies queued writes;
//! [`SessionHandle`] runs a manager on its own task so the UI can queue
//! operations without blocking. Everything that happens on the session is
//! reported as a [`LogEvent`].

pub mod client;
pub mod dispatcher;
pub mod events;
pub mod session;

pub use client::{WsClientConfig, WsConnectionState};
pub use dispatcher::{SessionCommand, SessionHandle};
pub use events::{LogEvent, LogKind};
pub use session::SessionManager;
