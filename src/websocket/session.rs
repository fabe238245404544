//! The WebSocket session manager.
//!
//! Holds at most one live connection. The socket itself belongs to a
//! spawned connection task; the manager only keeps that task's link in a
//! slot the task clears when the connection ends, whichever side ends it.
//! All operations take `&mut self`, so the manager is the single source of
//! requests to the connection.

use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use super::client::{
    lock_slot, run_connection, Outbound, SessionLink, SessionSlot, WsClientConfig,
    WsConnectionState,
};
use super::events::{LogEvent, LogKind};
use crate::error::{SessionError, ValidationError};
use crate::headers::parse_headers;
use crate::traits::WsConnector;

/// Manages the single WebSocket session.
///
/// # Example
///
/// ```ignore
/// use apibench::adapters::TungsteniteConnector;
/// use apibench::websocket::{SessionManager, WsClientConfig};
///
/// let config = WsClientConfig::default();
/// let (mut manager, mut events) = SessionManager::new(TungsteniteConnector::new(&config), config);
/// manager.connect("wss://echo.websocket.org", "").await?;
/// manager.send_message("hello").await?;
/// while let Some(event) = events.recv().await {
///     println!("{}", event);
/// }
/// ```
pub struct SessionManager<C: WsConnector> {
    connector: C,
    config: WsClientConfig,
    slot: SessionSlot,
    next_id: u64,
    events_tx: mpsc::UnboundedSender<LogEvent>,
    state_tx: Arc<watch::Sender<WsConnectionState>>,
}

impl<C: WsConnector> SessionManager<C> {
    /// Create a manager and the receiving end of its log events.
    pub fn new(connector: C, config: WsClientConfig) -> (Self, mpsc::UnboundedReceiver<LogEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, _) = watch::channel(WsConnectionState::Disconnected);
        let manager = Self {
            connector,
            config,
            slot: Arc::new(Mutex::new(None)),
            next_id: 1,
            events_tx,
            state_tx: Arc::new(state_tx),
        };
        (manager, events_rx)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WsConnectionState {
        *self.state_tx.borrow()
    }

    /// Subscribe to lifecycle state changes.
    pub fn subscribe_state(&self) -> watch::Receiver<WsConnectionState> {
        self.state_tx.subscribe()
    }

    /// Whether a connection (and the task reading it) is held.
    pub fn has_session(&self) -> bool {
        lock_slot(&self.slot).is_some()
    }

    /// URL of the live session, if any.
    pub fn url(&self) -> Option<String> {
        lock_slot(&self.slot).as_ref().map(|link| link.url.clone())
    }

    fn emit(&self, event: LogEvent) {
        let _ = self.events_tx.send(event);
    }

    fn set_state(&self, state: WsConnectionState) {
        self.state_tx.send_replace(state);
    }

    /// Log a rejected operation and hand the error back.
    fn reject(&self, err: SessionError) -> SessionError {
        let event = match &err {
            SessionError::Validation(ValidationError::InvalidHeader(e)) => {
                LogEvent::error(format!("Header error: {}", e))
            }
            SessionError::Transport(e) => LogEvent::error(e.to_string()),
            other => LogEvent::info(other.to_string()),
        };
        debug!("Session operation rejected: {}", err);
        self.emit(event);
        err
    }

    /// Open a session.
    ///
    /// Rejected while a session exists. On handshake failure the manager is
    /// back to `Disconnected` with nothing retained.
    pub async fn connect(&mut self, url: &str, header_text: &str) -> Result<(), SessionError> {
        if self.has_session() {
            return Err(self.reject(SessionError::AlreadyConnected));
        }

        let url = url.trim();
        if url.is_empty() {
            return Err(self.reject(ValidationError::MissingSocketUrl.into()));
        }
        let headers = match parse_headers(header_text) {
            Ok(headers) => headers,
            Err(e) => return Err(self.reject(ValidationError::from(e).into())),
        };

        self.set_state(WsConnectionState::Connecting);
        info!("Connecting WebSocket to {}", url);

        let conn = match self.connector.connect(url, &headers).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("WebSocket connection to {} failed: {}", url, e);
                self.set_state(WsConnectionState::Disconnected);
                self.emit(LogEvent::error(format!("Connection error: {}", e)));
                return Err(e.into());
            }
        };

        let id = self.next_id;
        self.next_id += 1;

        // Connected must be visible before the connection can report a close
        self.set_state(WsConnectionState::Connected);
        self.emit(LogEvent::new(
            LogKind::Connected,
            format!("Connected to {}", url),
        ));

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        {
            // Held across the spawn so the task cannot release a link that
            // is not stored yet
            let mut link = lock_slot(&self.slot);
            let task = tokio::spawn(run_connection(
                id,
                conn,
                outbound_rx,
                self.events_tx.clone(),
                self.state_tx.clone(),
                self.slot.clone(),
            ));
            *link = Some(SessionLink {
                id,
                url: url.to_string(),
                outbound_tx,
                task,
            });
        }
        info!("WebSocket session {} connected", id);
        Ok(())
    }

    /// Send one text message on the live session.
    ///
    /// A failed write is logged but does not end the session; the
    /// connection task decides when the connection is dead.
    pub async fn send_message(&mut self, text: &str) -> Result<(), SessionError> {
        if self.state() != WsConnectionState::Connected {
            return Err(self.reject(SessionError::NotConnected));
        }
        let outbound_tx = lock_slot(&self.slot)
            .as_ref()
            .map(|link| link.outbound_tx.clone());
        let Some(outbound_tx) = outbound_tx else {
            return Err(self.reject(SessionError::NotConnected));
        };
        if text.is_empty() {
            return Err(self.reject(ValidationError::EmptyMessage.into()));
        }

        let (reply, reply_rx) = oneshot::channel();
        let queued = outbound_tx.send(Outbound::Text {
            text: text.to_string(),
            reply,
        });
        if queued.is_err() {
            return Err(self.reject(SessionError::NotConnected));
        }

        match reply_rx.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                warn!("WebSocket send failed: {}", e);
                self.emit(LogEvent::error(format!("Send error: {}", e)));
                Err(e.into())
            }
            // The connection ended before the write was taken
            Err(_) => Err(self.reject(SessionError::NotConnected)),
        }
    }

    /// Close the live session.
    ///
    /// Teardown is unconditional: whatever the close handshake does, the
    /// connection task is stopped, the session cleared and `Disconnected`
    /// logged.
    pub async fn disconnect(&mut self) -> Result<(), SessionError> {
        let taken = lock_slot(&self.slot).take();
        let Some(mut link) = taken else {
            return Err(self.reject(SessionError::NoActiveConnection));
        };

        self.set_state(WsConnectionState::Disconnecting);
        info!("Disconnecting WebSocket session {}", link.id);

        // The task stops reading before it closes, so the peer's close reply
        // is not reported as a remote close
        let (reply, reply_rx) = oneshot::channel();
        let _ = link.outbound_tx.send(Outbound::Close { reply });

        match tokio::time::timeout(self.config.close_timeout, reply_rx).await {
            Ok(Ok(Ok(()))) => debug!("Close handshake sent"),
            Ok(Ok(Err(e))) => {
                warn!("WebSocket close failed: {}", e);
                self.emit(LogEvent::error(format!("Close error: {}", e)));
            }
            Ok(Err(_)) => debug!("Connection ended before the close handshake"),
            Err(_) => {
                warn!("WebSocket close timed out, aborting connection task");
                self.emit(LogEvent::error("Close error: timed out"));
                link.task.abort();
            }
        }

        if tokio::time::timeout(self.config.close_timeout, &mut link.task)
            .await
            .is_err()
        {
            warn!("Connection task did not stop in time, aborting");
            link.task.abort();
        }
        drop(link);

        self.set_state(WsConnectionState::Disconnected);
        self.emit(LogEvent::new(LogKind::Disconnected, "Disconnected"));
        Ok(())
    }

    /// Tear down any live session before the owner goes away.
    pub async fn shutdown(&mut self) {
        if self.has_session() {
            let _ = self.disconnect().await;
        }
    }
}

impl<C: WsConnector> Drop for SessionManager<C> {
    fn drop(&mut self) {
        // Dropping the outbound sender ends the connection task
        let taken = lock_slot(&self.slot).take();
        if let Some(link) = taken {
            debug!("Session manager dropped with live session {}", link.id);
        }
    }
}
