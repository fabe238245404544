use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::events::{LogEvent, LogKind};
use crate::traits::{WsConnection, WsError, WsFrame, CLOSE_ABNORMAL};

/// WebSocket session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WsConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Disconnecting,
}

impl fmt::Display for WsConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WsConnectionState::Disconnected => "disconnected",
            WsConnectionState::Connecting => "connecting",
            WsConnectionState::Connected => "connected",
            WsConnectionState::Disconnecting => "disconnecting",
        };
        f.write_str(label)
    }
}

/// Configuration for WebSocket sessions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WsClientConfig {
    /// Upper bound for the opening handshake
    pub handshake_timeout: Duration,
    /// Upper bound for the close handshake and receive-loop teardown
    pub close_timeout: Duration,
}

impl Default for WsClientConfig {
    fn default() -> Self {
        Self {
            handshake_timeout: Duration::from_secs(10),
            close_timeout: Duration::from_secs(5),
        }
    }
}

/// Why the connection task stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopEnd {
    /// Disconnect requested locally, or the session was dropped
    Cancelled,
    /// Peer closed, or the stream ended
    Closed,
    Failed,
}

/// A write queued for the connection task.
#[derive(Debug)]
pub(crate) enum Outbound {
    Text {
        text: String,
        reply: oneshot::Sender<Result<(), WsError>>,
    },
    /// Stop reading, start the close handshake and end the task
    Close {
        reply: oneshot::Sender<Result<(), WsError>>,
    },
}

/// Handle to a running connection task.
pub(crate) struct SessionLink {
    pub(crate) id: u64,
    pub(crate) url: String,
    pub(crate) outbound_tx: mpsc::UnboundedSender<Outbound>,
    pub(crate) task: JoinHandle<LoopEnd>,
}

/// Holds the live session's link. The connection task empties it on its
/// way out, so a finished connection never leaves a handle behind.
pub(crate) type SessionSlot = Arc<Mutex<Option<SessionLink>>>;

pub(crate) fn lock_slot(slot: &Mutex<Option<SessionLink>>) -> MutexGuard<'_, Option<SessionLink>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(crate) fn closed_text(code: u16, reason: &str) -> String {
    if reason.is_empty() {
        format!("Connection closed ({})", code)
    } else {
        format!("Connection closed ({}: {})", code, reason)
    }
}

/// Drive one connection until it ends.
///
/// Owns both halves of the socket. Inbound frames are logged in wire order;
/// queued writes are applied in the order they were queued, and a text is
/// logged as sent before anything read after it. A `Close` request, or the
/// outbound channel closing, ends the task quietly.
///
/// On the way out the task drops the socket, removes its own link from
/// `slot`, and only then moves a `Connected` session to `Disconnected`. Any
/// other state belongs to the session manager and is left alone.
pub(crate) async fn run_connection(
    id: u64,
    conn: WsConnection,
    mut outbound_rx: mpsc::UnboundedReceiver<Outbound>,
    events_tx: mpsc::UnboundedSender<LogEvent>,
    state_tx: Arc<watch::Sender<WsConnectionState>>,
    slot: SessionSlot,
) -> LoopEnd {
    let WsConnection {
        mut sender,
        mut receiver,
    } = conn;
    let emit = |event: LogEvent| {
        // The UI may already be gone during shutdown
        let _ = events_tx.send(event);
    };

    let end = loop {
        tokio::select! {
            biased;

            outbound = outbound_rx.recv() => match outbound {
                Some(Outbound::Text { text, reply }) => {
                    let result = sender.send_text(&text).await;
                    if result.is_ok() {
                        debug!("Sent {} bytes on session {}", text.len(), id);
                        emit(LogEvent::sent(text));
                    }
                    let _ = reply.send(result);
                }
                Some(Outbound::Close { reply }) => {
                    let _ = reply.send(sender.close().await);
                    break LoopEnd::Cancelled;
                }
                None => {
                    debug!("Session {} dropped, closing connection", id);
                    break LoopEnd::Cancelled;
                }
            },

            frame = receiver.recv() => match frame {
                Some(Ok(WsFrame::Text(text))) => emit(LogEvent::received(text)),
                Some(Ok(WsFrame::Binary(data))) => {
                    emit(LogEvent::received(String::from_utf8_lossy(&data).into_owned()));
                }
                Some(Ok(WsFrame::Close { code, reason })) => {
                    info!("Received close frame ({})", code);
                    emit(LogEvent::new(LogKind::Disconnected, closed_text(code, &reason)));
                    break LoopEnd::Closed;
                }
                Some(Err(e)) => {
                    warn!("WebSocket receive error: {}", e);
                    emit(LogEvent::error(format!("Receiver error: {}", e)));
                    break LoopEnd::Failed;
                }
                None => {
                    info!("WebSocket stream ended without close frame");
                    emit(LogEvent::new(LogKind::Disconnected, closed_text(CLOSE_ABNORMAL, "")));
                    break LoopEnd::Closed;
                }
            },
        }
    };

    drop(receiver);
    drop(sender);
    let released = {
        let mut link = lock_slot(&slot);
        if link.as_ref().is_some_and(|l| l.id == id) {
            link.take()
        } else {
            None
        }
    };
    if released.is_some() {
        debug!("Session {} released by its connection task", id);
    }
    drop(released);

    state_tx.send_if_modified(|state| {
        if *state == WsConnectionState::Connected {
            *state = WsConnectionState::Disconnected;
            true
        } else {
            false
        }
    });
    end
}
