//! Serializes session operations onto one task.
//!
//! The UI never awaits a WebSocket operation. It queues a
//! [`SessionCommand`] through a [`SessionHandle`]; a single dispatcher task
//! owns the [`SessionManager`] and applies commands strictly in the order
//! they were queued. Outcomes reach the UI through the manager's event log
//! and state watch.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::client::WsConnectionState;
use super::session::SessionManager;
use crate::traits::WsConnector;

/// An operation queued for the session dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Connect { url: String, headers: String },
    Send(String),
    Disconnect,
    /// Tear down any session and stop the dispatcher
    Shutdown,
}

/// Handle to the dispatcher task.
pub struct SessionHandle {
    commands_tx: mpsc::UnboundedSender<SessionCommand>,
    state_rx: watch::Receiver<WsConnectionState>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    /// Move `manager` onto its own task and return a handle to it.
    pub fn spawn<C>(manager: SessionManager<C>) -> Self
    where
        C: WsConnector + 'static,
    {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let state_rx = manager.subscribe_state();
        let task = tokio::spawn(run_dispatcher(manager, commands_rx));
        Self {
            commands_tx,
            state_rx,
            task,
        }
    }

    fn queue(&self, command: SessionCommand) -> bool {
        self.commands_tx.send(command).is_ok()
    }

    /// Queue a connect. Returns false if the dispatcher has stopped.
    pub fn connect(&self, url: impl Into<String>, headers: impl Into<String>) -> bool {
        self.queue(SessionCommand::Connect {
            url: url.into(),
            headers: headers.into(),
        })
    }

    pub fn send(&self, text: impl Into<String>) -> bool {
        self.queue(SessionCommand::Send(text.into()))
    }

    pub fn disconnect(&self) -> bool {
        self.queue(SessionCommand::Disconnect)
    }

    /// Latest published lifecycle state.
    pub fn state(&self) -> WsConnectionState {
        *self.state_rx.borrow()
    }

    /// A fresh receiver for lifecycle state changes.
    pub fn subscribe_state(&self) -> watch::Receiver<WsConnectionState> {
        self.state_rx.clone()
    }

    /// Stop the dispatcher, disconnecting any live session first.
    pub async fn shutdown(self) {
        self.queue(SessionCommand::Shutdown);
        if let Err(e) = self.task.await {
            debug!("Session dispatcher ended abnormally: {}", e);
        }
    }
}

async fn run_dispatcher<C: WsConnector>(
    mut manager: SessionManager<C>,
    mut commands_rx: mpsc::UnboundedReceiver<SessionCommand>,
) {
    while let Some(command) = commands_rx.recv().await {
        let result = match command {
            SessionCommand::Connect { url, headers } => manager.connect(&url, &headers).await,
            SessionCommand::Send(text) => manager.send_message(&text).await,
            SessionCommand::Disconnect => manager.disconnect().await,
            SessionCommand::Shutdown => break,
        };
        if let Err(e) = result {
            debug!("Session command failed: {}", e);
        }
    }

    manager.shutdown().await;
    info!("Session dispatcher stopped");
}
