//! Mock WebSocket connector for testing.
//!
//! Provides a connector whose connections can be fed inbound frames from
//! the test and which records everything sent on them.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

use crate::headers::HeaderSet;
use crate::traits::{WsConnection, WsConnector, WsError, WsFrame, WsReceiver, WsSender};

#[derive(Default)]
struct MockState {
    connect_error: Option<WsError>,
    send_error: Option<WsError>,
    close_error: Option<WsError>,
    close_hangs: bool,
    connect_attempts: Vec<(String, HeaderSet)>,
    sent: Vec<String>,
    close_calls: usize,
    inbound_tx: Option<mpsc::UnboundedSender<Result<WsFrame, WsError>>>,
}

/// Mock WebSocket connector for testing.
///
/// This mock allows:
/// - Failing the handshake, sends or closes on demand
/// - Stalling the close handshake
/// - Injecting inbound frames and errors into the live connection
/// - Ending the inbound stream without a close frame
/// - Inspecting handshake headers and sent messages
///
/// # Example
///
/// ```ignore
/// use apibench::adapters::mock::MockWsConnector;
/// use apibench::traits::WsFrame;
///
/// let mock = MockWsConnector::new();
/// let (mut manager, _events) = SessionManager::new(mock.clone(), WsClientConfig::default());
/// manager.connect("ws://test", "").await?;
///
/// mock.inject_frame(WsFrame::Text("hello".to_string()));
/// manager.send_message("hi").await?;
/// assert_eq!(mock.sent_messages(), vec!["hi"]);
/// ```
#[derive(Clone, Default)]
pub struct MockWsConnector {
    state: Arc<Mutex<MockState>>,
}

fn lock(state: &Mutex<MockState>) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockWsConnector {
    /// Create a connector whose handshakes succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next handshakes fail with `err` (or succeed again with `None`).
    pub fn set_connect_error(&self, err: Option<WsError>) {
        lock(&self.state).connect_error = err;
    }

    pub fn set_send_error(&self, err: Option<WsError>) {
        lock(&self.state).send_error = err;
    }

    pub fn set_close_error(&self, err: Option<WsError>) {
        lock(&self.state).close_error = err;
    }

    /// Make `close` never complete, as with a peer that stops answering.
    pub fn set_close_hangs(&self, hangs: bool) {
        lock(&self.state).close_hangs = hangs;
    }

    /// Deliver a frame to the live connection's receiver.
    ///
    /// Returns false when there is no live connection.
    pub fn inject_frame(&self, frame: WsFrame) -> bool {
        self.inject(Ok(frame))
    }

    /// Deliver a receive error to the live connection's receiver.
    pub fn inject_error(&self, err: WsError) -> bool {
        self.inject(Err(err))
    }

    fn inject(&self, item: Result<WsFrame, WsError>) -> bool {
        match &lock(&self.state).inbound_tx {
            Some(tx) => tx.send(item).is_ok(),
            None => false,
        }
    }

    /// End the inbound stream without a close frame.
    pub fn end_stream(&self) {
        lock(&self.state).inbound_tx = None;
    }

    /// URL and headers of every handshake attempted, in order.
    pub fn connect_attempts(&self) -> Vec<(String, HeaderSet)> {
        lock(&self.state).connect_attempts.clone()
    }

    /// Messages written through any connection, in order.
    pub fn sent_messages(&self) -> Vec<String> {
        lock(&self.state).sent.clone()
    }

    pub fn close_calls(&self) -> usize {
        lock(&self.state).close_calls
    }

    /// Whether the live connection's receiver is still being read.
    pub fn receiver_alive(&self) -> bool {
        lock(&self.state)
            .inbound_tx
            .as_ref()
            .is_some_and(|tx| !tx.is_closed())
    }
}

#[async_trait]
impl WsConnector for MockWsConnector {
    async fn connect(&self, url: &str, headers: &HeaderSet) -> Result<WsConnection, WsError> {
        let mut state = lock(&self.state);
        state
            .connect_attempts
            .push((url.to_string(), headers.clone()));
        if let Some(err) = state.connect_error.clone() {
            return Err(err);
        }

        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        state.inbound_tx = Some(inbound_tx);

        Ok(WsConnection {
            sender: Box::new(MockSender {
                state: self.state.clone(),
            }),
            receiver: Box::new(MockReceiver { inbound_rx }),
        })
    }
}

struct MockSender {
    state: Arc<Mutex<MockState>>,
}

#[async_trait]
impl WsSender for MockSender {
    async fn send_text(&mut self, text: &str) -> Result<(), WsError> {
        let mut state = lock(&self.state);
        if let Some(err) = state.send_error.clone() {
            return Err(err);
        }
        state.sent.push(text.to_string());
        Ok(())
    }

    async fn close(&mut self) -> Result<(), WsError> {
        let (hangs, result) = {
            let mut state = lock(&self.state);
            state.close_calls += 1;
            (state.close_hangs, state.close_error.clone().map_or(Ok(()), Err))
        };
        if hangs {
            std::future::pending::<()>().await;
        }
        result
    }
}

struct MockReceiver {
    inbound_rx: mpsc::UnboundedReceiver<Result<WsFrame, WsError>>,
}

#[async_trait]
impl WsReceiver for MockReceiver {
    async fn recv(&mut self) -> Option<Result<WsFrame, WsError>> {
        self.inbound_rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_records_attempt() {
        let mock = MockWsConnector::new();
        let headers: HeaderSet = [("X-Key", "v")].into_iter().collect();
        let _conn = mock.connect("ws://test", &headers).await.unwrap();

        let attempts = mock.connect_attempts();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].0, "ws://test");
        assert_eq!(attempts[0].1.get("X-Key"), Some("v"));
    }

    #[tokio::test]
    async fn test_connect_failure() {
        let mock = MockWsConnector::new();
        mock.set_connect_error(Some(WsError::ConnectionFailed("refused".to_string())));
        let result = mock.connect("ws://test", &HeaderSet::new()).await;
        assert!(matches!(result, Err(WsError::ConnectionFailed(_))));
    }

    #[tokio::test]
    async fn test_injected_frames_arrive_in_order() {
        let mock = MockWsConnector::new();
        let mut conn = mock.connect("ws://test", &HeaderSet::new()).await.unwrap();

        assert!(mock.inject_frame(WsFrame::Text("one".to_string())));
        assert!(mock.inject_frame(WsFrame::Text("two".to_string())));
        mock.end_stream();

        assert_eq!(
            conn.receiver.recv().await,
            Some(Ok(WsFrame::Text("one".to_string())))
        );
        assert_eq!(
            conn.receiver.recv().await,
            Some(Ok(WsFrame::Text("two".to_string())))
        );
        assert_eq!(conn.receiver.recv().await, None);
    }

    #[tokio::test]
    async fn test_sender_records_and_fails_on_demand() {
        let mock = MockWsConnector::new();
        let mut conn = mock.connect("ws://test", &HeaderSet::new()).await.unwrap();

        conn.sender.send_text("hello").await.unwrap();
        mock.set_send_error(Some(WsError::SendFailed("boom".to_string())));
        assert!(conn.sender.send_text("lost").await.is_err());
        assert_eq!(mock.sent_messages(), vec!["hello".to_string()]);

        mock.set_close_error(Some(WsError::CloseFailed("reset".to_string())));
        assert!(conn.sender.close().await.is_err());
        assert_eq!(mock.close_calls(), 1);
    }

    #[test]
    fn test_inject_without_connection() {
        let mock = MockWsConnector::new();
        assert!(!mock.inject_frame(WsFrame::Text("nobody".to_string())));
        assert!(!mock.receiver_alive());
    }
}
