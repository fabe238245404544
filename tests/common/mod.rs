//! Common test utilities for integration tests.
//!
//! Provides a local WebSocket server built on `tokio-tungstenite` and small
//! helpers for reading session events with a deadline.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use apibench::websocket::LogEvent;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;

/// How the test server treats the first text message of a connection.
#[derive(Debug, Clone, Copy)]
pub enum ServerBehavior {
    /// Echo every text message back
    Echo,
    /// Answer with a close frame carrying this code and reason
    CloseAfterFirst { code: u16, reason: &'static str },
    /// Drop the TCP stream without a close frame
    DropAfterFirst,
}

type Handshakes = Arc<Mutex<Vec<Vec<(String, String)>>>>;

/// A WebSocket server on an ephemeral localhost port.
pub struct TestServer {
    pub url: String,
    handshakes: Handshakes,
}

impl TestServer {
    pub async fn start(behavior: ServerBehavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handshakes = Handshakes::default();

        let recorded = handshakes.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve(stream, behavior, recorded.clone()));
            }
        });

        Self {
            url: format!("ws://{}/socket", addr),
            handshakes,
        }
    }

    /// Value of `name` in the `index`th handshake, if sent.
    pub fn handshake_header(&self, index: usize, name: &str) -> Option<String> {
        let handshakes = self.handshakes.lock().unwrap();
        handshakes.get(index).and_then(|headers| {
            headers
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.clone())
        })
    }

    pub fn handshake_count(&self) -> usize {
        self.handshakes.lock().unwrap().len()
    }
}

async fn serve(stream: TcpStream, behavior: ServerBehavior, recorded: Handshakes) {
    let callback = |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
        let headers = request
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        recorded.lock().unwrap().push(headers);
        Ok(response)
    };
    let Ok(mut ws) = tokio_tungstenite::accept_hdr_async(stream, callback).await else {
        return;
    };

    while let Some(Ok(message)) = ws.next().await {
        let Message::Text(text) = message else {
            continue;
        };
        match behavior {
            ServerBehavior::Echo => {
                if ws.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            ServerBehavior::CloseAfterFirst { code, reason } => {
                let frame = CloseFrame {
                    code: CloseCode::from(code),
                    reason: reason.into(),
                };
                let _ = ws.send(Message::Close(Some(frame))).await;
            }
            ServerBehavior::DropAfterFirst => return,
        }
    }
}

/// A `ws://` URL on which nothing is listening.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("ws://127.0.0.1:{}/", port)
}

/// Next session event, failing the test after two seconds.
pub async fn next_event(events: &mut mpsc::UnboundedReceiver<LogEvent>) -> LogEvent {
    tokio::time::timeout(Duration::from_secs(2), events.recv())
        .await
        .expect("timed out waiting for a session event")
        .expect("session event channel closed")
}
