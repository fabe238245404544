//! Tungstenite-based WebSocket adapter.
//!
//! Opens connections with `tokio-tungstenite` and splits each one into a
//! [`WsSender`] and a [`WsReceiver`].

use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::error::ProtocolError;
use tokio_tungstenite::tungstenite::http::{HeaderName, HeaderValue};
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};

use crate::headers::HeaderSet;
use crate::traits::{
    WsConnection, WsConnector, WsError, WsFrame, WsReceiver, WsSender, CLOSE_NO_STATUS,
};
use crate::websocket::WsClientConfig;

type Stream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket connector using tokio-tungstenite.
///
/// # Example
///
/// ```ignore
/// use apibench::adapters::TungsteniteConnector;
/// use apibench::traits::WsConnector;
///
/// let connector = TungsteniteConnector::default();
/// let conn = connector.connect("wss://echo.websocket.org", &HeaderSet::new()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct TungsteniteConnector {
    handshake_timeout: Duration,
}

impl TungsteniteConnector {
    pub fn new(config: &WsClientConfig) -> Self {
        Self {
            handshake_timeout: config.handshake_timeout,
        }
    }

    /// Build the handshake request with user headers attached.
    fn build_request(
        url: &str,
        headers: &HeaderSet,
    ) -> Result<tungstenite::handshake::client::Request, WsError> {
        let mut request = url
            .into_client_request()
            .map_err(|e| WsError::InvalidUrl(e.to_string()))?;
        for (name, value) in headers.iter() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| WsError::InvalidHeader(format!("{}: {}", name, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| WsError::InvalidHeader(format!("{}: {}", name, e)))?;
            request.headers_mut().insert(header_name, header_value);
        }
        Ok(request)
    }
}

impl Default for TungsteniteConnector {
    fn default() -> Self {
        Self::new(&WsClientConfig::default())
    }
}

#[async_trait]
impl WsConnector for TungsteniteConnector {
    async fn connect(&self, url: &str, headers: &HeaderSet) -> Result<WsConnection, WsError> {
        let request = Self::build_request(url, headers)?;

        let (ws_stream, response) = tokio::time::timeout(self.handshake_timeout, connect_async(request))
            .await
            .map_err(|_| {
                WsError::Timeout(format!(
                    "no handshake response within {}s",
                    self.handshake_timeout.as_secs()
                ))
            })?
            .map_err(|e| WsError::ConnectionFailed(e.to_string()))?;

        info!("WebSocket handshake with {} completed ({})", url, response.status());

        let (sink, stream) = ws_stream.split();
        Ok(WsConnection {
            sender: Box::new(TungsteniteSender { sink }),
            receiver: Box::new(TungsteniteReceiver { stream }),
        })
    }
}

struct TungsteniteSender {
    sink: SplitSink<Stream, Message>,
}

#[async_trait]
impl WsSender for TungsteniteSender {
    async fn send_text(&mut self, text: &str) -> Result<(), WsError> {
        self.sink
            .send(Message::Text(text.to_string()))
            .await
            .map_err(|e| WsError::SendFailed(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), WsError> {
        self.sink
            .close()
            .await
            .map_err(|e| WsError::CloseFailed(e.to_string()))
    }
}

struct TungsteniteReceiver {
    stream: SplitStream<Stream>,
}

#[async_trait]
impl WsReceiver for TungsteniteReceiver {
    async fn recv(&mut self) -> Option<Result<WsFrame, WsError>> {
        loop {
            match self.stream.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(WsFrame::Text(text))),
                Ok(Message::Binary(data)) => return Some(Ok(WsFrame::Binary(data))),
                Ok(Message::Close(frame)) => {
                    let (code, reason) = frame
                        .map(|f| (u16::from(f.code), f.reason.into_owned()))
                        .unwrap_or((CLOSE_NO_STATUS, String::new()));
                    return Some(Ok(WsFrame::Close { code, reason }));
                }
                // Pongs are answered by tungstenite itself
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) | Ok(Message::Frame(_)) => {
                    debug!("Skipping control frame");
                }
                Err(tungstenite::Error::ConnectionClosed) | Err(tungstenite::Error::AlreadyClosed) => {
                    return None;
                }
                // Peer vanished without a close frame: abnormal closure
                Err(tungstenite::Error::Protocol(ProtocolError::ResetWithoutClosingHandshake)) => {
                    debug!("Connection reset without closing handshake");
                    return None;
                }
                Err(e) => return Some(Err(WsError::ReceiveFailed(e.to_string()))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_attaches_headers() {
        let headers: HeaderSet = [("Authorization", "Bearer abc"), ("X-Trace", "1")]
            .into_iter()
            .collect();
        let request = TungsteniteConnector::build_request("ws://localhost:9001/ws", &headers).unwrap();
        assert_eq!(request.headers()["authorization"], "Bearer abc");
        assert_eq!(request.headers()["x-trace"], "1");
    }

    #[test]
    fn test_build_request_rejects_bad_url() {
        let result = TungsteniteConnector::build_request("not a url", &HeaderSet::new());
        assert!(matches!(result, Err(WsError::InvalidUrl(_))));
    }

    #[test]
    fn test_build_request_rejects_bad_header_name() {
        let headers: HeaderSet = [("Bad Name", "x")].into_iter().collect();
        let result = TungsteniteConnector::build_request("ws://localhost:9001", &headers);
        assert!(matches!(result, Err(WsError::InvalidHeader(_))));
    }

    #[tokio::test]
    async fn test_connect_failure() {
        // Try to connect to a non-existent server
        let connector = TungsteniteConnector::default();
        let result = connector
            .connect("ws://127.0.0.1:59999/ws", &HeaderSet::new())
            .await;
        assert!(matches!(result, Err(WsError::ConnectionFailed(_))));
    }
}
