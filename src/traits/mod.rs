//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - one-shot HTTP requests
//! - [`WsConnector`] - WebSocket handshakes, yielding a [`WsSender`] /
//!   [`WsReceiver`] pair

pub mod http;
pub mod websocket;

pub use http::{HttpClient, HttpError, HttpRequest, Response};
pub use websocket::{
    WsConnection, WsConnector, WsError, WsFrame, WsReceiver, WsSender, CLOSE_ABNORMAL,
    CLOSE_NO_STATUS,
};
