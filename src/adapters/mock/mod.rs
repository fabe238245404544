//! Mock implementations for testing.
//!
//! This module provides mock implementations of the trait abstractions,
//! enabling unit testing without network dependencies.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`MockWsConnector`] - WebSocket connector with frame injection

pub mod http;
pub mod websocket;

pub use http::{MockHttpClient, MockResponse};
pub use websocket::MockWsConnector;
