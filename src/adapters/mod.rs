//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`TungsteniteConnector`] - WebSocket using tokio-tungstenite
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for all adapters:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::MockWsConnector`] - Frame injection for testing

pub mod mock;
pub mod reqwest_http;
pub mod tungstenite_ws;

pub use mock::{MockHttpClient, MockWsConnector};
pub use reqwest_http::{ReqwestHttpClient, DEFAULT_REQUEST_TIMEOUT};
pub use tungstenite_ws::TungsteniteConnector;
