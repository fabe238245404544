//! apibench - a terminal workbench for REST, GraphQL and WebSocket endpoints
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod executor;
pub mod headers;
pub mod logging;
pub mod models;
pub mod terminal;
pub mod traits;
pub mod ui;
pub mod websocket;
pub mod widgets;
