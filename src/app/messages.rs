//! Messages exchanged between the event loop and the [`App`](super::App).

use crate::models::{Outcome, RequestSpec};

/// Results of background work, delivered to the event loop.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A REST request finished
    RestFinished(Outcome),
    /// A GraphQL request finished
    GraphqlFinished(Outcome),
}

/// Side effects requested by a key press.
///
/// The app never performs I/O itself; the event loop carries these out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Run a REST request in the background
    ExecuteRest(RequestSpec),
    /// Run a GraphQL request in the background
    ExecuteGraphql(RequestSpec),
    WsConnect { url: String, headers: String },
    WsSend(String),
    WsDisconnect,
}
