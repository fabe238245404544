//! Application state for the workbench.
//!
//! [`App`] holds every form field, the latest results and the WebSocket
//! activity log. It is driven by the event loop in `main.rs`: key presses go
//! through [`App::handle_key`], which may return a [`Command`] for the loop
//! to carry out, and background results come back as [`AppMessage`]s.

mod handlers;
mod messages;
mod types;

pub use messages::{AppMessage, Command};
pub use types::{Field, Tab};

use tracing::debug;

use crate::models::{HttpMethod, Outcome};
use crate::websocket::{LogEvent, WsConnectionState};
use crate::widgets::TextField;

/// Oldest activity log entries are dropped beyond this.
pub const MAX_LOG_ENTRIES: usize = 2000;

/// Workbench state
pub struct App {
    pub tab: Tab,
    /// Focused field index per tab, see [`Tab::fields`]
    focus: [usize; 3],
    pub should_quit: bool,
    /// One-line status shown under the tabs
    pub status: String,

    // REST
    pub method: HttpMethod,
    pub rest_url: TextField,
    pub rest_headers: TextField,
    pub rest_body: TextField,
    pub rest_response: Option<Outcome>,

    // GraphQL
    pub graphql_url: TextField,
    pub graphql_headers: TextField,
    pub graphql_query: TextField,
    pub graphql_variables: TextField,
    pub graphql_response: Option<Outcome>,

    // WebSocket
    pub ws_url: TextField,
    pub ws_headers: TextField,
    pub ws_message: TextField,
    pub ws_log: Vec<LogEvent>,
    pub ws_state: WsConnectionState,
    /// A connect was queued and its outcome not yet seen
    connect_pending: bool,

    /// Output pane scroll per tab. For the activity log this counts lines
    /// up from the newest entry.
    pub output_scroll: [u16; 3],
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            tab: Tab::Rest,
            focus: [1, 0, 0],
            should_quit: false,
            status: "Ready".to_string(),
            method: HttpMethod::Get,
            rest_url: TextField::single_line().with_text("https://httpbin.org/get"),
            rest_headers: TextField::multi_line().with_text("Accept: application/json"),
            rest_body: TextField::multi_line(),
            rest_response: None,
            graphql_url: TextField::single_line(),
            graphql_headers: TextField::multi_line(),
            graphql_query: TextField::multi_line(),
            graphql_variables: TextField::multi_line(),
            graphql_response: None,
            ws_url: TextField::single_line().with_text("wss://echo.websocket.org"),
            ws_headers: TextField::multi_line(),
            ws_message: TextField::multi_line(),
            ws_log: Vec::new(),
            ws_state: WsConnectionState::Disconnected,
            connect_pending: false,
            output_scroll: [0; 3],
        }
    }

    /// The focused field on the current tab.
    pub fn focused(&self) -> Field {
        let fields = self.tab.fields();
        fields[self.focus[self.tab.index()].min(fields.len() - 1)]
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn focus_next(&mut self) {
        let len = self.tab.fields().len();
        let slot = &mut self.focus[self.tab.index()];
        *slot = (*slot + 1) % len;
    }

    pub fn focus_prev(&mut self) {
        let len = self.tab.fields().len();
        let slot = &mut self.focus[self.tab.index()];
        *slot = (*slot + len - 1) % len;
    }

    /// The text field behind `field`; `None` for the method selector.
    pub fn field_mut(&mut self, field: Field) -> Option<&mut TextField> {
        Some(match field {
            Field::Method => return None,
            Field::RestUrl => &mut self.rest_url,
            Field::RestHeaders => &mut self.rest_headers,
            Field::RestBody => &mut self.rest_body,
            Field::GraphqlUrl => &mut self.graphql_url,
            Field::GraphqlHeaders => &mut self.graphql_headers,
            Field::GraphqlQuery => &mut self.graphql_query,
            Field::GraphqlVariables => &mut self.graphql_variables,
            Field::WsUrl => &mut self.ws_url,
            Field::WsHeaders => &mut self.ws_headers,
            Field::WsMessage => &mut self.ws_message,
        })
    }

    /// Fold a background result into the state.
    pub fn apply_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::RestFinished(outcome) => {
                self.status = match &outcome {
                    Ok(result) => format!(
                        "Received {} in {:.2} ms",
                        result.status,
                        result.elapsed_ms()
                    ),
                    Err(_) => "Request failed".to_string(),
                };
                self.rest_response = Some(outcome);
                self.output_scroll[Tab::Rest.index()] = 0;
            }
            AppMessage::GraphqlFinished(outcome) => {
                self.status = match &outcome {
                    Ok(result) => format!("GraphQL {}", result.status),
                    Err(_) => "GraphQL request failed".to_string(),
                };
                self.graphql_response = Some(outcome);
                self.output_scroll[Tab::Graphql.index()] = 0;
            }
        }
    }

    /// Append a session event to the activity log.
    pub fn push_log_event(&mut self, event: LogEvent) {
        self.ws_log.push(event);
        if self.ws_log.len() > MAX_LOG_ENTRIES {
            let excess = self.ws_log.len() - MAX_LOG_ENTRIES;
            self.ws_log.drain(..excess);
        }
    }

    /// React to a published session state.
    ///
    /// Intermediate states may be skipped by the watch channel, so the
    /// transition is judged from the last seen state and whether a connect is
    /// outstanding.
    pub fn on_ws_state(&mut self, state: WsConnectionState) {
        let previous = self.ws_state;
        self.ws_state = state;
        debug!("Session state {} -> {}", previous, state);

        match state {
            WsConnectionState::Connected => {
                if self.connect_pending || previous != WsConnectionState::Connected {
                    self.status = "WebSocket connected".to_string();
                }
                self.connect_pending = false;
            }
            WsConnectionState::Disconnected => {
                if self.connect_pending {
                    self.status = "WebSocket connection failed".to_string();
                    self.connect_pending = false;
                } else if matches!(
                    previous,
                    WsConnectionState::Connected | WsConnectionState::Disconnecting
                ) {
                    self.status = "WebSocket disconnected".to_string();
                }
            }
            WsConnectionState::Connecting | WsConnectionState::Disconnecting => {}
        }
    }
}
