//! Key and paste handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::{App, Command, Field, Tab};
use crate::error::OperationError;
use crate::executor::prepare;
use crate::headers::parse_headers;
use crate::models::{GraphqlRequest, RequestSpec, RestRequest};
use crate::websocket::WsConnectionState;

/// Lines moved per PageUp/PageDown.
const PAGE_LINES: u16 = 10;

impl App {
    /// Handle one key press, returning the side effect it asks for.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                Some(Command::Quit)
            }
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Char('o') if ctrl && self.tab == Tab::WebSocket => self.connect_websocket(),
            KeyCode::Char('d') if ctrl && self.tab == Tab::WebSocket => Some(Command::WsDisconnect),
            KeyCode::F(1) => {
                self.select_tab(Tab::Rest);
                None
            }
            KeyCode::F(2) => {
                self.select_tab(Tab::Graphql);
                None
            }
            KeyCode::F(3) => {
                self.select_tab(Tab::WebSocket);
                None
            }
            KeyCode::Tab => {
                self.focus_next();
                None
            }
            KeyCode::BackTab => {
                self.focus_prev();
                None
            }
            KeyCode::PageUp => {
                self.scroll_output(true);
                None
            }
            KeyCode::PageDown => {
                self.scroll_output(false);
                None
            }
            _ => {
                self.edit(key);
                None
            }
        }
    }

    /// Insert pasted text into the focused field.
    pub fn handle_paste(&mut self, text: &str) {
        let focused = self.focused();
        if let Some(field) = self.field_mut(focused) {
            field.insert_str(text);
        }
    }

    fn scroll_output(&mut self, up: bool) {
        let slot = &mut self.output_scroll[self.tab.index()];
        // The activity log counts from the bottom
        let grow = if self.tab == Tab::WebSocket { up } else { !up };
        *slot = if grow {
            slot.saturating_add(PAGE_LINES)
        } else {
            slot.saturating_sub(PAGE_LINES)
        };
    }

    fn edit(&mut self, key: KeyEvent) {
        let focused = self.focused();
        if focused == Field::Method {
            match key.code {
                KeyCode::Left => self.method = self.method.prev(),
                KeyCode::Right => self.method = self.method.next(),
                _ => {}
            }
            return;
        }

        let Some(field) = self.field_mut(focused) else {
            return;
        };
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Char(c) if plain => field.insert_char(c),
            KeyCode::Enter => field.insert_newline(),
            KeyCode::Backspace => field.backspace(),
            KeyCode::Delete => field.delete(),
            KeyCode::Left => field.move_left(),
            KeyCode::Right => field.move_right(),
            KeyCode::Up => field.move_up(),
            KeyCode::Down => field.move_down(),
            KeyCode::Home => field.move_home(),
            KeyCode::End => field.move_end(),
            _ => {}
        }
    }

    /// Ctrl+S: send the request (or WebSocket message) of the current tab.
    fn submit(&mut self) -> Option<Command> {
        match self.tab {
            Tab::Rest => {
                let spec = RequestSpec::from(
                    RestRequest::new(self.method, self.rest_url.text())
                        .with_headers(self.rest_headers.text())
                        .with_body(self.rest_body.text()),
                );
                if let Err(e) = prepare(&spec) {
                    self.rest_response = Some(Err(OperationError::from(e)));
                    return None;
                }
                self.status = format!("Sending {} {}", self.method, self.rest_url.text().trim());
                Some(Command::ExecuteRest(spec))
            }
            Tab::Graphql => {
                let spec = RequestSpec::from(
                    GraphqlRequest::new(self.graphql_url.text(), self.graphql_query.text())
                        .with_headers(self.graphql_headers.text())
                        .with_variables(self.graphql_variables.text()),
                );
                if let Err(e) = prepare(&spec) {
                    self.graphql_response = Some(Err(OperationError::from(e)));
                    return None;
                }
                self.status = format!("Posting GraphQL query to {}", self.graphql_url.text().trim());
                Some(Command::ExecuteGraphql(spec))
            }
            Tab::WebSocket => Some(Command::WsSend(self.ws_message.text())),
        }
    }

    /// Ctrl+O. The session manager does the authoritative checks and logs
    /// any rejection; a connect expected to go ahead clears the log first.
    fn connect_websocket(&mut self) -> Option<Command> {
        let url = self.ws_url.text();
        let headers = self.ws_headers.text();
        let trimmed = url.trim();
        let will_attempt = !trimmed.is_empty()
            && self.ws_state == WsConnectionState::Disconnected
            && parse_headers(&headers).is_ok();
        if will_attempt {
            self.ws_log.clear();
            self.output_scroll[Tab::WebSocket.index()] = 0;
            self.status = format!("Connecting to {}", trimmed);
            self.connect_pending = true;
        } else {
            debug!("Connect queued for rejection by the session manager");
        }
        Some(Command::WsConnect { url, headers })
    }
}
