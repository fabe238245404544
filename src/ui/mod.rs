//! UI rendering for the workbench
//!
//! Screen layout, top to bottom:
//! - Tab bar (REST / GraphQL / WebSocket)
//! - Status line
//! - Active tab: form on the left, response or activity log on the right
//! - Keybind hints

mod forms;
pub mod response;
pub mod theme;
mod websocket;

pub use response::outcome_lines;
pub use websocket::log_lines;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame,
};

use crate::app::{App, Tab};
use theme::{COLOR_ACCENT, COLOR_DIM};

// ============================================================================
// Main UI Rendering
// ============================================================================

/// Render the whole screen
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);
    render_status(frame, app, chunks[1]);
    match app.tab {
        Tab::Rest => forms::render_rest(frame, app, chunks[2]),
        Tab::Graphql => forms::render_graphql(frame, app, chunks[2]),
        Tab::WebSocket => websocket::render_websocket(frame, app, chunks[2]),
    }
    render_hints(frame, app, chunks[3]);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("F{} {}", i + 1, tab.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(Style::default().fg(COLOR_DIM))
        .highlight_style(
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    frame.render_widget(tabs, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(Span::styled(
        app.status.clone(),
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Keybind hints for the active tab.
pub fn hints(tab: Tab) -> &'static str {
    match tab {
        Tab::Rest => "Tab focus  ←/→ method  Ctrl+S send  PgUp/PgDn scroll  Ctrl+C quit",
        Tab::Graphql => "Tab focus  Ctrl+S send  PgUp/PgDn scroll  Ctrl+C quit",
        Tab::WebSocket => {
            "Tab focus  Ctrl+O connect  Ctrl+S send  Ctrl+D disconnect  PgUp/PgDn scroll  Ctrl+C quit"
        }
    }
}

fn render_hints(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(Span::styled(hints(app.tab), Style::default().fg(COLOR_DIM)));
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppMessage;
    use crate::error::OperationError;
    use crate::websocket::LogEvent;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn draw(app: &mut App) -> String {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_rest_tab_renders() {
        let mut app = App::new();
        let screen = draw(&mut app);
        assert!(screen.contains("F1 REST"));
        assert!(screen.contains("Ready"));
        assert!(screen.contains("GET"));
        assert!(screen.contains("https://httpbin.org/get"));
        assert!(screen.contains("No response yet"));
    }

    #[test]
    fn test_error_response_renders() {
        let mut app = App::new();
        app.apply_message(AppMessage::RestFinished(Err(OperationError::transport(
            "Connection failed: refused",
        ))));
        let screen = draw(&mut app);
        assert!(screen.contains("Request failed"));
        assert!(screen.contains("Connection failed: refused"));
    }

    #[test]
    fn test_websocket_tab_renders_log() {
        let mut app = App::new();
        app.select_tab(Tab::WebSocket);
        app.push_log_event(LogEvent::received("pong"));
        let screen = draw(&mut app);
        assert!(screen.contains("Activity (disconnected)"));
        assert!(screen.contains("<- pong"));
        assert!(screen.contains("Ctrl+O connect"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = App::new();
        for tab in Tab::ALL {
            app.select_tab(tab);
            let backend = TestBackend::new(10, 4);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal.draw(|frame| render(frame, &mut app)).unwrap();
        }
    }
}
