//! WebSocket pane: connection form and activity log.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::forms::{draw_field, split_columns};
use super::theme::{log_kind_color, COLOR_BORDER, COLOR_DIM, COLOR_TEXT};
use crate::app::{App, Field, Tab};
use crate::websocket::LogEvent;

/// Activity log lines; multi-line payloads continue under the first line.
pub fn log_lines(events: &[LogEvent]) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(events.len());
    for event in events {
        let time = event.at.format("%H:%M:%S ").to_string();
        let indent = " ".repeat(time.len() + event.kind.marker().len() + 1);
        let marker = Style::default().fg(log_kind_color(event.kind));

        let mut text_lines = event.text.split('\n');
        let first = text_lines.next().unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(time, Style::default().fg(COLOR_DIM)),
            Span::styled(format!("{} ", event.kind.marker()), marker),
            Span::styled(first.to_string(), Style::default().fg(COLOR_TEXT)),
        ]));
        for rest in text_lines {
            lines.push(Line::from(format!("{}{}", indent, rest)));
        }
    }
    lines
}

/// First line to show so the newest entries are visible, `from_bottom`
/// lines back.
fn log_offset(total: usize, height: usize, from_bottom: usize) -> usize {
    let max_start = total.saturating_sub(height);
    max_start.saturating_sub(from_bottom)
}

pub fn render_websocket(frame: &mut Frame, app: &mut App, area: Rect) {
    let (form, output) = split_columns(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(35),
            Constraint::Min(3),
        ])
        .split(form);

    draw_field(frame, app, Field::WsUrl, rows[0]);
    draw_field(frame, app, Field::WsHeaders, rows[1]);
    draw_field(frame, app, Field::WsMessage, rows[2]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(format!("Activity ({})", app.ws_state));
    let height = block.inner(output).height as usize;

    let lines = log_lines(&app.ws_log);
    let from_bottom = app.output_scroll[Tab::WebSocket.index()] as usize;
    let start = log_offset(lines.len(), height, from_bottom);
    let top = u16::try_from(start).unwrap_or(u16::MAX);

    frame.render_widget(Paragraph::new(lines).block(block).scroll((top, 0)), output);
}
