//! Rendering of request outcomes.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::theme::{
    COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER_NAME, COLOR_SUCCESS, COLOR_TEXT,
    COLOR_WARNING,
};
use crate::models::{Outcome, RequestResult};

/// Lines for one outcome: status, timing, headers and body for a result;
/// `Error` and the message for a failure.
pub fn outcome_lines(outcome: &Outcome) -> Vec<Line<'static>> {
    match outcome {
        Ok(result) => result_lines(result),
        Err(err) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    "Error",
                    Style::default()
                        .fg(COLOR_ERROR)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::default(),
            ];
            lines.extend(err.message.lines().map(|l| Line::from(l.to_string())));
            lines
        }
    }
}

fn result_lines(result: &RequestResult) -> Vec<Line<'static>> {
    let status_color = if result.is_success() {
        COLOR_SUCCESS
    } else {
        COLOR_WARNING
    };
    let status = if result.reason.is_empty() {
        result.status.to_string()
    } else {
        format!("{} {}", result.status, result.reason)
    };

    let mut lines = vec![
        Line::from(Span::styled(
            status,
            Style::default()
                .fg(status_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Time: {:.2} ms", result.elapsed_ms()),
            Style::default().fg(COLOR_DIM),
        )),
    ];
    for (name, value) in result.headers.iter() {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", name), Style::default().fg(COLOR_HEADER_NAME)),
            Span::raw(value.to_string()),
        ]));
    }
    lines.push(Line::default());
    lines.extend(result.body.lines().map(|l| Line::from(l.to_string())));
    lines
}

/// Draw the response pane. `scroll` is the first visible line.
pub fn render_response(frame: &mut Frame, area: Rect, outcome: Option<&Outcome>, scroll: u16) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title("Response");

    let lines = match outcome {
        Some(outcome) => outcome_lines(outcome),
        None => vec![Line::from(Span::styled(
            "No response yet. Press Ctrl+S to send.",
            Style::default().fg(COLOR_DIM),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(COLOR_TEXT))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::{OperationError, ValidationError};
    use crate::headers::HeaderSet;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_result_layout() {
        let mut headers = HeaderSet::new();
        headers.insert("content-type", "application/json");
        let outcome: Outcome = Ok(RequestResult {
            status: 200,
            reason: "OK".to_string(),
            elapsed: Duration::from_micros(12_340),
            headers,
            body: "{\n  \"ok\": true\n}".to_string(),
        });

        assert_eq!(
            plain(&outcome_lines(&outcome)),
            vec![
                "200 OK",
                "Time: 12.34 ms",
                "content-type: application/json",
                "",
                "{",
                "  \"ok\": true",
                "}",
            ]
        );
    }

    #[test]
    fn test_status_without_reason() {
        let outcome: Outcome = Ok(RequestResult {
            status: 599,
            reason: String::new(),
            elapsed: Duration::ZERO,
            headers: HeaderSet::new(),
            body: String::new(),
        });
        assert_eq!(plain(&outcome_lines(&outcome))[0], "599");
    }

    #[test]
    fn test_error_layout() {
        let outcome: Outcome = Err(OperationError::from(ValidationError::MissingQuery));
        assert_eq!(
            plain(&outcome_lines(&outcome)),
            vec!["Error", "", "GraphQL query is required."]
        );
    }
}
