//! REST and GraphQL request panes.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::response::render_response;
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_FOCUS};
use crate::app::{App, Field, Tab};
use crate::widgets::TextFieldWidget;

/// Draw a text field and, if it has focus, place the terminal cursor in it.
pub(super) fn draw_field(frame: &mut Frame, app: &mut App, field: Field, area: Rect) {
    let focused = app.focused() == field;
    let Some(text_field) = app.field_mut(field) else {
        return;
    };
    frame.render_widget(TextFieldWidget::new(text_field, field.title(), focused), area);
    if focused {
        if let Some(position) = text_field.cursor_position(area) {
            frame.set_cursor_position(position);
        }
    }
}

/// Split a tab body into the form column and the output column.
pub(super) fn split_columns(area: Rect) -> (Rect, Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    (columns[0], columns[1])
}

fn render_method(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focused() == Field::Method;
    let border = if focused { COLOR_FOCUS } else { COLOR_BORDER };
    let arrow = Style::default().fg(if focused { COLOR_ACCENT } else { COLOR_DIM });
    let line = Line::from(vec![
        Span::styled("◀ ", arrow),
        Span::styled(
            app.method.as_str(),
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", arrow),
    ]);
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Field::Method.title()),
    );
    frame.render_widget(paragraph, area);
}

pub fn render_rest(frame: &mut Frame, app: &mut App, area: Rect) {
    let (form, output) = split_columns(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Percentage(40),
            Constraint::Min(3),
        ])
        .split(form);

    render_method(frame, app, rows[0]);
    draw_field(frame, app, Field::RestUrl, rows[1]);
    draw_field(frame, app, Field::RestHeaders, rows[2]);
    draw_field(frame, app, Field::RestBody, rows[3]);

    let scroll = app.output_scroll[Tab::Rest.index()];
    render_response(frame, output, app.rest_response.as_ref(), scroll);
}

pub fn render_graphql(frame: &mut Frame, app: &mut App, area: Rect) {
    let (form, output) = split_columns(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(25),
            Constraint::Min(5),
            Constraint::Percentage(25),
        ])
        .split(form);

    draw_field(frame, app, Field::GraphqlUrl, rows[0]);
    draw_field(frame, app, Field::GraphqlHeaders, rows[1]);
    draw_field(frame, app, Field::GraphqlQuery, rows[2]);
    draw_field(frame, app, Field::GraphqlVariables, rows[3]);

    let scroll = app.output_scroll[Tab::Graphql.index()];
    render_response(frame, output, app.graphql_response.as_ref(), scroll);
}
