use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::ui::theme::{COLOR_BORDER, COLOR_FOCUS, COLOR_TEXT};

/// An editable text field, single- or multi-line.
///
/// Text is kept as a list of lines with a `(row, column)` cursor counted in
/// chars, so multi-byte input never splits a code point. Single-line fields
/// ignore newlines; pasted text is flattened onto one line.
#[derive(Debug, Clone)]
pub struct TextField {
    lines: Vec<String>,
    row: usize,
    col: usize,
    multiline: bool,
    /// First visible line
    scroll_row: usize,
    /// First visible display column
    scroll_col: usize,
}

impl Default for TextField {
    fn default() -> Self {
        Self::single_line()
    }
}

/// Rewrite `\r\n` and lone `\r` as `\n`.
fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

fn display_width(line: &str, cols: usize) -> usize {
    line.chars().take(cols).filter_map(|c| c.width()).sum()
}

impl TextField {
    pub fn single_line() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            multiline: false,
            scroll_row: 0,
            scroll_col: 0,
        }
    }

    pub fn multi_line() -> Self {
        Self {
            multiline: true,
            ..Self::single_line()
        }
    }

    /// Build a field pre-filled with `text`, cursor at the end.
    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Current contents, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// `(row, column)` of the cursor, in chars.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn set_text(&mut self, text: &str) {
        let text = normalize_line_breaks(text);
        self.lines = if self.multiline {
            text.split('\n').map(str::to_string).collect()
        } else {
            vec![text.replace('\n', " ")]
        };
        self.row = self.lines.len() - 1;
        self.col = self.current_len();
        self.scroll_row = 0;
        self.scroll_col = 0;
    }

    pub fn clear(&mut self) {
        self.set_text("");
    }

    fn current(&self) -> &str {
        &self.lines[self.row]
    }

    fn current_len(&self) -> usize {
        self.current().chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.insert_newline();
            return;
        }
        let at = byte_index(self.current(), self.col);
        self.lines[self.row].insert(at, c);
        self.col += 1;
    }

    /// Insert pasted text at the cursor.
    ///
    /// Terminals often deliver pasted line breaks as bare `\r`; those and
    /// `\r\n` become newlines (spaces in a single-line field).
    pub fn insert_str(&mut self, text: &str) {
        for c in normalize_line_breaks(text).chars() {
            match c {
                '\n' if !self.multiline => self.insert_char(' '),
                _ => self.insert_char(c),
            }
        }
    }

    /// Split the line at the cursor. No-op for single-line fields.
    pub fn insert_newline(&mut self) {
        if !self.multiline {
            return;
        }
        let at = byte_index(self.current(), self.col);
        let rest = self.lines[self.row].split_off(at);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    pub fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            let at = byte_index(self.current(), self.col);
            self.lines[self.row].remove(at);
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.current_len();
            self.lines[self.row].push_str(&line);
        }
    }

    pub fn delete(&mut self) {
        if self.col < self.current_len() {
            let at = byte_index(self.current(), self.col);
            self.lines[self.row].remove(at);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.current_len();
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.current_len() {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.current_len());
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.current_len());
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.current_len();
    }

    /// Scroll so the cursor lies inside a `width` x `height` viewport.
    fn scroll_to_cursor(&mut self, width: usize, height: usize) {
        if height > 0 {
            if self.row < self.scroll_row {
                self.scroll_row = self.row;
            } else if self.row >= self.scroll_row + height {
                self.scroll_row = self.row + 1 - height;
            }
        }
        if width > 0 {
            let cursor_x = display_width(self.current(), self.col);
            if cursor_x < self.scroll_col {
                self.scroll_col = cursor_x;
            } else if cursor_x >= self.scroll_col + width {
                // Leave a cell for the cursor itself
                self.scroll_col = cursor_x + 1 - width;
            }
        }
    }

    /// Screen position of the cursor when drawn into `area` (border
    /// included), if it is visible.
    pub fn cursor_position(&self, area: Rect) -> Option<Position> {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let x = display_width(self.current(), self.col).checked_sub(self.scroll_col)?;
        let y = self.row.checked_sub(self.scroll_row)?;
        if x >= inner.width as usize || y >= inner.height as usize {
            return None;
        }
        Some(Position::new(inner.x + x as u16, inner.y + y as u16))
    }
}

/// Renders a [`TextField`] inside a titled border.
///
/// Rendering adjusts the field's scroll offsets, so the widget borrows the
/// field mutably.
pub struct TextFieldWidget<'a> {
    field: &'a mut TextField,
    title: &'a str,
    focused: bool,
}

impl<'a> TextFieldWidget<'a> {
    pub fn new(field: &'a mut TextField, title: &'a str, focused: bool) -> Self {
        Self {
            field,
            title,
            focused,
        }
    }
}

impl Widget for TextFieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused { COLOR_FOCUS } else { COLOR_BORDER };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(self.title);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let field = self.field;
        field.scroll_to_cursor(inner.width as usize, inner.height as usize);

        let style = Style::default().fg(COLOR_TEXT);
        for (i, line) in field
            .lines
            .iter()
            .skip(field.scroll_row)
            .take(inner.height as usize)
            .enumerate()
        {
            let mut x = 0usize;
            let mut skipped = 0usize;
            for c in line.chars() {
                let w = c.width().unwrap_or(0);
                if skipped < field.scroll_col {
                    skipped += w;
                    continue;
                }
                if x + w > inner.width as usize {
                    break;
                }
                buf.set_string(
                    inner.x + x as u16,
                    inner.y + i as u16,
                    c.to_string(),
                    style,
                );
                x += w;
            }
        }
    }
}
