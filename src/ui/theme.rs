//! Color theme constants for the workbench UI
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::Color;

use crate::websocket::LogKind;

// ============================================================================
// Minimal Dark Color Theme
// ============================================================================

/// Border of unfocused panes - dark gray for minimal aesthetic
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Border of the focused field
pub const COLOR_FOCUS: Color = Color::Cyan;

/// Editable text
pub const COLOR_TEXT: Color = Color::White;

/// Accent color - white for highlights and the active tab
pub const COLOR_ACCENT: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

// ============================================================================
// Response Colors
// ============================================================================

/// 2xx status line - green #04B575
pub const COLOR_SUCCESS: Color = Color::Rgb(4, 181, 117);

/// Non-2xx status line
pub const COLOR_WARNING: Color = Color::Yellow;

/// Errors
pub const COLOR_ERROR: Color = Color::Red;

/// Header names in the response pane - blue #007ACC
pub const COLOR_HEADER_NAME: Color = Color::Rgb(0, 122, 204);

// ============================================================================
// Activity Log Colors
// ============================================================================

/// Color for an activity log marker.
pub fn log_kind_color(kind: LogKind) -> Color {
    match kind {
        LogKind::Sent => Color::Magenta,
        LogKind::Received => Color::Cyan,
        LogKind::Connected => COLOR_SUCCESS,
        LogKind::Disconnected => COLOR_WARNING,
        LogKind::Error => COLOR_ERROR,
        LogKind::Info => Color::Gray,
    }
}
