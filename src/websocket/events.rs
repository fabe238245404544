//! Session log events: what the WebSocket activity pane shows.

use std::fmt;

use chrono::{DateTime, Local};

/// Tag attached to every session log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    /// A message we wrote to the connection
    Sent,
    /// A message read from the connection
    Received,
    Connected,
    /// Session ended, by either side
    Disconnected,
    Error,
    /// Rejected operation that is not a fault
    Info,
}

impl LogKind {
    /// Short marker drawn in front of the line.
    pub fn marker(&self) -> &'static str {
        match self {
            LogKind::Sent => "->",
            LogKind::Received => "<-",
            LogKind::Connected => "++",
            LogKind::Disconnected => "--",
            LogKind::Error => "!!",
            LogKind::Info => "..",
        }
    }
}

/// One line of session activity.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub kind: LogKind,
    pub text: String,
    pub at: DateTime<Local>,
}

impl LogEvent {
    pub fn new(kind: LogKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            at: Local::now(),
        }
    }

    pub fn sent(text: impl Into<String>) -> Self {
        Self::new(LogKind::Sent, text)
    }

    pub fn received(text: impl Into<String>) -> Self {
        Self::new(LogKind::Received, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(LogKind::Error, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(LogKind::Info, text)
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.at.format("%H:%M:%S"),
            self.kind.marker(),
            self.text
        )
    }
}
