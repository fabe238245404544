//! Header parsing and the ordered header collection.
//!
//! User-entered headers arrive as a free-form text block, one `Name: Value`
//! pair per line. [`parse_headers`] turns that block into a [`HeaderSet`],
//! which is also used to carry response headers back to the UI.

use std::fmt;

use thiserror::Error;

/// A header line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid header line (missing colon): {line}")]
pub struct HeaderParseError {
    /// The offending line, verbatim
    pub line: String,
}

/// Ordered collection of header name/value pairs.
///
/// Insertion order is preserved. Inserting an existing name replaces the
/// value in place, so the name keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    /// Create an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, replacing the value of an existing entry with the
    /// same name. Returns the previous value if there was one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Insert a header, joining with `", "` onto an existing value of the
    /// same name instead of replacing it.
    pub fn append_joined(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => {
                slot.push_str(", ");
                slot.push_str(&value);
            }
            None => self.entries.push((name, value)),
        }
    }

    /// Look up a header value by exact name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether a header with this name exists, ignoring ASCII case.
    pub fn contains_ignore_case(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = HeaderSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

impl IntoIterator for HeaderSet {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for HeaderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}

/// Characters that end a line of header text: `\n`, `\r` (alone or before
/// `\n`), and the other Unicode line and paragraph separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Parse a block of header lines into a [`HeaderSet`].
///
/// Blank lines are skipped. Every other line must contain a colon; the line
/// is split on the first colon only and both halves are trimmed. Parsing
/// stops at the first line without a colon. Repeated names keep the last
/// value.
pub fn parse_headers(raw: &str) -> Result<HeaderSet, HeaderParseError> {
    let mut headers = HeaderSet::new();
    // A `\r\n` pair yields an empty piece between the two, skipped as blank
    for line in raw.split(is_line_break) {
        if line.trim().is_empty() {
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            return Err(HeaderParseError {
                line: line.to_string(),
            });
        };
        headers.insert(name.trim(), value.trim());
    }
    Ok(headers)
}
