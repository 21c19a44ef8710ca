//! Line classifier for the outline format.
//!
//! The outline is one entry per line. A line whose trimmed text starts with
//! `"* "` declares a category; any other non-blank line is an item. Blank
//! and whitespace-only lines carry no meaning and are discarded here so the
//! table builder never sees them.

/// Marker that opens a category header.
pub const HEADER_MARKER: &str = "* ";

const BOM: char = '\u{feff}';

/// A non-blank outline line, tagged by kind, with its trimmed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Category header; the marker has been stripped.
    Header(String),
    /// Item line, attributed later to the current category.
    Item(String),
}

impl Line {
    /// Trimmed payload, without the header marker.
    pub fn text(&self) -> &str {
        match self {
            Line::Header(text) | Line::Item(text) => text,
        }
    }
}

/// Classify a single raw line. Returns `None` for blank lines.
pub fn classify_line(raw: &str) -> Option<Line> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.strip_prefix(HEADER_MARKER) {
        Some(rest) => Some(Line::Header(rest.trim().to_string())),
        None => Some(Line::Item(trimmed.to_string())),
    }
}

/// Classify every line of `text` in order, dropping blanks.
///
/// `\n`, `\r\n` and a bare `\r` all end a line.
pub fn classify_lines(text: &str) -> Vec<Line> {
    text.strip_prefix(BOM)
        .unwrap_or(text)
        .split(['\r', '\n'])
        .filter_map(classify_line)
        .collect()
}
