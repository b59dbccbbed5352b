use serde::Serialize;

/// A byte range `[start, end)` into the parsed text.
///
/// Paragraphs and the boundaries between them are all stored as spans, so
/// slicing the source with them reproduces every consumed character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Same span moved `by` bytes to the right.
    #[must_use]
    pub fn offset(self, by: usize) -> Self {
        Self {
            start: self.start + by,
            end: self.end + by,
        }
    }

    pub fn slice(self, source: &str) -> &str {
        &source[self.start..self.end]
    }
}

/// Text of a span, truncated to `max` characters with "..." if needed.
///
/// Used for human-readable snapshot output.
pub fn preview(source: &str, sp: Span, max: usize) -> String {
    let text = sp.slice(source);
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
