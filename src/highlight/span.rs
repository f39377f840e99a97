//! Highlight spans handed to the rendering layer

use std::fmt;

/// What a highlight span marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    /// One half of a matched bracket pair
    ParenMatch,
    /// A bracket without a valid partner
    ParenMismatch,
    /// The line holding the cursor, drawn full width
    CurrentLine,
}

impl HighlightKind {
    /// Get a human-readable name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            HighlightKind::ParenMatch => "paren-match",
            HighlightKind::ParenMismatch => "paren-mismatch",
            HighlightKind::CurrentLine => "current-line",
        }
    }
}

/// A highlighted region: `len` characters starting at `offset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub offset: usize,
    pub len: usize,
    pub kind: HighlightKind,
}

impl HighlightSpan {
    pub fn new(offset: usize, len: usize, kind: HighlightKind) -> Self {
        Self { offset, len, kind }
    }

    /// A span covering the single character at `offset`
    pub fn single(offset: usize, kind: HighlightKind) -> Self {
        Self::new(offset, 1, kind)
    }

    /// Offset one past the last covered character
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Check if this span covers a character offset
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.offset && pos < self.end()
    }
}

impl fmt::Display for HighlightSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{} {}", self.offset, self.len, self.kind.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains() {
        let span = HighlightSpan::new(5, 5, HighlightKind::CurrentLine);
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(span.contains(9));
        assert!(!span.contains(10));
        assert_eq!(span.end(), 10);
    }

    #[test]
    fn test_display() {
        let span = HighlightSpan::single(3, HighlightKind::ParenMismatch);
        assert_eq!(span.to_string(), "3+1 paren-mismatch");
    }
}
