//! Styles for each highlight kind

use super::span::HighlightKind;
use super::style::{Color, Style};

/// Per-kind highlight styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub paren_match: Style,
    pub paren_mismatch: Style,
    pub current_line: Style,
    /// Style of the marked region
    pub selection: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            paren_match: Style::fg(Color::Red).with_bg(Color::Rgb(160, 238, 160)),
            paren_mismatch: Style::bg(Color::Red),
            current_line: Style::bg(Color::Rgb(232, 242, 254)),
            selection: Style::reverse(),
        }
    }
}

impl Theme {
    pub fn style_for(&self, kind: HighlightKind) -> Style {
        match kind {
            HighlightKind::ParenMatch => self.paren_match,
            HighlightKind::ParenMismatch => self.paren_mismatch,
            HighlightKind::CurrentLine => self.current_line,
        }
    }
}
