//! Highlight projection and styling
//!
//! This module provides:
//! - Projection of bracket match results into highlight spans
//! - The current-line span
//! - Styles and the per-kind theme used to render spans

mod projector;
mod span;
mod style;
mod theme;

pub use projector::{current_line_span, project, CursorContext, ParenHighlighter};
pub use span::{HighlightKind, HighlightSpan};
pub use style::{Color, Style};
pub use theme::Theme;
