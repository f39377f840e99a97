//! parenlight - bracket matching and highlighting for text editors
//!
//! The core is two pure scans, [`match_backward`] and [`match_forward`],
//! over any [`TextSource`]. [`ParenHighlighter`] turns their results into
//! highlight spans for a renderer. The remaining modules make up a small
//! terminal preview editor built on top of them.

pub mod bracket;
pub mod buffer;
pub mod config;
pub mod display;
pub mod error;
pub mod highlight;
pub mod input;
pub mod matcher;
pub mod terminal;
pub mod text;
pub mod viewer;

pub use bracket::{BracketFamily, BracketSide, BracketToken};
pub use buffer::TextBuffer;
pub use error::{ParenError, Result};
pub use highlight::{
    current_line_span, project, CursorContext, HighlightKind, HighlightSpan, ParenHighlighter,
};
pub use matcher::{match_backward, match_forward, MatchResult};
pub use text::TextSource;
