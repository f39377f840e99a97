//! Turning match results into highlight spans

use log::debug;

use super::span::{HighlightKind, HighlightSpan};
use crate::error::Result;
use crate::matcher::{match_backward, match_forward, MatchResult};
use crate::text::TextSource;

/// Spans for a single match result
pub fn project(result: MatchResult) -> Vec<HighlightSpan> {
    match result {
        MatchResult::Matched { open, close } => vec![
            HighlightSpan::single(open, HighlightKind::ParenMatch),
            HighlightSpan::single(close, HighlightKind::ParenMatch),
        ],
        MatchResult::Mismatched { pos } => {
            vec![HighlightSpan::single(pos, HighlightKind::ParenMismatch)]
        }
        MatchResult::NoMatch => Vec::new(),
    }
}

/// Caller-side cursor state that shapes how brackets are looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorContext {
    /// Cursor offset, `0..=len`
    pub position: usize,
    /// Block cursor: the character *under* the cursor counts as before it
    pub overwrite: bool,
    /// Read-only surfaces get no bracket highlighting
    pub read_only: bool,
}

impl CursorContext {
    pub fn at(position: usize) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

/// Holds the bracket span set for one editing surface
///
/// Every update replaces the previous spans wholesale. Other highlights
/// (current line, selection) are kept by the caller.
#[derive(Debug, Default)]
pub struct ParenHighlighter {
    spans: Vec<HighlightSpan>,
}

impl ParenHighlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute bracket spans for a new cursor position
    pub fn update<S: TextSource + ?Sized>(
        &mut self,
        text: &S,
        ctx: CursorContext,
    ) -> Result<&[HighlightSpan]> {
        text.check_cursor(ctx.position)?;
        self.spans.clear();

        if ctx.read_only {
            return Ok(&self.spans);
        }

        let backward_pos = if ctx.overwrite {
            (ctx.position + 1).min(text.len())
        } else {
            ctx.position
        };

        let backward = match_backward(text, backward_pos)?;
        let forward = match_forward(text, ctx.position)?;
        debug!(
            "brackets at {}: backward {}, forward {}",
            ctx.position, backward, forward
        );

        self.spans.extend(project(backward));
        self.spans.extend(project(forward));
        Ok(&self.spans)
    }

    /// Current bracket spans
    pub fn spans(&self) -> &[HighlightSpan] {
        &self.spans
    }

    pub fn clear(&mut self) {
        self.spans.clear();
    }
}

/// Span over the line holding `cursor`, excluding its newline
pub fn current_line_span<S: TextSource + ?Sized>(text: &S, cursor: usize) -> Result<HighlightSpan> {
    text.check_cursor(cursor)?;

    let mut start = cursor;
    while start > 0 && text.char_at(start - 1) != Some('\n') {
        start -= 1;
    }

    let mut end = cursor;
    while let Some(ch) = text.char_at(end) {
        if ch == '\n' {
            break;
        }
        end += 1;
    }

    Ok(HighlightSpan::new(start, end - start, HighlightKind::CurrentLine))
}
