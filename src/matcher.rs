//! Bracket matching
//!
//! Both scans are pure functions of a `TextSource` and a cursor offset.
//! The cursor sits *between* characters: the backward scan looks at the
//! character just before it, the forward scan at the character just after.
//!
//! Depth is counted across all three families. When it returns to zero the
//! bracket reached is the partner, and the pair only matches if the partner
//! belongs to the same family as the origin. So `(a]` is a mismatch at `]`,
//! and `([)]` is a mismatch as well.

use std::fmt;

use log::trace;

use crate::bracket::{BracketSide, BracketToken};
use crate::error::Result;
use crate::text::TextSource;

/// Outcome of one directional scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// A same-family pair; `open < close`
    Matched { open: usize, close: usize },
    /// The bracket at `pos` has no partner, or its partner is the wrong family
    Mismatched { pos: usize },
    /// No bracket of the scanned side next to the cursor
    NoMatch,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, MatchResult::Mismatched { .. })
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::Matched { open, close } => write!(f, "matched {}..{}", open, close),
            MatchResult::Mismatched { pos } => write!(f, "mismatched at {}", pos),
            MatchResult::NoMatch => write!(f, "no match"),
        }
    }
}

/// Match the closing bracket just before `cursor` against an earlier opener
pub fn match_backward<S: TextSource + ?Sized>(text: &S, cursor: usize) -> Result<MatchResult> {
    text.check_cursor(cursor)?;

    let origin = match cursor.checked_sub(1).and_then(|pos| token_at(text, pos)) {
        Some(tok) if tok.is_close() => tok,
        _ => return Ok(MatchResult::NoMatch),
    };

    Ok(scan(text, origin, (0..origin.pos).rev()))
}

/// Match the opening bracket just after `cursor` against a later closer
pub fn match_forward<S: TextSource + ?Sized>(text: &S, cursor: usize) -> Result<MatchResult> {
    text.check_cursor(cursor)?;

    let origin = match token_at(text, cursor) {
        Some(tok) if tok.is_open() => tok,
        _ => return Ok(MatchResult::NoMatch),
    };

    Ok(scan(text, origin, origin.pos + 1..text.len()))
}

fn token_at<S: TextSource + ?Sized>(text: &S, pos: usize) -> Option<BracketToken> {
    text.char_at(pos).and_then(|ch| BracketToken::classify(ch, pos))
}

/// Walk `positions` away from `origin` until depth returns to zero
fn scan<S, I>(text: &S, origin: BracketToken, positions: I) -> MatchResult
where
    S: TextSource + ?Sized,
    I: Iterator<Item = usize>,
{
    let mut depth = 1usize;

    for pos in positions {
        let tok = match token_at(text, pos) {
            Some(tok) => tok,
            None => continue,
        };

        if tok.side == origin.side {
            depth += 1;
            continue;
        }

        depth -= 1;
        if depth == 0 {
            if tok.family != origin.family {
                trace!("{} closed by wrong family {}", origin, tok);
                return MatchResult::Mismatched { pos: origin.pos };
            }
            return match origin.side {
                BracketSide::Open => MatchResult::Matched { open: origin.pos, close: tok.pos },
                BracketSide::Close => MatchResult::Matched { open: tok.pos, close: origin.pos },
            };
        }
    }

    trace!("{} unterminated", origin);
    MatchResult::Mismatched { pos: origin.pos }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParenError;
    use proptest::prelude::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_backward_simple_match() {
        let text = chars("(abc)");
        assert_eq!(
            match_backward(&text, 5).unwrap(),
            MatchResult::Matched { open: 0, close: 4 }
        );
    }

    #[test]
    fn test_backward_family_mismatch() {
        let text = chars("(abc]");
        assert_eq!(match_backward(&text, 5).unwrap(), MatchResult::Mismatched { pos: 4 });
    }

    #[test]
    fn test_forward_unterminated() {
        let text = chars("(ab");
        assert_eq!(match_forward(&text, 0).unwrap(), MatchResult::Mismatched { pos: 0 });
    }

    #[test]
    fn test_backward_unterminated() {
        let text = chars("ab)");
        assert_eq!(match_backward(&text, 3).unwrap(), MatchResult::Mismatched { pos: 2 });
    }

    #[test]
    fn test_empty_buffer() {
        let text = chars("");
        assert_eq!(match_backward(&text, 0).unwrap(), MatchResult::NoMatch);
        assert_eq!(match_forward(&text, 0).unwrap(), MatchResult::NoMatch);
    }

    #[test]
    fn test_nesting_depth() {
        let text = chars("((a)(b))");
        assert_eq!(
            match_backward(&text, 8).unwrap(),
            MatchResult::Matched { open: 0, close: 7 }
        );
        assert_eq!(
            match_forward(&text, 0).unwrap(),
            MatchResult::Matched { open: 0, close: 7 }
        );
        assert_eq!(
            match_forward(&text, 4).unwrap(),
            MatchResult::Matched { open: 4, close: 6 }
        );
    }

    #[test]
    fn test_mixed_families_nest() {
        let text = chars("{ [ (x) ] }");
        assert_eq!(
            match_forward(&text, 0).unwrap(),
            MatchResult::Matched { open: 0, close: 10 }
        );
        assert_eq!(
            match_backward(&text, 9).unwrap(),
            MatchResult::Matched { open: 2, close: 8 }
        );
    }

    #[test]
    fn test_crossed_pairs_mismatch() {
        let text = chars("([)]");
        assert_eq!(match_backward(&text, 4).unwrap(), MatchResult::Mismatched { pos: 3 });
        assert_eq!(match_forward(&text, 0).unwrap(), MatchResult::Mismatched { pos: 0 });
    }

    #[test]
    fn test_wrong_side_is_no_match() {
        let text = chars("(a)");
        // Opening bracket before the cursor, closing one after it
        assert_eq!(match_backward(&text, 1).unwrap(), MatchResult::NoMatch);
        assert_eq!(match_forward(&text, 2).unwrap(), MatchResult::NoMatch);
    }

    #[test]
    fn test_match_across_lines() {
        let text = chars("fn f() {\n    x\n}");
        assert_eq!(
            match_forward(&text, 7).unwrap(),
            MatchResult::Matched { open: 7, close: 15 }
        );
        assert_eq!(
            match_backward(&text, 16).unwrap(),
            MatchResult::Matched { open: 7, close: 15 }
        );
    }

    #[test]
    fn test_multibyte_offsets() {
        let text = chars("(é)");
        assert_eq!(
            match_backward(&text, 3).unwrap(),
            MatchResult::Matched { open: 0, close: 2 }
        );
    }

    #[test]
    fn test_cursor_out_of_range() {
        let text = chars("()");
        assert!(matches!(
            match_backward(&text, 3),
            Err(ParenError::InvalidPosition { pos: 3, len: 2 })
        ));
        assert!(matches!(
            match_forward(&text, 9),
            Err(ParenError::InvalidPosition { pos: 9, len: 2 })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(MatchResult::Matched { open: 1, close: 4 }.to_string(), "matched 1..4");
        assert_eq!(MatchResult::Mismatched { pos: 2 }.to_string(), "mismatched at 2");
        assert_eq!(MatchResult::NoMatch.to_string(), "no match");
    }

    fn bracketish() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[()\\[\\]{}ab \n]{0,40}").unwrap()
    }

    proptest! {
        #[test]
        fn prop_scans_leave_buffer_untouched(s in bracketish(), seed in 0usize..64) {
            let text = chars(&s);
            let before = text.clone();
            let cursor = seed % (text.len() + 1);
            match_backward(&text, cursor).unwrap();
            match_forward(&text, cursor).unwrap();
            prop_assert_eq!(text, before);
        }

        #[test]
        fn prop_backward_needs_bracket_before_cursor(s in bracketish(), seed in 1usize..64) {
            let text = chars(&s);
            prop_assume!(!text.is_empty());
            let cursor = 1 + seed % text.len();
            if !crate::bracket::is_bracket(text[cursor - 1]) {
                prop_assert_eq!(match_backward(&text, cursor).unwrap(), MatchResult::NoMatch);
            }
        }

        #[test]
        fn prop_matches_are_consistent(s in bracketish(), seed in 0usize..64) {
            let text = chars(&s);
            let cursor = seed % (text.len() + 1);
            if let MatchResult::Matched { open, close } = match_backward(&text, cursor).unwrap() {
                prop_assert!(open < close);
                prop_assert_eq!(close + 1, cursor);
                // The forward scan from the opener agrees
                prop_assert_eq!(
                    match_forward(&text, open).unwrap(),
                    MatchResult::Matched { open, close }
                );
            }
        }
    }
}
