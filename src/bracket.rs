//! Bracket classification

use std::fmt;

/// The three independent bracket pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BracketFamily {
    /// `(` and `)`
    Paren,
    /// `[` and `]`
    Square,
    /// `{` and `}`
    Curly,
}

/// Which half of a pair a bracket is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BracketSide {
    Open,
    Close,
}

/// A bracket character found at a buffer offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketToken {
    pub pos: usize,
    pub family: BracketFamily,
    pub side: BracketSide,
}

impl BracketToken {
    /// Classify `ch` at `pos`; None if it is not a bracket
    pub fn classify(ch: char, pos: usize) -> Option<Self> {
        let (family, side) = match ch {
            '(' => (BracketFamily::Paren, BracketSide::Open),
            ')' => (BracketFamily::Paren, BracketSide::Close),
            '[' => (BracketFamily::Square, BracketSide::Open),
            ']' => (BracketFamily::Square, BracketSide::Close),
            '{' => (BracketFamily::Curly, BracketSide::Open),
            '}' => (BracketFamily::Curly, BracketSide::Close),
            _ => return None,
        };
        Some(Self { pos, family, side })
    }

    pub fn is_open(&self) -> bool {
        self.side == BracketSide::Open
    }

    pub fn is_close(&self) -> bool {
        self.side == BracketSide::Close
    }

    /// The character this token was classified from
    pub fn as_char(&self) -> char {
        match (self.family, self.side) {
            (BracketFamily::Paren, BracketSide::Open) => '(',
            (BracketFamily::Paren, BracketSide::Close) => ')',
            (BracketFamily::Square, BracketSide::Open) => '[',
            (BracketFamily::Square, BracketSide::Close) => ']',
            (BracketFamily::Curly, BracketSide::Open) => '{',
            (BracketFamily::Curly, BracketSide::Close) => '}',
        }
    }
}

impl fmt::Display for BracketToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'@{}", self.as_char(), self.pos)
    }
}

/// Check if a character is any of `()[]{}`
pub fn is_bracket(ch: char) -> bool {
    BracketToken::classify(ch, 0).is_some()
}
