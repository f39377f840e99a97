//! Read-only text access
//!
//! The matcher only ever needs two things from a text surface: the
//! character at an offset and the total length. Offsets count `char`s.

use crate::error::{ParenError, Result};

/// Narrow read capability over a text surface
pub trait TextSource {
    /// Character at `offset`, or None past the end
    fn char_at(&self, offset: usize) -> Option<char>;

    /// Number of characters
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reject a cursor position outside `0..=len`
    fn check_cursor(&self, pos: usize) -> Result<()> {
        let len = self.len();
        if pos > len {
            return Err(ParenError::InvalidPosition { pos, len });
        }
        Ok(())
    }
}

impl TextSource for [char] {
    fn char_at(&self, offset: usize) -> Option<char> {
        self.get(offset).copied()
    }

    fn len(&self) -> usize {
        <[char]>::len(self)
    }
}

impl TextSource for Vec<char> {
    fn char_at(&self, offset: usize) -> Option<char> {
        self.as_slice().char_at(offset)
    }

    fn len(&self) -> usize {
        self.as_slice().len()
    }
}
