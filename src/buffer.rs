//! Text buffer - a flat character sequence with a cursor, mark and modes
//!
//! Offsets count `char`s, so they line up with what the matcher sees.
//! The cursor ranges over `0..=len`.

use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::error::{ParenError, Result};
use crate::text::TextSource;

/// Buffer modes
#[derive(Debug, Clone, Copy, Default)]
pub struct BufferModes {
    pub view: bool,      // Read-only view mode
    pub overwrite: bool, // Overwrite mode
}

/// A buffer containing text, cursor state and metadata
#[derive(Debug)]
pub struct TextBuffer {
    /// Buffer contents
    chars: Vec<char>,
    /// Cursor offset
    cursor: usize,
    /// Other end of the selection, if a mark is set
    mark: Option<usize>,
    /// Column remembered across vertical moves
    goal_col: Option<usize>,
    /// Buffer name (e.g., "main.mo", "*scratch*")
    name: String,
    /// Associated file path (None for unnamed buffers)
    filename: Option<PathBuf>,
    /// Whether buffer has unsaved changes
    modified: bool,
    /// Buffer modes
    modes: BufferModes,
}

impl TextBuffer {
    /// Create a new empty buffer with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            chars: Vec::new(),
            cursor: 0,
            mark: None,
            goal_col: None,
            name: name.into(),
            filename: None,
            modified: false,
            modes: BufferModes::default(),
        }
    }

    /// Create a buffer holding `text`
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let mut buf = Self::new(name);
        buf.chars = text.chars().collect();
        buf
    }

    /// Create a buffer from file contents
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        let mut buf = Self::from_text(name, &content);
        buf.filename = Some(path.to_path_buf());
        Ok(buf)
    }

    /// Get buffer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get filename if set
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Set the filename
    pub fn set_filename(&mut self, path: PathBuf) {
        self.filename = Some(path);
    }

    /// Check if buffer is modified
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Get buffer modes
    pub fn modes(&self) -> &BufferModes {
        &self.modes
    }

    /// Get mutable buffer modes
    pub fn modes_mut(&mut self) -> &mut BufferModes {
        &mut self.modes
    }

    /// Buffer contents as a string
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor to `pos`; positions past the end are rejected
    pub fn set_cursor(&mut self, pos: usize) -> Result<()> {
        self.check_cursor(pos)?;
        self.cursor = pos;
        self.goal_col = None;
        Ok(())
    }

    // ---- mark / selection ----

    /// Set the mark at the cursor
    pub fn set_mark(&mut self) {
        self.mark = Some(self.cursor);
    }

    pub fn clear_mark(&mut self) {
        self.mark = None;
    }

    pub fn has_mark(&self) -> bool {
        self.mark.is_some()
    }

    /// Region between mark and cursor, normalized so start <= end
    pub fn selection(&self) -> Option<Range<usize>> {
        let mark = self.mark?;
        if mark <= self.cursor {
            Some(mark..self.cursor)
        } else {
            Some(self.cursor..mark)
        }
    }

    // ---- lines ----

    /// Number of lines (an empty buffer has one)
    pub fn line_count(&self) -> usize {
        self.chars.iter().filter(|&&c| c == '\n').count() + 1
    }

    /// Line and column (both 0-based, column in chars) of an offset
    pub fn line_col(&self, pos: usize) -> (usize, usize) {
        let pos = pos.min(self.chars.len());
        let before = &self.chars[..pos];
        let line = before.iter().filter(|&&c| c == '\n').count();
        let col = before.iter().rev().take_while(|&&c| c != '\n').count();
        (line, col)
    }

    /// Offsets of a line's characters, excluding its newline
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        let mut start = 0;
        for _ in 0..line {
            let nl = self.chars[start..].iter().position(|&c| c == '\n')?;
            start += nl + 1;
        }
        let end = self.chars[start..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(self.chars.len(), |nl| start + nl);
        Some(start..end)
    }

    /// Characters of a line, excluding its newline
    pub fn line_chars(&self, line: usize) -> Option<&[char]> {
        self.line_range(line).map(|r| &self.chars[r])
    }

    // ---- cursor motion ----

    pub fn move_left(&mut self) -> bool {
        self.goal_col = None;
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        self.goal_col = None;
        if self.cursor >= self.chars.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn move_up(&mut self) -> bool {
        let (line, col) = self.line_col(self.cursor);
        if line == 0 {
            return false;
        }
        self.move_to_line(line - 1, col)
    }

    pub fn move_down(&mut self) -> bool {
        let (line, col) = self.line_col(self.cursor);
        if line + 1 >= self.line_count() {
            return false;
        }
        self.move_to_line(line + 1, col)
    }

    /// Move by `count` lines, keeping the goal column
    pub fn move_lines(&mut self, count: isize) -> bool {
        let (line, col) = self.line_col(self.cursor);
        let last = self.line_count() - 1;
        let target = line.saturating_add_signed(count).min(last);
        if target == line {
            return false;
        }
        self.move_to_line(target, col)
    }

    fn move_to_line(&mut self, line: usize, col: usize) -> bool {
        let goal = *self.goal_col.get_or_insert(col);
        match self.line_range(line) {
            Some(range) => {
                self.cursor = (range.start + goal).min(range.end);
                true
            }
            None => false,
        }
    }

    pub fn move_line_start(&mut self) {
        let (line, _) = self.line_col(self.cursor);
        if let Some(range) = self.line_range(line) {
            self.cursor = range.start;
        }
        self.goal_col = None;
    }

    pub fn move_line_end(&mut self) {
        let (line, _) = self.line_col(self.cursor);
        if let Some(range) = self.line_range(line) {
            self.cursor = range.end;
        }
        self.goal_col = None;
    }

    pub fn move_buffer_start(&mut self) {
        self.cursor = 0;
        self.goal_col = None;
    }

    pub fn move_buffer_end(&mut self) {
        self.cursor = self.chars.len();
        self.goal_col = None;
    }

    // ---- editing ----

    fn check_writable(&self) -> Result<()> {
        if self.modes.view {
            return Err(ParenError::ReadOnly);
        }
        Ok(())
    }

    /// Insert a character at the cursor
    ///
    /// In overwrite mode the character under the cursor is replaced, unless
    /// it is a newline or the cursor is at the end.
    pub fn insert_char(&mut self, ch: char) -> Result<()> {
        self.check_writable()?;
        let replace = self.modes.overwrite
            && ch != '\n'
            && matches!(self.chars.get(self.cursor), Some(&c) if c != '\n');
        if replace {
            self.chars[self.cursor] = ch;
        } else {
            self.chars.insert(self.cursor, ch);
            self.shift_mark(self.cursor, 1);
        }
        self.cursor += 1;
        self.goal_col = None;
        self.modified = true;
        Ok(())
    }

    /// Delete the character before the cursor (backspace)
    pub fn delete_backward(&mut self) -> Result<Option<char>> {
        self.check_writable()?;
        if self.cursor == 0 {
            return Ok(None);
        }
        self.cursor -= 1;
        let ch = self.chars.remove(self.cursor);
        self.shift_mark(self.cursor, -1);
        self.goal_col = None;
        self.modified = true;
        Ok(Some(ch))
    }

    /// Delete the character under the cursor
    pub fn delete_forward(&mut self) -> Result<Option<char>> {
        self.check_writable()?;
        if self.cursor >= self.chars.len() {
            return Ok(None);
        }
        let ch = self.chars.remove(self.cursor);
        self.shift_mark(self.cursor, -1);
        self.goal_col = None;
        self.modified = true;
        Ok(Some(ch))
    }

    /// Keep the mark on the same character across an edit at `at`
    fn shift_mark(&mut self, at: usize, delta: isize) {
        if let Some(mark) = self.mark.as_mut() {
            if *mark > at {
                *mark = mark.saturating_add_signed(delta);
            }
        }
    }

    // ---- files ----

    /// Write buffer to its file
    pub fn save(&mut self) -> Result<()> {
        match self.filename.clone() {
            Some(path) => {
                self.write_to(&path)?;
                self.modified = false;
                Ok(())
            }
            None => Err(ParenError::Message("No filename set".to_string())),
        }
    }

    /// Write buffer to a specific path
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.text())?;
        Ok(())
    }
}

impl TextSource for TextBuffer {
    fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    fn len(&self) -> usize {
        self.chars.len()
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new("*scratch*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let buf = TextBuffer::from_text("t", "ab\ncde\n");
        assert_eq!(buf.line_col(0), (0, 0));
        assert_eq!(buf.line_col(2), (0, 2));
        assert_eq!(buf.line_col(3), (1, 0));
        assert_eq!(buf.line_col(5), (1, 2));
        assert_eq!(buf.line_col(7), (2, 0));
        assert_eq!(buf.line_count(), 3);
    }

    #[test]
    fn test_line_range() {
        let buf = TextBuffer::from_text("t", "ab\ncde\n");
        assert_eq!(buf.line_range(0), Some(0..2));
        assert_eq!(buf.line_range(1), Some(3..6));
        assert_eq!(buf.line_range(2), Some(7..7));
        assert_eq!(buf.line_range(3), None);
        assert_eq!(buf.line_chars(1), Some(&['c', 'd', 'e'][..]));
    }

    #[test]
    fn test_set_cursor_validates() {
        let mut buf = TextBuffer::from_text("t", "abc");
        assert!(buf.set_cursor(3).is_ok());
        assert!(matches!(
            buf.set_cursor(4),
            Err(ParenError::InvalidPosition { pos: 4, len: 3 })
        ));
        assert_eq!(buf.cursor(), 3);
    }

    #[test]
    fn test_vertical_motion_keeps_goal_column() {
        let mut buf = TextBuffer::from_text("t", "abcdef\nx\nabcdef");
        buf.set_cursor(4).unwrap();
        assert!(buf.move_down());
        assert_eq!(buf.cursor(), 8); // clamped to end of "x"
        assert!(buf.move_down());
        assert_eq!(buf.line_col(buf.cursor()), (2, 4));
        assert!(!buf.move_down());
        assert!(buf.move_lines(-5));
        assert_eq!(buf.line_col(buf.cursor()), (0, 4));
    }

    #[test]
    fn test_line_start_end() {
        let mut buf = TextBuffer::from_text("t", "ab\ncde");
        buf.set_cursor(4).unwrap();
        buf.move_line_start();
        assert_eq!(buf.cursor(), 3);
        buf.move_line_end();
        assert_eq!(buf.cursor(), 6);
        buf.move_buffer_start();
        assert_eq!(buf.cursor(), 0);
        assert!(!buf.move_left());
    }

    #[test]
    fn test_insert_and_delete() {
        let mut buf = TextBuffer::from_text("t", "()");
        buf.set_cursor(1).unwrap();
        buf.insert_char('x').unwrap();
        assert_eq!(buf.text(), "(x)");
        assert_eq!(buf.cursor(), 2);
        assert!(buf.is_modified());

        assert_eq!(buf.delete_backward().unwrap(), Some('x'));
        assert_eq!(buf.delete_forward().unwrap(), Some(')'));
        assert_eq!(buf.text(), "(");
        assert_eq!(buf.delete_forward().unwrap(), None);
    }

    #[test]
    fn test_overwrite_mode() {
        let mut buf = TextBuffer::from_text("t", "a(\nb");
        buf.modes_mut().overwrite = true;
        buf.set_cursor(1).unwrap();
        buf.insert_char('[').unwrap();
        assert_eq!(buf.text(), "a[\nb");
        // Newlines are never overwritten
        buf.insert_char(']').unwrap();
        assert_eq!(buf.text(), "a[]\nb");
        buf.move_buffer_end();
        buf.insert_char('!').unwrap();
        assert_eq!(buf.text(), "a[]\nb!");
    }

    #[test]
    fn test_view_mode_refuses_edits() {
        let mut buf = TextBuffer::from_text("t", "abc");
        buf.modes_mut().view = true;
        assert!(matches!(buf.insert_char('x'), Err(ParenError::ReadOnly)));
        assert!(matches!(buf.delete_backward(), Err(ParenError::ReadOnly)));
        assert_eq!(buf.text(), "abc");
    }

    #[test]
    fn test_selection_normalized() {
        let mut buf = TextBuffer::from_text("t", "abcdef");
        buf.set_cursor(4).unwrap();
        buf.set_mark();
        buf.set_cursor(1).unwrap();
        assert_eq!(buf.selection(), Some(1..4));
        buf.insert_char('x').unwrap();
        assert_eq!(buf.selection(), Some(2..5));
        buf.clear_mark();
        assert_eq!(buf.selection(), None);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.mo");
        std::fs::write(&path, "model M\n  x = (1 + 2);\nend M;\n").unwrap();

        let mut buf = TextBuffer::from_file(&path).unwrap();
        assert_eq!(buf.name(), "model.mo");
        buf.move_buffer_end();
        buf.insert_char('\n').unwrap();
        buf.save().unwrap();
        assert!(!buf.is_modified());

        let saved = std::fs::read_to_string(&path).unwrap();
        assert_eq!(saved, "model M\n  x = (1 + 2);\nend M;\n\n");
    }

    #[test]
    fn test_save_without_filename() {
        let mut buf = TextBuffer::default();
        assert!(matches!(buf.save(), Err(ParenError::Message(_))));
    }
}
