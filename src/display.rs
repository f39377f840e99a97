//! Display rendering
//!
//! The screen is the text area, a mode line and a message line. Each text
//! row is built as a list of styled runs first, so layout stays testable
//! without a terminal.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

use crate::buffer::TextBuffer;
use crate::error::Result;
use crate::highlight::{Color, HighlightKind, HighlightSpan, Style, Theme};
use crate::terminal::Terminal;

/// A piece of a screen row drawn in one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: Style,
}

/// Everything the renderer needs to style one line
pub struct LineContext<'a> {
    /// Offset of the line's first character
    pub start: usize,
    pub spans: &'a [HighlightSpan],
    pub selection: Option<&'a Range<usize>>,
    pub theme: &'a Theme,
    pub tab_width: usize,
}

impl LineContext<'_> {
    /// Whether a current-line span starts at this line
    fn is_current_line(&self) -> bool {
        self.spans
            .iter()
            .any(|s| s.kind == HighlightKind::CurrentLine && s.offset == self.start)
    }

    /// Layered style of the character at `offset`
    fn style_at(&self, base: Style, offset: usize) -> Style {
        let mut style = base;
        for span in self.spans {
            if span.kind != HighlightKind::CurrentLine && span.contains(offset) {
                style = style.layered(self.theme.style_for(span.kind));
            }
        }
        if self.selection.is_some_and(|sel| sel.contains(&offset)) {
            style = style.layered(self.theme.selection);
        }
        style
    }
}

/// Lay out one line into styled runs, at most `max_cols` columns wide
///
/// A current line is padded to the full width with its style.
pub fn line_runs(chars: &[char], ctx: &LineContext<'_>, max_cols: usize) -> Vec<Run> {
    let base = if ctx.is_current_line() {
        ctx.theme.current_line
    } else {
        Style::default()
    };

    let mut runs: Vec<Run> = Vec::new();
    let mut col = 0;

    for (i, &ch) in chars.iter().enumerate() {
        let (text, width) = render_char(ch, col, ctx.tab_width);
        if col + width > max_cols {
            break;
        }
        push_run(&mut runs, &text, ctx.style_at(base, ctx.start + i));
        col += width;
    }

    if !base.is_default() && col < max_cols {
        push_run(&mut runs, &" ".repeat(max_cols - col), base);
    }

    runs
}

fn push_run(runs: &mut Vec<Run>, text: &str, style: Style) {
    match runs.last_mut() {
        Some(last) if last.style == style => last.text.push_str(text),
        _ => runs.push(Run {
            text: text.to_string(),
            style,
        }),
    }
}

/// Screen text and width of a character at display column `col`
fn render_char(ch: char, col: usize, tab_width: usize) -> (String, usize) {
    if ch == '\t' {
        let width = tab_width - col % tab_width;
        return (" ".repeat(width), width);
    }
    if ch.is_control() {
        return ("?".to_string(), 1);
    }
    (ch.to_string(), ch.width().unwrap_or(1))
}

/// Display column of character index `col` within a line
pub fn display_col(chars: &[char], col: usize, tab_width: usize) -> usize {
    chars
        .iter()
        .take(col)
        .fold(0, |acc, &ch| acc + render_char(ch, acc, tab_width).1)
}

/// Display state
pub struct Display {
    /// First buffer line shown
    top_line: usize,
    /// Message to show in the message line (bottom line)
    message: Option<String>,
}

impl Display {
    pub fn new() -> Self {
        Self {
            top_line: 0,
            message: None,
        }
    }

    /// Set a message to display
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Clear the message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Rows available for text
    pub fn text_rows(terminal: &Terminal) -> usize {
        (terminal.rows() as usize).saturating_sub(2).max(1)
    }

    /// Scroll so that `line` is visible in a window of `height` rows
    pub fn scroll_to(&mut self, line: usize, height: usize) {
        if line < self.top_line {
            self.top_line = line;
        } else if line >= self.top_line + height {
            self.top_line = line + 1 - height;
        }
    }

    /// Render the whole screen
    pub fn render(
        &mut self,
        terminal: &mut Terminal,
        buffer: &TextBuffer,
        spans: &[HighlightSpan],
        theme: &Theme,
        tab_width: usize,
    ) -> Result<()> {
        let cols = terminal.cols() as usize;
        let height = Self::text_rows(terminal);
        let (cursor_line, cursor_col) = buffer.line_col(buffer.cursor());
        self.scroll_to(cursor_line, height);

        terminal.set_cursor_visible(false)?;
        let selection = buffer.selection();

        for row in 0..height {
            let line_idx = self.top_line + row;
            terminal.move_cursor(row as u16, 0)?;

            match (buffer.line_range(line_idx), buffer.line_chars(line_idx)) {
                (Some(range), Some(chars)) => {
                    let ctx = LineContext {
                        start: range.start,
                        spans,
                        selection: selection.as_ref(),
                        theme,
                        tab_width,
                    };
                    for run in line_runs(chars, &ctx, cols) {
                        terminal.set_style(run.style)?;
                        terminal.write_str(&run.text)?;
                    }
                    terminal.reset_attributes()?;
                }
                _ => {
                    // Empty line indicator (like vim's ~)
                    terminal.set_style(Style::fg(Color::BrightBlack))?;
                    terminal.write_char('~')?;
                    terminal.reset_attributes()?;
                }
            }
            terminal.clear_to_eol()?;
        }

        self.render_mode_line(terminal, buffer, height as u16, cols)?;
        self.render_message_line(terminal, height as u16 + 1, cols)?;

        // Position cursor
        let screen_col = buffer
            .line_chars(cursor_line)
            .map_or(0, |chars| display_col(chars, cursor_col, tab_width));
        let screen_row = (cursor_line - self.top_line) as u16;
        terminal.move_cursor(screen_row, screen_col.min(cols.saturating_sub(1)) as u16)?;
        terminal.set_cursor_shape(buffer.modes().overwrite)?;
        terminal.set_cursor_visible(true)?;
        terminal.flush()?;
        Ok(())
    }

    /// Render the mode line
    fn render_mode_line(
        &self,
        terminal: &mut Terminal,
        buffer: &TextBuffer,
        row: u16,
        cols: usize,
    ) -> Result<()> {
        terminal.move_cursor(row, 0)?;
        terminal.set_style(Style::reverse())?;

        let mode_line = mode_line_text(buffer);
        let width: usize = mode_line.chars().map(|c| c.width().unwrap_or(1)).sum();
        let padded = if width < cols {
            format!("{}{}", mode_line, "-".repeat(cols - width))
        } else {
            truncate_to_width(&mode_line, cols)
        };

        terminal.write_str(&padded)?;
        terminal.reset_attributes()?;
        Ok(())
    }

    /// Render the message line
    fn render_message_line(&self, terminal: &mut Terminal, row: u16, cols: usize) -> Result<()> {
        terminal.move_cursor(row, 0)?;

        if let Some(ref msg) = self.message {
            let truncated = truncate_to_width(msg, cols);
            terminal.write_str(&truncated)?;
        }

        terminal.clear_to_eol()?;
        Ok(())
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

/// Format: `-- parenlight: name (file) L3:C7 INS --`
fn mode_line_text(buffer: &TextBuffer) -> String {
    let modified = if buffer.is_modified() { "**" } else { "--" };
    let filename = buffer
        .filename()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "no file".to_string());
    let (line, col) = buffer.line_col(buffer.cursor());
    let mode = if buffer.modes().view {
        "VIEW"
    } else if buffer.modes().overwrite {
        "OVR"
    } else {
        "INS"
    };

    format!(
        "{} parenlight: {} ({}) L{}:C{} {} ",
        modified,
        buffer.name(),
        filename,
        line + 1,
        col + 1,
        mode
    )
}

/// Truncate a string to fit within a display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn ctx<'a>(start: usize, spans: &'a [HighlightSpan], theme: &'a Theme) -> LineContext<'a> {
        LineContext {
            start,
            spans,
            selection: None,
            theme,
            tab_width: 4,
        }
    }

    #[test]
    fn test_plain_line_single_run() {
        let theme = Theme::default();
        let runs = line_runs(&chars("f(x)"), &ctx(0, &[], &theme), 80);
        assert_eq!(
            runs,
            vec![Run {
                text: "f(x)".to_string(),
                style: Style::default()
            }]
        );
    }

    #[test]
    fn test_bracket_spans_split_runs() {
        let theme = Theme::default();
        let spans = [
            HighlightSpan::single(11, HighlightKind::ParenMatch),
            HighlightSpan::single(13, HighlightKind::ParenMatch),
        ];
        // Line starts at offset 10
        let runs = line_runs(&chars("f(x)"), &ctx(10, &spans, &theme), 80);
        let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["f", "(", "x", ")"]);
        assert_eq!(runs[1].style, theme.paren_match);
        assert_eq!(runs[2].style, Style::default());
    }

    #[test]
    fn test_current_line_padded_and_layered() {
        let theme = Theme::default();
        let spans = [
            HighlightSpan::new(0, 2, HighlightKind::CurrentLine),
            HighlightSpan::single(1, HighlightKind::ParenMismatch),
        ];
        let runs = line_runs(&chars("a]"), &ctx(0, &spans, &theme), 6);

        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].text, "a");
        assert_eq!(runs[0].style, theme.current_line);
        // Mismatch bg wins over the line bg
        assert_eq!(runs[1].style.bg, Color::Red);
        assert_eq!(runs[2].text, "    ");
        assert_eq!(runs[2].style, theme.current_line);
    }

    #[test]
    fn test_empty_current_line_still_drawn() {
        let theme = Theme::default();
        let spans = [HighlightSpan::new(5, 0, HighlightKind::CurrentLine)];
        let runs = line_runs(&[], &ctx(5, &spans, &theme), 3);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "   ");
    }

    #[test]
    fn test_selection_reversed() {
        let theme = Theme::default();
        let sel = 1..3;
        let context = LineContext {
            selection: Some(&sel),
            ..ctx(0, &[], &theme)
        };
        let runs = line_runs(&chars("abcd"), &context, 80);
        assert_eq!(runs[1].text, "bc");
        assert!(runs[1].style.reverse);
    }

    #[test]
    fn test_tabs_and_truncation() {
        let theme = Theme::default();
        let runs = line_runs(&chars("\tab"), &ctx(0, &[], &theme), 5);
        assert_eq!(runs[0].text, "    a");
        assert_eq!(display_col(&chars("a\tb"), 2, 4), 4);
        assert_eq!(display_col(&chars("a\tb"), 3, 4), 5);
    }

    #[test]
    fn test_scroll_to() {
        let mut display = Display::new();
        display.scroll_to(30, 10);
        assert_eq!(display.top_line, 21);
        display.scroll_to(25, 10);
        assert_eq!(display.top_line, 21);
        display.scroll_to(3, 10);
        assert_eq!(display.top_line, 3);
    }

    #[test]
    fn test_mode_line_text() {
        let mut buf = TextBuffer::from_text("scratch", "ab\ncd");
        buf.set_cursor(4).unwrap();
        assert_eq!(mode_line_text(&buf), "-- parenlight: scratch (no file) L2:C2 INS ");
        buf.modes_mut().overwrite = true;
        assert!(mode_line_text(&buf).contains("OVR"));
    }
}
