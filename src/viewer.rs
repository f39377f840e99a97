//! Preview editor - ties buffer, highlighting and display together
//!
//! Highlights are recomputed whenever the cursor moves (or the text under
//! it changes): first the current line, then the brackets.

use log::{debug, info};

use crate::buffer::TextBuffer;
use crate::config::Config;
use crate::display::Display;
use crate::error::{ParenError, Result};
use crate::highlight::{current_line_span, CursorContext, HighlightSpan, ParenHighlighter};
use crate::input::{translate_key, Action};
use crate::terminal::Terminal;

/// Editor state, independent of the terminal
pub struct Viewer {
    buffer: TextBuffer,
    config: Config,
    parens: ParenHighlighter,
    /// Current-line span followed by bracket spans
    spans: Vec<HighlightSpan>,
    display: Display,
    /// Rows moved by PageUp/PageDown
    page_rows: usize,
    /// Set after a quit request on a modified buffer
    quit_armed: bool,
    running: bool,
}

impl Viewer {
    pub fn new(buffer: TextBuffer, config: Config) -> Result<Self> {
        let mut viewer = Self {
            buffer,
            config,
            parens: ParenHighlighter::new(),
            spans: Vec::new(),
            display: Display::new(),
            page_rows: 20,
            quit_armed: false,
            running: true,
        };
        viewer.refresh_highlights()?;
        Ok(viewer)
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// All spans currently displayed
    pub fn spans(&self) -> &[HighlightSpan] {
        &self.spans
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Message shown on the message line
    pub fn message(&self) -> Option<&str> {
        self.display.message()
    }

    /// Rebuild the span set for the current cursor position
    pub fn refresh_highlights(&mut self) -> Result<()> {
        self.spans.clear();
        let position = self.buffer.cursor();

        if self.config.highlight_current_line {
            self.spans.push(current_line_span(&self.buffer, position)?);
        }

        if self.config.highlight_brackets {
            let ctx = CursorContext {
                position,
                overwrite: self.buffer.modes().overwrite,
                read_only: self.buffer.modes().view,
            };
            let parens = self.parens.update(&self.buffer, ctx)?;
            self.spans.extend_from_slice(parens);
        } else {
            self.parens.clear();
        }

        debug!("cursor {} -> {} spans", position, self.spans.len());
        Ok(())
    }

    /// Apply one action, refreshing highlights if the cursor context changed
    pub fn apply(&mut self, action: Action) -> Result<()> {
        if action != Action::Quit {
            self.quit_armed = false;
        }
        self.display.clear_message();

        let changed = match self.dispatch(action) {
            Ok(changed) => changed,
            // Refused edits and failed saves are reported, not fatal
            Err(e @ (ParenError::ReadOnly | ParenError::Io(_) | ParenError::Message(_))) => {
                self.display.set_message(e.to_string());
                false
            }
            Err(e) => return Err(e),
        };

        if changed {
            self.refresh_highlights()?;
        }
        Ok(())
    }

    /// Perform an action; true if highlights need recomputing
    fn dispatch(&mut self, action: Action) -> Result<bool> {
        let buf = &mut self.buffer;
        let changed = match action {
            Action::MoveLeft => buf.move_left(),
            Action::MoveRight => buf.move_right(),
            Action::MoveUp => buf.move_up(),
            Action::MoveDown => buf.move_down(),
            Action::PageUp => buf.move_lines(-(self.page_rows as isize)),
            Action::PageDown => buf.move_lines(self.page_rows as isize),
            Action::LineStart => moved(buf, TextBuffer::move_line_start),
            Action::LineEnd => moved(buf, TextBuffer::move_line_end),
            Action::BufferStart => moved(buf, TextBuffer::move_buffer_start),
            Action::BufferEnd => moved(buf, TextBuffer::move_buffer_end),
            Action::Insert(ch) => {
                buf.insert_char(ch)?;
                true
            }
            Action::Newline => {
                buf.insert_char('\n')?;
                true
            }
            Action::DeleteBackward => buf.delete_backward()?.is_some(),
            Action::DeleteForward => buf.delete_forward()?.is_some(),
            Action::ToggleOverwrite => {
                let modes = buf.modes_mut();
                modes.overwrite = !modes.overwrite;
                let msg = if modes.overwrite { "Overwrite mode" } else { "Insert mode" };
                self.display.set_message(msg);
                true
            }
            Action::ToggleMark => {
                if buf.has_mark() {
                    buf.clear_mark();
                    self.display.set_message("Mark cleared");
                } else {
                    buf.set_mark();
                    self.display.set_message("Mark set");
                }
                false
            }
            Action::Save => {
                buf.save()?;
                info!("saved {}", buf.name());
                self.display.set_message(format!("Wrote {}", buf.name()));
                false
            }
            Action::Quit => {
                if buf.is_modified() && !self.quit_armed {
                    self.quit_armed = true;
                    self.display
                        .set_message("Buffer modified; quit again to discard changes");
                } else {
                    self.running = false;
                }
                false
            }
        };
        Ok(changed)
    }

    /// Run the interactive loop until quit
    pub fn run(&mut self, terminal: &mut Terminal) -> Result<()> {
        while self.running {
            self.page_rows = Display::text_rows(terminal).saturating_sub(1).max(1);
            self.display.render(
                terminal,
                &self.buffer,
                &self.spans,
                &self.config.theme,
                self.config.tab_width,
            )?;

            let key_event = terminal.read_key()?;
            if let Some(action) = translate_key(key_event) {
                self.apply(action)?;
            }
        }
        Ok(())
    }
}

/// Run a motion that cannot fail, reporting whether the cursor moved
fn moved(buf: &mut TextBuffer, motion: fn(&mut TextBuffer)) -> bool {
    let before = buf.cursor();
    motion(buf);
    buf.cursor() != before
}
