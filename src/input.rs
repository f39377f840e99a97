//! Input handling - key reading and translation

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Editor actions bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    LineStart,
    LineEnd,
    BufferStart,
    BufferEnd,
    PageUp,
    PageDown,
    Insert(char),
    Newline,
    DeleteBackward,
    DeleteForward,
    ToggleOverwrite,
    ToggleMark,
    Save,
    Quit,
}

/// Translate a crossterm KeyEvent to an action
pub fn translate_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent {
        code, modifiers, kind, ..
    } = event;

    // Only process key press events, ignore release and repeat
    // This is critical on Windows where crossterm sends all event types
    if kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    if ctrl {
        return match code {
            KeyCode::Char(' ') | KeyCode::Char('@') => Some(Action::ToggleMark),
            KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
                'f' => Some(Action::MoveRight),
                'b' => Some(Action::MoveLeft),
                'n' => Some(Action::MoveDown),
                'p' => Some(Action::MoveUp),
                'a' => Some(Action::LineStart),
                'e' => Some(Action::LineEnd),
                'd' => Some(Action::DeleteForward),
                's' => Some(Action::Save),
                'q' | 'c' => Some(Action::Quit),
                _ => None,
            },
            KeyCode::Home => Some(Action::BufferStart),
            KeyCode::End => Some(Action::BufferEnd),
            _ => None,
        };
    }

    match code {
        KeyCode::Char(ch) => Some(Action::Insert(ch)),
        KeyCode::Enter => Some(Action::Newline),
        KeyCode::Tab => Some(Action::Insert('\t')),
        KeyCode::Backspace => Some(Action::DeleteBackward),
        KeyCode::Delete => Some(Action::DeleteForward),
        KeyCode::Insert => Some(Action::ToggleOverwrite),
        KeyCode::Home => Some(Action::LineStart),
        KeyCode::End => Some(Action::LineEnd),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Left => Some(Action::MoveLeft),
        KeyCode::Right => Some(Action::MoveRight),
        KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_keys() {
        assert_eq!(
            translate_key(press(KeyCode::Char('('), KeyModifiers::NONE)),
            Some(Action::Insert('('))
        );
        assert_eq!(
            translate_key(press(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(Action::Insert('A'))
        );
        assert_eq!(translate_key(press(KeyCode::Left, KeyModifiers::NONE)), Some(Action::MoveLeft));
        assert_eq!(
            translate_key(press(KeyCode::Insert, KeyModifiers::NONE)),
            Some(Action::ToggleOverwrite)
        );
        assert_eq!(translate_key(press(KeyCode::Esc, KeyModifiers::NONE)), Some(Action::Quit));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(
            translate_key(press(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Some(Action::Save)
        );
        assert_eq!(
            translate_key(press(KeyCode::Char(' '), KeyModifiers::CONTROL)),
            Some(Action::ToggleMark)
        );
        assert_eq!(
            translate_key(press(KeyCode::End, KeyModifiers::CONTROL)),
            Some(Action::BufferEnd)
        );
        assert_eq!(translate_key(press(KeyCode::Char('z'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_release_ignored() {
        let event = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(translate_key(event), None);
    }
}
