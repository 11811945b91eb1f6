use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    // Global commands (translated into core actions)
    ForceQuit,
    SelectSendTab,
    SelectListTab,
    ToggleTab,
    CheckHealth,
    Refresh,
    ToggleAutoRefresh,
    ClearAll,
    SubmitForm,

    // Focus
    NextField,
    PrevField,

    // Text editing (handled by the focused field)
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,
    Submit,
    Escape,

    // List scrolling
    ScrollPageUp,
    ScrollPageDown,

    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).ok()? {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key_event) => {
            // Ignore release/repeat reports from enhanced keyboard protocols
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            map_key(key_event.modifiers, key_event.code)
        }
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn map_key(modifiers: KeyModifiers, code: KeyCode) -> Option<TuiEvent> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(TuiEvent::ForceQuit),
            KeyCode::Char('t') => Some(TuiEvent::ToggleTab),
            KeyCode::Char('r') => Some(TuiEvent::Refresh),
            KeyCode::Char('a') => Some(TuiEvent::ToggleAutoRefresh),
            KeyCode::Char('d') => Some(TuiEvent::ClearAll),
            KeyCode::Char('s') => Some(TuiEvent::SubmitForm),
            // Ctrl+J inserts newline (ASCII LF; Ctrl+Enter sends this in most terminals)
            KeyCode::Char('j') => Some(TuiEvent::InputChar('\n')),
            KeyCode::Enter => Some(TuiEvent::InputChar('\n')),
            KeyCode::Home => Some(TuiEvent::CursorHome),
            KeyCode::End => Some(TuiEvent::CursorEnd),
            _ => None,
        };
    }

    match code {
        KeyCode::F(1) => Some(TuiEvent::SelectSendTab),
        KeyCode::F(2) => Some(TuiEvent::SelectListTab),
        KeyCode::F(3) => Some(TuiEvent::CheckHealth),
        KeyCode::F(5) => Some(TuiEvent::Refresh),
        KeyCode::Tab => Some(TuiEvent::NextField),
        KeyCode::BackTab => Some(TuiEvent::PrevField),
        // Shift+Enter inserts a newline where the terminal reports it
        KeyCode::Enter if modifiers.contains(KeyModifiers::SHIFT) => {
            Some(TuiEvent::InputChar('\n'))
        }
        KeyCode::Enter => Some(TuiEvent::Submit),
        KeyCode::Char(c) => Some(TuiEvent::InputChar(c)),
        KeyCode::Backspace => Some(TuiEvent::Backspace),
        KeyCode::Delete => Some(TuiEvent::Delete),
        KeyCode::Left => Some(TuiEvent::CursorLeft),
        KeyCode::Right => Some(TuiEvent::CursorRight),
        KeyCode::Up => Some(TuiEvent::CursorUp),
        KeyCode::Down => Some(TuiEvent::CursorDown),
        KeyCode::Home => Some(TuiEvent::CursorHome),
        KeyCode::End => Some(TuiEvent::CursorEnd),
        KeyCode::PageUp => Some(TuiEvent::ScrollPageUp),
        KeyCode::PageDown => Some(TuiEvent::ScrollPageDown),
        KeyCode::Esc => Some(TuiEvent::Escape),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_bindings() {
        let ctrl = KeyModifiers::CONTROL;
        assert_eq!(map_key(ctrl, KeyCode::Char('c')), Some(TuiEvent::ForceQuit));
        assert_eq!(map_key(ctrl, KeyCode::Char('q')), Some(TuiEvent::ForceQuit));
        assert_eq!(map_key(ctrl, KeyCode::Char('s')), Some(TuiEvent::SubmitForm));
        assert_eq!(map_key(ctrl, KeyCode::Char('d')), Some(TuiEvent::ClearAll));
        assert_eq!(map_key(ctrl, KeyCode::Char('j')), Some(TuiEvent::InputChar('\n')));
        assert_eq!(map_key(ctrl, KeyCode::Char('x')), None);
    }

    #[test]
    fn test_function_keys() {
        let none = KeyModifiers::NONE;
        assert_eq!(map_key(none, KeyCode::F(1)), Some(TuiEvent::SelectSendTab));
        assert_eq!(map_key(none, KeyCode::F(2)), Some(TuiEvent::SelectListTab));
        assert_eq!(map_key(none, KeyCode::F(3)), Some(TuiEvent::CheckHealth));
        assert_eq!(map_key(none, KeyCode::F(5)), Some(TuiEvent::Refresh));
    }

    #[test]
    fn test_plain_and_shifted_characters_are_input() {
        assert_eq!(
            map_key(KeyModifiers::NONE, KeyCode::Char('a')),
            Some(TuiEvent::InputChar('a'))
        );
        assert_eq!(
            map_key(KeyModifiers::SHIFT, KeyCode::Char('A')),
            Some(TuiEvent::InputChar('A'))
        );
        assert_eq!(
            map_key(KeyModifiers::SHIFT, KeyCode::Enter),
            Some(TuiEvent::InputChar('\n'))
        );
        assert_eq!(map_key(KeyModifiers::NONE, KeyCode::Enter), Some(TuiEvent::Submit));
    }
}
