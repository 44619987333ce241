use cellboard_core::Msg;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the event loop should do with a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Dispatch(Msg),
    Quit,
}

/// Maps a key press to an action. `draft` is the current input text, so
/// edits can be expressed as whole replacement values.
pub fn map_key(key: KeyEvent, draft: &str) -> Option<InputAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(InputAction::Quit),
            KeyCode::Char('b') => Some(InputAction::Dispatch(Msg::IncrementClicked)),
            KeyCode::Char('x') => Some(InputAction::Dispatch(Msg::ResetClicked)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(InputAction::Quit),
        KeyCode::Enter => Some(InputAction::Dispatch(Msg::AddToListClicked)),
        KeyCode::Backspace => {
            let mut next = draft.to_string();
            next.pop()?;
            Some(InputAction::Dispatch(Msg::DraftChanged(next)))
        }
        KeyCode::Char(ch) => Some(InputAction::Dispatch(Msg::DraftChanged(format!(
            "{draft}{ch}"
        )))),
        _ => None,
    }
}

/// Pasted text is appended to the draft, minus line breaks.
pub fn map_paste(text: &str, draft: &str) -> InputAction {
    let cleaned: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    InputAction::Dispatch(Msg::DraftChanged(format!("{draft}{cleaned}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn typing_extends_the_draft() {
        assert_eq!(
            map_key(press(KeyCode::Char('k')), "oo"),
            Some(InputAction::Dispatch(Msg::DraftChanged("ook".into())))
        );
        assert_eq!(
            map_key(press(KeyCode::Backspace), "ook"),
            Some(InputAction::Dispatch(Msg::DraftChanged("oo".into())))
        );
        assert_eq!(map_key(press(KeyCode::Backspace), ""), None);
    }

    #[test]
    fn controls_map_to_store_operations() {
        assert_eq!(
            map_key(press(KeyCode::Enter), "x"),
            Some(InputAction::Dispatch(Msg::AddToListClicked))
        );
        assert_eq!(
            map_key(ctrl('b'), ""),
            Some(InputAction::Dispatch(Msg::IncrementClicked))
        );
        assert_eq!(
            map_key(ctrl('x'), ""),
            Some(InputAction::Dispatch(Msg::ResetClicked))
        );
        assert_eq!(map_key(ctrl('c'), ""), Some(InputAction::Quit));
        assert_eq!(map_key(press(KeyCode::Esc), ""), Some(InputAction::Quit));
        assert_eq!(map_key(ctrl('z'), ""), None);
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut key = press(KeyCode::Char('a'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key, ""), None);
    }

    #[test]
    fn paste_strips_line_breaks() {
        assert_eq!(
            map_paste("a\r\nb\n", "> "),
            InputAction::Dispatch(Msg::DraftChanged("> ab".into()))
        );
    }
}
