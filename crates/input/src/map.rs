//! Key mapping from terminal events to actions.

use crate::types::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to an action.
pub fn handle_key_event(key: KeyEvent) -> Option<Action> {
    if should_quit(key) {
        return Some(Action::Quit);
    }
    match key.code {
        KeyCode::Enter => Some(Action::TogglePause),
        _ => None,
    }
}

/// Check if key should quit.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
