//! Key mapping from terminal events to logical keys.

use crate::types::Key;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// `Ctrl+C`: leave the game whatever the session state.
///
/// Raw mode turns off the terminal's own interrupt, so the loop checks this
/// before any key reaches the session.
pub fn is_interrupt(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Map a keyboard event to a logical key.
///
/// Letters are matched case-insensitively. Interrupts are not keys; see
/// [`is_interrupt`].
pub fn map_key(key: KeyEvent) -> Option<Key> {
    if is_interrupt(key) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Rotate),
        KeyCode::Down => Some(Key::Drop),
        KeyCode::Esc => Some(Key::Quit),

        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' | 'j' => Some(Key::Left),
            'd' | 'l' => Some(Key::Right),
            'w' | 'i' => Some(Key::Rotate),
            's' | 'k' | ' ' => Some(Key::Drop),
            'p' => Some(Key::Pause),
            'y' => Some(Key::Confirm),
            'n' => Some(Key::Cancel),
            _ => None,
        },

        _ => None,
    }
}
