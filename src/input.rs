//! Keyboard mapping for the game screen.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press means to the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Space, Up, Enter or `k`: start, flap or restart.
    Tap,
    /// `q`, Esc or Ctrl+C.
    Quit,
    Other,
}

pub fn map_key(key: KeyEvent) -> PlayerInput {
    if key.kind == KeyEventKind::Release {
        return PlayerInput::Other;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => PlayerInput::Quit,
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter | KeyCode::Char('k') => PlayerInput::Tap,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => PlayerInput::Quit,
        _ => PlayerInput::Other,
    }
}
