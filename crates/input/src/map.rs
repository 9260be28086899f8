//! Key mapping from terminal events to game events.

use crate::types::GameEvents;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game events. Unmapped keys give an empty mask.
pub fn handle_key_event(key: KeyEvent) -> GameEvents {
    if should_quit(key) {
        return GameEvents::QUIT;
    }
    match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => GameEvents::MOVE_LEFT,
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => GameEvents::MOVE_RIGHT,
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => GameEvents::MOVE_DOWN,

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => GameEvents::ROTATE_CW,
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => GameEvents::ROTATE_CCW,

        // Actions
        KeyCode::Char(' ') | KeyCode::Enter => GameEvents::DROP,
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => GameEvents::PAUSE,
        KeyCode::Char('r') | KeyCode::Char('R') => GameEvents::RESTART,

        // Display toggles
        KeyCode::Char('n') | KeyCode::Char('N') => GameEvents::SHOW_NEXT,
        KeyCode::Char('g') | KeyCode::Char('G') => GameEvents::SHOW_SHADOW,

        _ => GameEvents::empty(),
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
