//! Key bindings

use crate::commands::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Convert a key event to a command
pub fn map_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        // Quit (raw mode swallows SIGINT, so Ctrl-C arrives as a key)
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),

        // Navigation
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => Some(Command::SelectNext),
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => Some(Command::SelectPrev),

        // Volume
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('-') => Some(Command::VolumeDown),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
            Some(Command::VolumeUp)
        }
        KeyCode::Char(c @ '0'..='9') => Some(Command::SetDecile(c as u8 - b'0')),

        KeyCode::Char('m') => Some(Command::NextMixer),

        _ => None,
    }
}
