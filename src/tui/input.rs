use crate::event_loop::EngineMessage;
use crossterm::event::{KeyCode, KeyEvent};

pub fn map_key_event(key: KeyEvent) -> Option<EngineMessage> {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('t') | KeyCode::Char('T') => Some(EngineMessage::Tap),
        KeyCode::Char('u') | KeyCode::Char('U') => Some(EngineMessage::ToggleUnit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(EngineMessage::Round),
        KeyCode::Char(']') => Some(EngineMessage::PrecisionUp),
        KeyCode::Char('[') => Some(EngineMessage::PrecisionDown),
        // F1..F5 pick a decimal preset directly, F1 being zero places.
        KeyCode::F(n @ 1..=5) => Some(EngineMessage::SetPrecision(u32::from(n - 1))),
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => Some(EngineMessage::InputChar(c)),
        KeyCode::Backspace => Some(EngineMessage::Backspace),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(EngineMessage::Quit),
        _ => None,
    }
}
