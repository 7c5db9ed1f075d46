//! Terminal input normalized for keybinding lookup.

use std::str::FromStr;

pub use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::event::{KeyEvent, KeyEventKind};

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Paste(String),
    /// Mouse and focus events; the workbench only redraws on these.
    Other,
}

impl InputEvent {
    pub fn is_key(&self) -> bool {
        matches!(self, InputEvent::Key(_))
    }

    /// Key releases reported by some terminals (kitty protocol) are not actionable.
    pub fn is_key_press(&self) -> bool {
        match self {
            InputEvent::Key(e) => e.kind != KeyEventKind::Release,
            _ => false,
        }
    }
}

impl From<crossterm::event::Event> for InputEvent {
    fn from(event: crossterm::event::Event) -> Self {
        use crossterm::event::Event;

        match event {
            Event::Key(e) => InputEvent::Key(e),
            Event::Resize(w, h) => InputEvent::Resize(w, h),
            Event::Paste(s) => InputEvent::Paste(s),
            Event::Mouse(_) | Event::FocusGained | Event::FocusLost => InputEvent::Other,
        }
    }
}

/// A key chord as stored in the keybinding tables: letters are always lowercase,
/// with uppercase expressed through `SHIFT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        match code {
            KeyCode::Char(ch) if ch.is_ascii_uppercase() => Self {
                code: KeyCode::Char(ch.to_ascii_lowercase()),
                modifiers: modifiers | KeyModifiers::SHIFT,
            },
            _ => Self { code, modifiers },
        }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }

    /// Printable character typed without ctrl/alt, if any.
    pub fn typed_char(&self) -> Option<char> {
        if self
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
        {
            return None;
        }
        match self.code {
            KeyCode::Char(ch) if self.modifiers.contains(KeyModifiers::SHIFT) => {
                Some(ch.to_ascii_uppercase())
            }
            KeyCode::Char(ch) => Some(ch),
            _ => None,
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    #[error("keybinding {0:?} names no key")]
    MissingKey(String),
    #[error("unknown key {0:?}")]
    UnknownKey(String),
}

const MODIFIER_NAMES: &[(&str, KeyModifiers)] = &[
    ("ctrl", KeyModifiers::CONTROL),
    ("control", KeyModifiers::CONTROL),
    ("shift", KeyModifiers::SHIFT),
    ("alt", KeyModifiers::ALT),
    ("option", KeyModifiers::ALT),
    ("super", KeyModifiers::SUPER),
    ("meta", KeyModifiers::SUPER),
    ("cmd", KeyModifiers::SUPER),
];

const KEY_NAMES: &[(&str, KeyCode)] = &[
    ("enter", KeyCode::Enter),
    ("tab", KeyCode::Tab),
    ("backtab", KeyCode::BackTab),
    ("esc", KeyCode::Esc),
    ("escape", KeyCode::Esc),
    ("backspace", KeyCode::Backspace),
    ("delete", KeyCode::Delete),
    ("del", KeyCode::Delete),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("pageup", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
    ("space", KeyCode::Char(' ')),
    ("plus", KeyCode::Char('+')),
];

fn key_code(name: &str) -> Option<KeyCode> {
    let lower = name.to_ascii_lowercase();
    if let Some((_, code)) = KEY_NAMES.iter().find(|(n, _)| *n == lower) {
        return Some(*code);
    }
    if let Some(n) = lower.strip_prefix('f').filter(|rest| !rest.is_empty()) {
        return n.parse::<u8>().ok().filter(|n| (1..=24).contains(n)).map(KeyCode::F);
    }
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(KeyCode::Char(ch)),
        _ => None,
    }
}

/// Settings syntax: `ctrl+shift+n`, `alt+Enter`, `f5`. Names are case-insensitive;
/// a single uppercase letter implies shift.
impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut modifiers = KeyModifiers::NONE;
        let mut code = None;
        for part in value.split('+').map(str::trim).filter(|p| !p.is_empty()) {
            let lower = part.to_ascii_lowercase();
            match MODIFIER_NAMES.iter().find(|(n, _)| *n == lower) {
                Some((_, modifier)) => modifiers |= *modifier,
                None => {
                    code = Some(
                        key_code(part).ok_or_else(|| KeyParseError::UnknownKey(part.to_string()))?,
                    )
                }
            }
        }
        let code = code.ok_or_else(|| KeyParseError::MissingKey(value.to_string()))?;
        Ok(Key::new(code, modifiers))
    }
}
