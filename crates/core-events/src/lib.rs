//! Key chord vocabulary shared by the keymap, the terminal adapter, and the
//! line-reader session.
//!
//! A chord is a logical key (`KeyCode`) plus a modifier set. Printable keys
//! arrive as `KeyCode::Char`; everything else is a named key. Translation from
//! a concrete terminal library happens in `core-terminal` so the rest of the
//! workspace never sees backend types.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// KeyCode enumerates normalized logical key representations consumed by higher layers.
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    /// Shift+Tab as reported by terminals that fold the modifier into the key.
    BackTab,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
}

impl KeyCode {
    /// Canonical name used in chord strings (`"C-Home"`, `"S-Tab"`).
    pub fn name(&self) -> Option<&'static str> {
        Some(match self {
            KeyCode::Char(_) => return None,
            KeyCode::Enter => "Enter",
            KeyCode::Esc => "Esc",
            KeyCode::Backspace => "Backspace",
            KeyCode::Tab => "Tab",
            KeyCode::BackTab => "BackTab",
            KeyCode::Delete => "Delete",
            KeyCode::Insert => "Insert",
            KeyCode::Home => "Home",
            KeyCode::End => "End",
            KeyCode::PageUp => "PageUp",
            KeyCode::PageDown => "PageDown",
            KeyCode::Up => "Up",
            KeyCode::Down => "Down",
            KeyCode::Left => "Left",
            KeyCode::Right => "Right",
        })
    }

    /// Inverse of [`KeyCode::name`]; matching is ASCII case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        const NAMED: [KeyCode; 15] = [
            KeyCode::Enter,
            KeyCode::Esc,
            KeyCode::Backspace,
            KeyCode::Tab,
            KeyCode::BackTab,
            KeyCode::Delete,
            KeyCode::Insert,
            KeyCode::Home,
            KeyCode::End,
            KeyCode::PageUp,
            KeyCode::PageDown,
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Left,
            KeyCode::Right,
        ];
        NAMED
            .into_iter()
            .find(|code| code.name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Unmodified key press.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }

    pub const fn alt(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::ALT)
    }
}

/// Writes the emacs-style prefix form (`C-`, `M-`, `S-`) used by chord strings.
pub fn write_modifier_prefix(f: &mut fmt::Formatter<'_>, mods: KeyModifiers) -> fmt::Result {
    if mods.contains(KeyModifiers::CTRL) {
        f.write_str("C-")?;
    }
    if mods.contains(KeyModifiers::ALT) {
        f.write_str("M-")?;
    }
    if mods.contains(KeyModifiers::SHIFT) {
        f.write_str("S-")?;
    }
    Ok(())
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_modifier_prefix(f, self.mods)?;
        match self.code {
            KeyCode::Char(c) => write!(f, "{c}"),
            other => f.write_str(other.name().unwrap_or("?")),
        }
    }
}
