//! Chord string parsing (`"C-a"`, `"M-S-Tab"`, `"Home"`, `"Space"`).

use core_events::{KeyCode, KeyModifiers};
use thiserror::Error;

use crate::KeyChord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChordParseError {
    #[error("empty key chord")]
    Empty,
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

/// Parse emacs-style chord notation. Prefixes `C-` (control), `M-`/`A-`
/// (alt), and `S-` (shift) may appear in any order; the remainder is either a
/// single character, `Space`, or a named key.
pub fn parse_chord(text: &str) -> Result<KeyChord, ChordParseError> {
    let mut rest = text.trim();
    if rest.is_empty() {
        return Err(ChordParseError::Empty);
    }
    let mut mods = KeyModifiers::empty();
    loop {
        let flag = match rest.get(..2) {
            Some("C-") => KeyModifiers::CTRL,
            Some("M-" | "A-") => KeyModifiers::ALT,
            Some("S-") => KeyModifiers::SHIFT,
            _ => break,
        };
        mods |= flag;
        rest = &rest[2..];
    }

    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err(ChordParseError::Empty),
        (Some(c), None) => Ok(KeyChord::char(c, mods)),
        _ if rest.eq_ignore_ascii_case("space") => Ok(KeyChord::char(' ', mods)),
        _ => KeyCode::from_name(rest)
            .map(|code| KeyChord::key(code, mods))
            .ok_or_else(|| ChordParseError::UnknownKey(rest.to_string())),
    }
}
