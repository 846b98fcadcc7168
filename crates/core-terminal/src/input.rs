//! crossterm key events to `core_events::KeyEvent`.
//!
//! Only key presses (and auto-repeats) are surfaced; releases, mouse, focus,
//! paste and resize events are skipped by [`read_key`]. Keys the editor has no
//! vocabulary for (function keys, media keys) map to `None`.

use core_events::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{
    self, Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind,
    KeyModifiers as CMods,
};
use tracing::trace;

use crate::ConsoleError;

pub fn map_mods(m: CMods) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CMods::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CMods::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CMods::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

/// Translate a crossterm key event. Releases return `None`.
pub fn map_key_event(key: &CKeyEvent) -> Option<KeyEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let mut mods = map_mods(key.modifiers);
    let code = match key.code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Tab => KeyCode::Tab,
        CKeyCode::BackTab => {
            mods.remove(KeyModifiers::SHIFT);
            KeyCode::BackTab
        }
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Insert => KeyCode::Insert,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        _ => return None,
    };
    Some(KeyEvent::new(code, mods))
}

/// Block until the next translatable key press.
pub fn read_key() -> Result<KeyEvent, ConsoleError> {
    loop {
        if let CEvent::Key(key) = event::read()?
            && let Some(mapped) = map_key_event(&key)
        {
            trace!(target: "terminal.input", key = %mapped, "key");
            return Ok(mapped);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn maps_chars_and_modifiers() {
        let ev = CKeyEvent::new(CKeyCode::Char('a'), CMods::CONTROL | CMods::ALT);
        assert_eq!(
            map_key_event(&ev),
            Some(KeyEvent::new(
                KeyCode::Char('a'),
                KeyModifiers::CTRL | KeyModifiers::ALT
            ))
        );
    }

    #[test]
    fn backtab_drops_redundant_shift() {
        let ev = CKeyEvent::new(CKeyCode::BackTab, CMods::SHIFT);
        assert_eq!(map_key_event(&ev), Some(KeyEvent::plain(KeyCode::BackTab)));
    }

    #[test]
    fn releases_and_unknown_keys_are_skipped() {
        let mut ev = CKeyEvent::new(CKeyCode::Char('x'), CMods::NONE);
        ev.kind = KeyEventKind::Release;
        assert_eq!(map_key_event(&ev), None);
        let f1 = CKeyEvent::new(CKeyCode::F(1), CMods::NONE);
        assert_eq!(map_key_event(&f1), None);
    }
}
