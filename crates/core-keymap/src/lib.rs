//! core-keymap: key chord to editing operation bindings.
//!
//! Design principles:
//! - Pure and deterministic: resolution depends only on the table, the key
//!   event, and the supplied key translator.
//! - At most one operation per chord; binding `None` removes the chord.
//! - Two chord families: abstract keys (`Home`, `C-Left`) and literal
//!   characters (`C-a`, `M-<`). Character chords are matched after keyboard
//!   layout translation, with SHIFT dropped since it is already reflected in
//!   the character.
//! - One process-wide default table (Emacs flavored), built lazily and never
//!   mutated; customization clones it first.

use std::collections::HashMap;
use std::fmt;

use core_events::{KeyCode, KeyEvent, KeyModifiers, write_modifier_prefix};
use tracing::{debug, trace};

mod chord;
mod defaults;

pub use chord::{ChordParseError, parse_chord};
pub use defaults::default_bindings;

// -------------------------------------------------------------------------------------------------
// Symbolic operations
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputOperation {
    AcceptLine,
    Abort,
    Undo,
    ClearScreen,
    RevertLine,
    BeginningOfLine,
    EndOfLine,
    ForwardChar,
    BackwardChar,
    ForwardWord,
    BackwardWord,
    DeleteChar,
    BackwardDeleteChar,
    KillWord,
    BackwardKillWord,
    KillLine,
    BackwardKillLine,
    Yank,
    PreviousHistory,
    NextHistory,
    BeginningOfHistory,
    EndOfHistory,
    CompleteNext,
    CompletePrevious,
    InsertCompletions,
    PossibleCompletions,
    UpcaseWord,
    DowncaseWord,
    CapitalizeWord,
    ToggleInsertMode,
}

impl InputOperation {
    pub const ALL: [InputOperation; 30] = [
        InputOperation::AcceptLine,
        InputOperation::Abort,
        InputOperation::Undo,
        InputOperation::ClearScreen,
        InputOperation::RevertLine,
        InputOperation::BeginningOfLine,
        InputOperation::EndOfLine,
        InputOperation::ForwardChar,
        InputOperation::BackwardChar,
        InputOperation::ForwardWord,
        InputOperation::BackwardWord,
        InputOperation::DeleteChar,
        InputOperation::BackwardDeleteChar,
        InputOperation::KillWord,
        InputOperation::BackwardKillWord,
        InputOperation::KillLine,
        InputOperation::BackwardKillLine,
        InputOperation::Yank,
        InputOperation::PreviousHistory,
        InputOperation::NextHistory,
        InputOperation::BeginningOfHistory,
        InputOperation::EndOfHistory,
        InputOperation::CompleteNext,
        InputOperation::CompletePrevious,
        InputOperation::InsertCompletions,
        InputOperation::PossibleCompletions,
        InputOperation::UpcaseWord,
        InputOperation::DowncaseWord,
        InputOperation::CapitalizeWord,
        InputOperation::ToggleInsertMode,
    ];

    /// Look up an operation by its variant name (ASCII case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| format!("{op:?}").eq_ignore_ascii_case(name))
    }

    /// Operations that belong to a completion cycle.
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            InputOperation::CompleteNext | InputOperation::CompletePrevious
        )
    }
}

// -------------------------------------------------------------------------------------------------
// Key translation (keyboard layout capability)
// -------------------------------------------------------------------------------------------------
/// Turns a key event into the literal character it produces, if any.
pub trait KeyTranslator {
    fn translate(&self, key: &KeyEvent) -> Option<char>;
}

/// Translator for backends that already report layout-resolved characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct CharKeyTranslator;

impl KeyTranslator for CharKeyTranslator {
    fn translate(&self, key: &KeyEvent) -> Option<char> {
        match key.code {
            KeyCode::Char(c) => Some(c),
            _ => None,
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Chords
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordKey {
    Key(KeyCode),
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: ChordKey,
    pub mods: KeyModifiers,
}

impl KeyChord {
    pub const fn key(code: KeyCode, mods: KeyModifiers) -> Self {
        Self {
            key: ChordKey::Key(code),
            mods,
        }
    }

    pub const fn char(c: char, mods: KeyModifiers) -> Self {
        Self {
            key: ChordKey::Char(c),
            mods,
        }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_modifier_prefix(f, self.mods)?;
        match self.key {
            ChordKey::Char(' ') => f.write_str("Space"),
            ChordKey::Char(c) => write!(f, "{c}"),
            ChordKey::Key(KeyCode::Char(c)) => write!(f, "{c}"),
            ChordKey::Key(code) => f.write_str(code.name().unwrap_or("?")),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Binding table
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyBindingSet {
    bindings: HashMap<KeyChord, InputOperation>,
}

impl KeyBindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bind (or with `None`, unbind) a chord. Last write wins.
    pub fn bind_chord(&mut self, chord: KeyChord, operation: Option<InputOperation>) {
        match operation {
            Some(op) => {
                if let Some(prev) = self.bindings.insert(chord, op)
                    && prev != op
                {
                    trace!(target: "keymap", %chord, ?prev, ?op, "binding_override");
                }
            }
            None => {
                if self.bindings.remove(&chord).is_some() {
                    debug!(target: "keymap", %chord, "binding_removed");
                }
            }
        }
    }

    pub fn bind(&mut self, code: KeyCode, mods: KeyModifiers, operation: Option<InputOperation>) {
        self.bind_chord(KeyChord::key(code, mods), operation);
    }

    pub fn bind_char(&mut self, c: char, mods: KeyModifiers, operation: Option<InputOperation>) {
        self.bind_chord(KeyChord::char(c, mods), operation);
    }

    pub fn lookup(&self, chord: &KeyChord) -> Option<InputOperation> {
        self.bindings.get(chord).copied()
    }

    /// Resolve a key event: abstract key chord first, then the translated
    /// character chord.
    pub fn resolve(
        &self,
        key: &KeyEvent,
        translator: &dyn KeyTranslator,
    ) -> Option<InputOperation> {
        if let Some(op) = self.lookup(&KeyChord::key(key.code, key.mods)) {
            return Some(op);
        }
        let c = translator.translate(key)?;
        self.lookup(&KeyChord::char(c, key.mods - KeyModifiers::SHIFT))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyChord, &InputOperation)> {
        self.bindings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bind_replaces_and_none_removes() {
        let mut set = KeyBindingSet::new();
        set.bind(KeyCode::Home, KeyModifiers::empty(), Some(InputOperation::BeginningOfLine));
        set.bind(KeyCode::Home, KeyModifiers::empty(), Some(InputOperation::EndOfLine));
        assert_eq!(set.len(), 1);
        let chord = KeyChord::key(KeyCode::Home, KeyModifiers::empty());
        assert_eq!(set.lookup(&chord), Some(InputOperation::EndOfLine));
        set.bind(KeyCode::Home, KeyModifiers::empty(), None);
        assert_eq!(set.lookup(&chord), None);
        assert!(set.is_empty());
    }

    #[test]
    fn resolve_prefers_key_chord_then_char() {
        let mut set = KeyBindingSet::new();
        set.bind_char('a', KeyModifiers::CTRL, Some(InputOperation::BeginningOfLine));
        let ev = KeyEvent::ctrl('a');
        assert_eq!(
            set.resolve(&ev, &CharKeyTranslator),
            Some(InputOperation::BeginningOfLine)
        );
        set.bind(KeyCode::Char('a'), KeyModifiers::CTRL, Some(InputOperation::Abort));
        assert_eq!(set.resolve(&ev, &CharKeyTranslator), Some(InputOperation::Abort));
    }

    #[test]
    fn shift_is_dropped_for_char_chords() {
        let mut set = KeyBindingSet::new();
        set.bind_char('<', KeyModifiers::ALT, Some(InputOperation::BeginningOfHistory));
        let ev = KeyEvent::new(KeyCode::Char('<'), KeyModifiers::ALT | KeyModifiers::SHIFT);
        assert_eq!(
            set.resolve(&ev, &CharKeyTranslator),
            Some(InputOperation::BeginningOfHistory)
        );
    }

    #[test]
    fn unbound_is_a_miss() {
        let set = KeyBindingSet::new();
        assert_eq!(set.resolve(&KeyEvent::plain(KeyCode::Char('z')), &CharKeyTranslator), None);
    }

    #[test]
    fn operation_names() {
        assert_eq!(
            InputOperation::from_name("killline"),
            Some(InputOperation::KillLine)
        );
        assert_eq!(InputOperation::from_name("Nope"), None);
        for op in InputOperation::ALL {
            assert_eq!(InputOperation::from_name(&format!("{op:?}")), Some(op));
        }
    }

    #[test]
    fn chord_display() {
        assert_eq!(KeyChord::char('f', KeyModifiers::ALT).to_string(), "M-f");
        assert_eq!(
            KeyChord::key(KeyCode::Left, KeyModifiers::CTRL).to_string(),
            "C-Left"
        );
    }
}
