//! Default Emacs-flavored binding table.

use std::sync::LazyLock;

use core_events::{KeyCode, KeyModifiers};

use crate::{InputOperation, KeyBindingSet};

static DEFAULT_BINDINGS: LazyLock<KeyBindingSet> = LazyLock::new(emacs_bindings);

/// Process-wide default table. Clone it to customize.
pub fn default_bindings() -> &'static KeyBindingSet {
    &DEFAULT_BINDINGS
}

fn emacs_bindings() -> KeyBindingSet {
    use InputOperation as Op;
    const NONE: KeyModifiers = KeyModifiers::empty();
    const CTRL: KeyModifiers = KeyModifiers::CTRL;
    const ALT: KeyModifiers = KeyModifiers::ALT;
    const SHIFT: KeyModifiers = KeyModifiers::SHIFT;

    let mut set = KeyBindingSet::new();
    let keys = [
        (KeyCode::Enter, NONE, Op::AcceptLine),
        (KeyCode::Esc, NONE, Op::RevertLine),
        (KeyCode::Home, NONE, Op::BeginningOfLine),
        (KeyCode::End, NONE, Op::EndOfLine),
        (KeyCode::Right, NONE, Op::ForwardChar),
        (KeyCode::Left, NONE, Op::BackwardChar),
        (KeyCode::Right, CTRL, Op::ForwardWord),
        (KeyCode::Left, CTRL, Op::BackwardWord),
        (KeyCode::Delete, NONE, Op::DeleteChar),
        (KeyCode::Backspace, NONE, Op::BackwardDeleteChar),
        (KeyCode::Backspace, SHIFT, Op::BackwardDeleteChar),
        (KeyCode::Delete, CTRL, Op::KillWord),
        (KeyCode::Backspace, CTRL, Op::BackwardKillWord),
        (KeyCode::Backspace, ALT, Op::BackwardKillWord),
        (KeyCode::Up, NONE, Op::PreviousHistory),
        (KeyCode::Down, NONE, Op::NextHistory),
        (KeyCode::PageUp, NONE, Op::BeginningOfHistory),
        (KeyCode::PageDown, NONE, Op::EndOfHistory),
        (KeyCode::Tab, NONE, Op::CompleteNext),
        (KeyCode::Tab, SHIFT, Op::CompletePrevious),
        (KeyCode::BackTab, NONE, Op::CompletePrevious),
        (KeyCode::BackTab, SHIFT, Op::CompletePrevious),
        (KeyCode::Insert, NONE, Op::ToggleInsertMode),
    ];
    for (code, mods, op) in keys {
        set.bind(code, mods, Some(op));
    }

    let chars = [
        ('a', CTRL, Op::BeginningOfLine),
        ('e', CTRL, Op::EndOfLine),
        ('f', CTRL, Op::ForwardChar),
        ('b', CTRL, Op::BackwardChar),
        ('f', ALT, Op::ForwardWord),
        ('b', ALT, Op::BackwardWord),
        ('d', CTRL, Op::DeleteChar),
        ('h', CTRL, Op::BackwardDeleteChar),
        ('d', ALT, Op::KillWord),
        ('w', CTRL, Op::BackwardKillWord),
        ('k', CTRL, Op::KillLine),
        ('u', CTRL, Op::BackwardKillLine),
        ('y', CTRL, Op::Yank),
        ('p', CTRL, Op::PreviousHistory),
        ('n', CTRL, Op::NextHistory),
        ('<', ALT, Op::BeginningOfHistory),
        ('>', ALT, Op::EndOfHistory),
        ('*', ALT, Op::InsertCompletions),
        ('?', ALT, Op::PossibleCompletions),
        ('=', ALT, Op::PossibleCompletions),
        ('j', CTRL, Op::AcceptLine),
        ('m', CTRL, Op::AcceptLine),
        ('c', CTRL, Op::Abort),
        ('g', CTRL, Op::Abort),
        ('_', CTRL, Op::Undo),
        ('z', CTRL, Op::Undo),
        ('l', CTRL, Op::ClearScreen),
        ('u', ALT, Op::UpcaseWord),
        ('l', ALT, Op::DowncaseWord),
        ('c', ALT, Op::CapitalizeWord),
        ('r', ALT, Op::RevertLine),
    ];
    for (c, mods, op) in chars {
        set.bind_char(c, mods, Some(op));
    }
    set
}
