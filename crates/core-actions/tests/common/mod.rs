#![allow(dead_code)] // Shared across several integration tests; each binary uses a subset.

use core_actions::{LineReader, ReadOutcome};
use core_events::{KeyCode, KeyEvent};
use core_keymap::{KeyBindingSet, default_bindings};
use core_model::{CompletionHandler, LineEditor};
use core_state::History;
use core_terminal::MemoryConsole;
use core_text::CursorBuffer;

/// Reader on a `width` x `height` memory console with `> ` already drawn.
pub fn reader_with(
    width: usize,
    height: usize,
    history: History,
    completion: Option<CompletionHandler>,
    bindings: KeyBindingSet,
) -> LineReader<MemoryConsole> {
    let console = MemoryConsole::new(width, height);
    let editor =
        LineEditor::new(console, CursorBuffer::new(), history, completion).expect("editor");
    let mut reader = LineReader::new(editor, bindings);
    reader.begin("> ").expect("begin");
    reader
}

pub fn reader(width: usize, height: usize) -> LineReader<MemoryConsole> {
    reader_with(width, height, History::new(), None, default_bindings().clone())
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::plain(code)
}

/// Feed each character as an unmodified key press; every one must leave the
/// read pending.
pub fn type_text(reader: &mut LineReader<MemoryConsole>, text: &str) {
    for c in text.chars() {
        assert_eq!(
            reader.feed(key(KeyCode::Char(c))).expect("feed"),
            ReadOutcome::Pending
        );
    }
}

pub fn feed(reader: &mut LineReader<MemoryConsole>, event: KeyEvent) -> ReadOutcome {
    reader.feed(event).expect("feed")
}

pub fn contents(reader: &LineReader<MemoryConsole>) -> String {
    reader.editor().contents()
}

pub fn fixed_candidates(values: &[&str]) -> CompletionHandler {
    let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    Box::new(move |_: &[String], _: usize| values.clone())
}
