#![allow(dead_code)] // Shared across several integration tests; each binary uses a subset.

use core_model::{CompletionHandler, LineEditor};
use core_state::History;
use core_terminal::MemoryConsole;
use core_text::CursorBuffer;

pub fn editor(width: usize, height: usize) -> LineEditor<MemoryConsole> {
    editor_on(MemoryConsole::new(width, height), History::new(), None)
}

pub fn editor_on(
    console: MemoryConsole,
    history: History,
    completion: Option<CompletionHandler>,
) -> LineEditor<MemoryConsole> {
    LineEditor::new(console, CursorBuffer::new(), history, completion).expect("editor")
}

/// Completion source that ignores its input and always offers `values`.
pub fn fixed_candidates(values: &[&str]) -> CompletionHandler {
    let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    Box::new(move |_: &[String], _: usize| values.clone())
}

/// Editor with `prompt` drawn at the top-left and `text` typed in.
pub fn typed(
    width: usize,
    height: usize,
    prompt: &str,
    text: &str,
) -> LineEditor<MemoryConsole> {
    let mut ed = editor(width, height);
    ed.set_prompt(prompt).unwrap();
    ed.display_prompt().unwrap();
    ed.insert_str(text).unwrap();
    ed.move_cursor_to_end().unwrap();
    ed
}
