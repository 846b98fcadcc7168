//! Line editor orchestration.
//!
//! `LineEditor` composes a `CursorBuffer`, a `History`, an optional completion
//! callback, a single-slot paste buffer, and a `ConsoleOutput` port. Every
//! editing command mutates the buffer (and/or history) and then issues the
//! smallest console update that keeps the terminal in step with it.
//!
//! Rendering contract:
//! * The line is drawn as prompt followed by buffer contents, wrapped at the
//!   console width, starting at the anchor captured by `display_prompt`
//!   (see [`DisplayLayout`]).
//! * A mutation at buffer index `i` rewrites only cells from `i` to the end of
//!   the line, padding with blanks when the line got shorter. Cells before the
//!   edit point are never touched.
//! * After every public call that succeeds, the console cursor sits on the
//!   cell for `prompt_len + cursor_index`. The single exception is
//!   `clear_line(true)`, which leaves the console cursor at the start of the
//!   editable region; `refresh` resynchronizes.
//! * When the line grows past the bottom row the console is scrolled up by
//!   the overflow and the anchor follows. Consoles that cannot scroll rely on
//!   the terminal scrolling as text wraps off the last row; the anchor is
//!   adjusted the same way.
//! * A line that cannot fit even with the anchor scrolled to row 0 is
//!   rejected with [`EditError::Unsupported`] before anything is mutated.
//!
//! Completion state (the candidate snapshot being cycled and the span the
//! current pick occupies) lives only until the next non-completion mutation.
//!
//! The editor is single threaded and synchronous; hosts serialize access.

use core_terminal::ConsoleError;
use core_text::BufferError;
use thiserror::Error;

mod completion;
mod editor;
mod layout;

pub use completion::CompletionHandler;
pub use editor::LineEditor;
pub use layout::DisplayLayout;

#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error(transparent)]
    Console(#[from] ConsoleError),
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("line needs {required} cells but only {capacity} fit on the console")]
    Unsupported { required: usize, capacity: usize },
}
