//! core-actions: turns key events into line editor operations.
//!
//! [`dispatch`] applies a single [`InputOperation`](core_keymap::InputOperation)
//! to a `LineEditor`, recording undo snapshots along the way. [`LineReader`]
//! wraps an editor, a binding table, and an undo engine into a key-at-a-time
//! read session that hosts drive from their own input loop.

pub mod dispatcher;
mod reader;

pub use dispatcher::{DispatchResult, dispatch};
pub use reader::{LineReader, ReadOutcome};
