//! Line-editing session state that outlives a single keystroke: the history
//! of submitted lines, the wrap-around enumerator used for history-style and
//! completion cycling, and the undo snapshot stack.
//!
//! None of these types know about the terminal. The line editor composes them
//! and decides when to mutate them.

pub mod cycle;
pub mod history;
pub mod undo;

pub use cycle::CircularEnumerator;
pub use history::History;
pub use undo::{InsertRun, LineSnapshot, UNDO_HISTORY_MAX, UndoEngine};
