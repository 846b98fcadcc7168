//! Dispatcher applying an `InputOperation` to a `LineEditor`.
//!
//! Decomposed by concern:
//! * `motion` - cursor movement (char, word, line ends)
//! * `edit`   - deletions, kill/yank, word case transforms, line revert
//! * `recall` - history recall and completion (content replaced from a source)
//! * `undo`   - snapshot bookkeeping and undo dispatch
//!
//! Every operation that can change the line goes through [`recorded`], which
//! pushes the pre-edit snapshot onto the `UndoEngine` only when the contents
//! actually changed. Motions end any typing run so the next typed character
//! starts a fresh undo unit.

use core_keymap::InputOperation;
use core_model::{EditError, LineEditor};
use core_state::UndoEngine;
use core_terminal::ConsoleOutput;
use tracing::trace;

mod edit;
mod motion;
mod recall;
mod undo;

/// Result of dispatching a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// The operation had a visible effect (moved, edited, listed).
    pub handled: bool,
    pub accept: bool,
    pub abort: bool,
}

impl DispatchResult {
    pub fn handled(handled: bool) -> Self {
        Self {
            handled,
            accept: false,
            abort: false,
        }
    }
    pub fn accept() -> Self {
        Self {
            handled: true,
            accept: true,
            abort: false,
        }
    }
    pub fn abort() -> Self {
        Self {
            handled: true,
            accept: false,
            abort: true,
        }
    }
}

/// Apply `op` to the editor. `continuing_completion` is true when the
/// previous operation was a completion step, so cycling resumes instead of
/// refetching candidates.
pub fn dispatch<C: ConsoleOutput>(
    op: InputOperation,
    editor: &mut LineEditor<C>,
    undo: &mut UndoEngine,
    continuing_completion: bool,
) -> Result<DispatchResult, EditError> {
    use InputOperation::*;
    trace!(target: "actions.dispatch", ?op, continuing_completion, "dispatch");
    let handled = match op {
        AcceptLine => return Ok(DispatchResult::accept()),
        Abort => return Ok(DispatchResult::abort()),
        Undo => undo::handle_undo(editor, undo)?,
        ClearScreen => {
            editor.clear_screen()?;
            true
        }
        ToggleInsertMode => {
            editor.set_insert_mode(!editor.insert_mode());
            trace!(target: "actions.dispatch", insert_mode = editor.insert_mode(), "toggle_insert_mode");
            true
        }

        BeginningOfLine | EndOfLine | ForwardChar | BackwardChar | ForwardWord | BackwardWord => {
            undo.end_insert_run();
            motion::handle_motion(op, editor)?
        }

        DeleteChar | BackwardDeleteChar | KillWord | BackwardKillWord | KillLine
        | BackwardKillLine | Yank | RevertLine | UpcaseWord | DowncaseWord | CapitalizeWord => {
            edit::handle_edit(op, editor, undo)?
        }

        PreviousHistory | NextHistory | BeginningOfHistory | EndOfHistory => {
            recall::handle_history(op, editor, undo)?
        }
        CompleteNext | CompletePrevious | InsertCompletions | PossibleCompletions => {
            recall::handle_completion(op, editor, undo, continuing_completion)?
        }
    };
    Ok(DispatchResult::handled(handled))
}

/// Run `edit`, recording the pre-edit snapshot when the line changed.
pub(crate) fn recorded<C: ConsoleOutput>(
    editor: &mut LineEditor<C>,
    undo: &mut UndoEngine,
    edit: impl FnOnce(&mut LineEditor<C>) -> Result<bool, EditError>,
) -> Result<bool, EditError> {
    let before = editor.snapshot();
    let handled = edit(editor)?;
    if editor.contents() != before.contents {
        undo.push_snapshot(before);
    } else {
        undo.end_insert_run();
    }
    Ok(handled)
}
