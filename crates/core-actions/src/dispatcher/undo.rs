//! Undo dispatch.

use core_model::{EditError, LineEditor};
use core_state::UndoEngine;
use core_terminal::ConsoleOutput;
use tracing::trace;

pub(crate) fn handle_undo<C: ConsoleOutput>(
    editor: &mut LineEditor<C>,
    undo: &mut UndoEngine,
) -> Result<bool, EditError> {
    let Some(snapshot) = undo.undo() else {
        trace!(target: "actions.dispatch", op = "undo", "undo_empty");
        return Ok(false);
    };
    editor.restore(&snapshot)?;
    trace!(target: "actions.dispatch", op = "undo", depth = undo.undo_depth(), "undo");
    Ok(true)
}
