//! History recall and completion dispatch.
//!
//! A completion cycle records a single undo snapshot when it starts; the
//! following steps through the same candidate snapshot are not recorded, so
//! one undo returns to the text typed before the cycle began.

use core_keymap::InputOperation;
use core_model::{EditError, LineEditor};
use core_state::UndoEngine;
use core_terminal::ConsoleOutput;
use tracing::trace;

use super::recorded;

pub(crate) fn handle_history<C: ConsoleOutput>(
    op: InputOperation,
    editor: &mut LineEditor<C>,
    undo: &mut UndoEngine,
) -> Result<bool, EditError> {
    recorded(editor, undo, |editor| match op {
        InputOperation::PreviousHistory => editor.replace_with_last_line_in_history(),
        InputOperation::NextHistory => editor.replace_with_next_line_in_history(),
        InputOperation::BeginningOfHistory => editor.replace_with_oldest_line_in_history(),
        InputOperation::EndOfHistory => editor.replace_with_youngest_line_in_history(),
        _ => Ok(false),
    })
}

pub(crate) fn handle_completion<C: ConsoleOutput>(
    op: InputOperation,
    editor: &mut LineEditor<C>,
    undo: &mut UndoEngine,
    continuing: bool,
) -> Result<bool, EditError> {
    match op {
        InputOperation::CompleteNext if continuing => {
            editor.replace_current_token_with_next_completion(true)
        }
        InputOperation::CompletePrevious if continuing => {
            editor.replace_current_token_with_previous_completion(true)
        }
        InputOperation::CompleteNext => recorded(editor, undo, |editor| {
            editor.replace_current_token_with_next_completion(false)
        }),
        InputOperation::CompletePrevious => recorded(editor, undo, |editor| {
            editor.replace_current_token_with_previous_completion(false)
        }),
        InputOperation::InsertCompletions => recorded(editor, undo, |editor| {
            editor.replace_current_token_with_all_completions()
        }),
        InputOperation::PossibleCompletions => {
            let listed = editor.display_all_completions()?;
            trace!(target: "actions.dispatch", listed, "possible_completions");
            Ok(listed)
        }
        _ => Ok(false),
    }
}
