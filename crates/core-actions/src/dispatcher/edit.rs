//! Text mutation dispatch: deletes, kill/yank, word case, revert.

use core_keymap::InputOperation;
use core_model::{EditError, LineEditor};
use core_state::UndoEngine;
use core_terminal::ConsoleOutput;

use super::recorded;

pub(crate) fn handle_edit<C: ConsoleOutput>(
    op: InputOperation,
    editor: &mut LineEditor<C>,
    undo: &mut UndoEngine,
) -> Result<bool, EditError> {
    recorded(editor, undo, |editor| match op {
        InputOperation::DeleteChar => editor.delete(),
        InputOperation::BackwardDeleteChar => editor.delete_preceding_char(),
        InputOperation::KillWord => editor.delete_forward_to_next_word(),
        InputOperation::BackwardKillWord => editor.delete_backward_through_last_word(),
        InputOperation::KillLine => {
            editor.cut_to_end()?;
            Ok(true)
        }
        InputOperation::BackwardKillLine => {
            editor.cut_to_start()?;
            Ok(true)
        }
        InputOperation::Yank => editor.paste(),
        InputOperation::RevertLine => {
            editor.clear_line(false)?;
            Ok(true)
        }
        InputOperation::UpcaseWord => editor.transform_current_word(str::to_uppercase),
        InputOperation::DowncaseWord => editor.transform_current_word(str::to_lowercase),
        InputOperation::CapitalizeWord => editor.transform_current_word(capitalize),
        _ => Ok(false),
    })
}

/// First character upper case, the rest lower case.
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}
