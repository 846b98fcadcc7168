//! Cursor motion dispatch.

use core_keymap::InputOperation;
use core_model::{EditError, LineEditor};
use core_terminal::ConsoleOutput;

pub(crate) fn handle_motion<C: ConsoleOutput>(
    op: InputOperation,
    editor: &mut LineEditor<C>,
) -> Result<bool, EditError> {
    match op {
        InputOperation::BeginningOfLine => editor.move_cursor_to_start(),
        InputOperation::EndOfLine => editor.move_cursor_to_end(),
        InputOperation::ForwardChar => editor.move_cursor_forward(1),
        InputOperation::BackwardChar => editor.move_cursor_backward(1),
        InputOperation::ForwardWord => editor.move_cursor_forward_one_word(),
        InputOperation::BackwardWord => editor.move_cursor_backward_one_word(),
        _ => Ok(false),
    }
}
