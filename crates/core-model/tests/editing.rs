mod common;

use common::{editor, editor_on, typed};
use core_state::{History, LineSnapshot};
use core_terminal::{ConsoleOutput, CursorPos, MemoryConsole};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn insert_then_seek_then_insert_char() {
    let mut ed = editor(20, 3);
    ed.insert_str("abcd").unwrap();
    assert!(ed.move_cursor_forward(2).unwrap());
    ed.insert('x').unwrap();
    assert_eq!(ed.contents(), "abxcd");
    assert_eq!(ed.buffer().cursor_index(), 2);
    assert_eq!(ed.console().row_text(0), "abxcd");
}

#[test]
fn failed_motion_reports_false_and_stays_put() {
    let mut ed = typed(20, 3, "> ", "abc");
    assert!(!ed.move_cursor_forward(1).unwrap());
    assert!(!ed.move_cursor_backward(4).unwrap());
    assert_eq!(ed.console().cursor(), CursorPos::new(0, 5));
    assert!(ed.move_cursor_to_start().unwrap());
    assert_eq!(ed.console().cursor(), CursorPos::new(0, 2));
}

#[test]
fn delete_and_backspace_are_noops_at_the_edges() {
    let mut ed = typed(20, 3, "> ", "abcd");
    assert!(!ed.delete().unwrap());
    assert!(ed.delete_preceding_char().unwrap());
    assert_eq!(ed.console().row_text(0), "> abc");
    ed.move_cursor_to_start().unwrap();
    assert!(!ed.delete_preceding_char().unwrap());
    assert!(ed.delete().unwrap());
    assert_eq!(ed.contents(), "bc");
    assert_eq!(ed.console().row_text(0), "> bc");
    assert_eq!(ed.console().cursor(), CursorPos::new(0, 2));
}

#[test]
fn word_motions() {
    let mut ed = typed(30, 3, "", "foo bar  baz");
    assert!(ed.move_cursor_backward_one_word().unwrap());
    assert_eq!(ed.buffer().cursor_index(), 9);
    assert!(ed.move_cursor_backward_one_word().unwrap());
    assert_eq!(ed.buffer().cursor_index(), 4);
    assert!(ed.move_cursor_forward_one_word().unwrap());
    assert_eq!(ed.buffer().cursor_index(), 9);
    ed.move_cursor_to_end().unwrap();
    assert!(!ed.move_cursor_forward_one_word().unwrap());
}

#[test]
fn whitespace_only_line_word_motions_reach_the_ends() {
    let mut ed = typed(30, 3, "", "    ");
    ed.move_cursor_backward(2).unwrap();
    assert!(ed.move_cursor_backward_one_word().unwrap());
    assert_eq!(ed.buffer().cursor_index(), 0);
    assert!(ed.move_cursor_forward_one_word().unwrap());
    assert!(ed.at_end());
}

#[test]
fn word_deletes_cover_the_motion_span() {
    let mut ed = typed(30, 3, "> ", "foo bar  baz");
    assert!(ed.delete_backward_through_last_word().unwrap());
    assert_eq!(ed.contents(), "foo bar  ");
    assert!(ed.delete_backward_through_last_word().unwrap());
    assert_eq!(ed.contents(), "foo ");
    assert_eq!(ed.console().row_text(0), "> foo");
    assert_eq!(ed.console().cursor(), CursorPos::new(0, 6));

    let mut ed = typed(30, 3, "", "foo bar baz");
    ed.move_cursor_to_start().unwrap();
    ed.move_cursor_forward_one_word().unwrap();
    assert!(ed.delete_forward_to_next_word().unwrap());
    assert_eq!(ed.contents(), "foo baz");
    assert_eq!(ed.buffer().cursor_index(), 4);
    ed.move_cursor_to_end().unwrap();
    assert!(!ed.delete_forward_to_next_word().unwrap());
}

#[test]
fn cut_to_end_then_paste_restores() {
    let mut ed = typed(30, 3, "> ", "hello world");
    ed.move_cursor_to_start().unwrap();
    ed.move_cursor_forward(5).unwrap();
    ed.cut_to_end().unwrap();
    assert_eq!(ed.contents(), "hello");
    assert_eq!(ed.paste_buffer(), " world");
    assert!(ed.paste().unwrap());
    assert_eq!(ed.contents(), "hello world");
    assert!(ed.at_end());
    // Paste consumes without clearing.
    assert!(ed.paste().unwrap());
    assert_eq!(ed.contents(), "hello world world");
}

#[test]
fn cut_to_start_fills_paste_buffer() {
    let mut ed = typed(30, 3, "> ", "hello world");
    ed.move_cursor_backward(5).unwrap();
    ed.cut_to_start().unwrap();
    assert_eq!(ed.contents(), "world");
    assert_eq!(ed.paste_buffer(), "hello ");
    assert_eq!(ed.console().cursor(), CursorPos::new(0, 2));
}

#[test]
fn paste_with_empty_buffer_is_a_noop() {
    let mut ed = typed(30, 3, "> ", "abc");
    assert!(!ed.paste().unwrap());
    assert_eq!(ed.contents(), "abc");
}

#[test]
fn transform_current_word() {
    let mut ed = typed(30, 3, "", "hello world");
    ed.move_cursor_backward(4).unwrap();
    assert!(ed.transform_current_word(|w| w.to_uppercase()).unwrap());
    assert_eq!(ed.contents(), "hello WORLD");
    assert_eq!(ed.buffer().cursor_index(), 6);
    assert_eq!(ed.console().row_text(0), "hello WORLD");

    let mut ed = typed(30, 3, "", "ab  cd");
    ed.move_cursor_to_start().unwrap();
    ed.move_cursor_forward(2).unwrap();
    assert!(ed.transform_current_word(|w| format!("[{w}]")).unwrap());
    assert_eq!(ed.contents(), "ab  [cd]");
    assert_eq!(ed.buffer().cursor_index(), 4);

    let mut ed = typed(30, 3, "", "ab  ");
    assert!(!ed.transform_current_word(|w| w.to_uppercase()).unwrap());
    assert_eq!(ed.contents(), "ab  ");
}

#[test]
fn typing_honors_overwrite_mode() {
    let mut ed = typed(30, 3, "", "abc");
    ed.set_insert_mode(false);
    ed.move_cursor_to_start().unwrap();
    ed.type_char('X').unwrap();
    assert_eq!(ed.contents(), "Xbc");
    assert_eq!(ed.buffer().cursor_index(), 1);
    ed.move_cursor_to_end().unwrap();
    ed.type_char('d').unwrap();
    assert_eq!(ed.contents(), "Xbcd");
    ed.set_insert_mode(true);
    ed.move_cursor_to_start().unwrap();
    ed.type_char('_').unwrap();
    assert_eq!(ed.contents(), "_Xbcd");
}

#[test]
fn clear_line_discarding_buffer() {
    let mut ed = typed(30, 3, "> ", "abc");
    ed.clear_line(false).unwrap();
    assert_eq!(ed.contents(), "");
    assert_eq!(ed.console().row_text(0), ">");
    assert_eq!(ed.console().cursor(), CursorPos::new(0, 2));
}

#[test]
fn clear_line_preserving_buffer_needs_refresh() {
    let mut ed = typed(30, 3, "> ", "abc");
    ed.clear_line(true).unwrap();
    assert_eq!(ed.contents(), "abc");
    assert_eq!(ed.console().row_text(0), ">");
    assert_eq!(ed.console().cursor(), CursorPos::new(0, 2));
    ed.refresh().unwrap();
    assert_eq!(ed.console().row_text(0), "> abc");
    assert_eq!(ed.console().cursor(), CursorPos::new(0, 5));
}

#[test]
fn clear_screen_redraws_at_top() {
    let mut ed = editor(20, 4);
    ed.console_mut().write("noise").unwrap();
    ed.console_mut().set_cursor_position(CursorPos::new(2, 0)).unwrap();
    ed.set_prompt("> ").unwrap();
    ed.display_prompt().unwrap();
    ed.insert_str("abc").unwrap();
    ed.move_cursor_forward(1).unwrap();
    ed.clear_screen().unwrap();
    assert_eq!(ed.console().screen_text(), "> abc");
    assert_eq!(ed.console().cursor(), CursorPos::new(0, 3));
    assert_eq!(ed.layout().anchor(), CursorPos::new(0, 0));
}

#[test]
fn new_prompt_is_drawn_on_refresh() {
    let mut ed = typed(20, 3, "> ", "abc");
    ed.set_prompt(">>>> ").unwrap();
    ed.insert_str("Z").unwrap();
    assert_eq!(ed.prompt(), ">>>> ");
    assert_eq!(ed.console().row_text(0), "> abcZ");
    assert_eq!(ed.console().cursor(), CursorPos::new(0, 6));

    ed.refresh().unwrap();
    assert_eq!(ed.console().row_text(0), ">>>> abcZ");
    assert_eq!(ed.console().cursor(), CursorPos::new(0, 9));

    ed.set_prompt("$ ").unwrap();
    ed.refresh().unwrap();
    assert_eq!(ed.console().row_text(0), "$ abcZ");
    assert_eq!(ed.console().cursor(), CursorPos::new(0, 6));
}

#[test]
fn restore_snapshot() {
    let mut ed = typed(30, 3, "> ", "abc def");
    let snap = ed.snapshot();
    ed.delete_backward_through_last_word().unwrap();
    ed.restore(&LineSnapshot::new("abc def", 2)).unwrap();
    assert_eq!(ed.contents(), snap.contents);
    assert_eq!(ed.buffer().cursor_index(), 2);
    assert_eq!(ed.console().cursor(), CursorPos::new(0, 4));
}

#[test]
fn history_recall() {
    let history = History::with_entries(["xyz", "abcd"]);
    let mut ed = editor_on(MemoryConsole::new(20, 3), history, None);
    ed.set_prompt("> ").unwrap();
    ed.display_prompt().unwrap();
    assert!(ed.replace_with_oldest_line_in_history().unwrap());
    assert_eq!(ed.contents(), "xyz");
    assert!(ed.at_end());
    assert!(!ed.replace_with_last_line_in_history().unwrap());
    assert_eq!(ed.contents(), "xyz");
    assert!(ed.replace_with_next_line_in_history().unwrap());
    assert_eq!(ed.contents(), "abcd");
    assert_eq!(ed.console().row_text(0), "> abcd");
    assert!(ed.replace_with_oldest_line_in_history().unwrap());
    assert!(ed.replace_with_youngest_line_in_history().unwrap());
    assert_eq!(ed.contents(), "abcd");
    assert_eq!(ed.console().cursor(), CursorPos::new(0, 6));
}

#[test]
fn previous_from_fresh_history_is_youngest() {
    let history = History::with_entries(["one", "two"]);
    let mut ed = editor_on(MemoryConsole::new(20, 3), history, None);
    assert!(ed.replace_with_last_line_in_history().unwrap());
    assert_eq!(ed.contents(), "two");
}

#[test]
fn empty_history_leaves_buffer() {
    let mut ed = typed(20, 3, "", "keep");
    assert!(!ed.replace_with_oldest_line_in_history().unwrap());
    assert!(!ed.replace_with_youngest_line_in_history().unwrap());
    assert!(!ed.replace_with_last_line_in_history().unwrap());
    assert!(!ed.replace_with_next_line_in_history().unwrap());
    assert_eq!(ed.contents(), "keep");
}

#[test]
fn save_to_history_appends() {
    let mut ed = typed(20, 3, "", "ls -la");
    ed.save_to_history();
    assert_eq!(ed.history().entries(), ["ls -la".to_string()]);
}

proptest! {
    #[test]
    fn cut_then_paste_round_trips(text in "[a-z ]{0,30}", at in 0usize..=30) {
        let at = at.min(text.len());
        let mut ed = editor(80, 3);
        ed.set_prompt("> ").unwrap();
        ed.display_prompt().unwrap();
        ed.insert_str(&text).unwrap();
        ed.move_cursor_forward(at).unwrap();
        ed.cut_to_end().unwrap();
        prop_assert_eq!(ed.contents(), &text[..at]);
        ed.paste().unwrap();
        prop_assert_eq!(ed.contents(), text.clone());
        let shown = format!("> {text}");
        prop_assert_eq!(ed.console().row_text(0), shown.trim_end());
    }
}
