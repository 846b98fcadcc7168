use std::iter;

use core_state::{History, LineSnapshot};
use core_terminal::{ConsoleError, ConsoleOutput, CursorPos};
use core_text::{BufferError, CursorBuffer, SeekOrigin, column_rows, motion, quote_if_needed};
use tracing::{debug, trace};

use crate::completion::{CompletionCycle, CompletionHandler, fetch_candidates};
use crate::{DisplayLayout, EditError};

fn ensure_plain(text: &str) -> Result<(), EditError> {
    if text.chars().any(char::is_control) {
        return Err(EditError::InvalidArgument("text contains control characters"));
    }
    Ok(())
}

fn signed(count: usize) -> isize {
    isize::try_from(count).unwrap_or(isize::MAX)
}

pub struct LineEditor<C: ConsoleOutput> {
    console: C,
    buffer: CursorBuffer,
    history: History,
    completion_handler: Option<CompletionHandler>,
    prompt: String,
    /// Prompt as last drawn; the layout of the visible line is based on it.
    shown_prompt: String,
    paste_buffer: String,
    completion: Option<CompletionCycle>,
    insert_mode: bool,
    layout: DisplayLayout,
}

impl<C: ConsoleOutput> LineEditor<C> {
    /// Editor anchored at the console's current cursor position. Nothing is
    /// drawn until [`LineEditor::display_prompt`].
    pub fn new(
        mut console: C,
        buffer: CursorBuffer,
        history: History,
        completion_handler: Option<CompletionHandler>,
    ) -> Result<Self, EditError> {
        let anchor = console.cursor_position()?;
        let size = console.buffer_size()?;
        Ok(Self {
            console,
            buffer,
            history,
            completion_handler,
            prompt: String::new(),
            shown_prompt: String::new(),
            paste_buffer: String::new(),
            completion: None,
            insert_mode: true,
            layout: DisplayLayout::new(anchor, size),
        })
    }

    // ---------------------------------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------------------------------

    pub fn contents(&self) -> String {
        self.buffer.contents()
    }

    pub fn at_end(&self) -> bool {
        self.buffer.cursor_is_at_end()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Takes effect on the next `display_prompt`, `refresh` or `clear_screen`;
    /// edits in between keep laying out the line behind the prompt on screen.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) -> Result<(), EditError> {
        let prompt = prompt.into();
        ensure_plain(&prompt)?;
        self.prompt = prompt;
        Ok(())
    }

    pub fn buffer(&self) -> &CursorBuffer {
        &self.buffer
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn has_completion_handler(&self) -> bool {
        self.completion_handler.is_some()
    }

    pub fn set_completion_handler(&mut self, handler: Option<CompletionHandler>) {
        self.completion = None;
        self.completion_handler = handler;
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Direct port access. Writing through it desynchronizes the display;
    /// follow up with `display_prompt`.
    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn paste_buffer(&self) -> &str {
        &self.paste_buffer
    }

    pub fn insert_mode(&self) -> bool {
        self.insert_mode
    }

    pub fn set_insert_mode(&mut self, insert_mode: bool) {
        self.insert_mode = insert_mode;
    }

    pub fn layout(&self) -> DisplayLayout {
        self.layout
    }

    pub fn snapshot(&self) -> LineSnapshot {
        LineSnapshot::new(self.buffer.contents(), self.buffer.cursor_index())
    }

    /// Start a fresh, empty line without touching the console. Follow with
    /// `display_prompt`.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.completion = None;
    }

    pub fn into_parts(self) -> (C, CursorBuffer, History) {
        (self.console, self.buffer, self.history)
    }

    // ---------------------------------------------------------------------------------------------
    // Whole-line display
    // ---------------------------------------------------------------------------------------------

    /// Anchor at the console cursor and draw prompt plus buffer.
    pub fn display_prompt(&mut self) -> Result<(), EditError> {
        let anchor = self.console.cursor_position()?;
        let size = self.console.buffer_size()?;
        self.layout = DisplayLayout::new(anchor, size);
        debug!(target: "editor.render", row = anchor.row, col = anchor.col, width = size.width, height = size.height, "anchor");
        self.redraw_line(0)
    }

    /// Redraw prompt plus buffer at the current anchor.
    pub fn refresh(&mut self) -> Result<(), EditError> {
        self.redraw_line(self.line_end())
    }

    pub fn clear_screen(&mut self) -> Result<(), EditError> {
        let size = self.console.buffer_size()?;
        self.console.clear()?;
        self.layout = DisplayLayout::new(CursorPos::default(), size);
        self.redraw_line(0)
    }

    /// Blank the editable region. With `preserve_buffer` the buffer is kept and
    /// the console cursor is left at the start of the blanked region until the
    /// next `refresh`; otherwise the buffer is emptied and the display is in sync.
    pub fn clear_line(&mut self, preserve_buffer: bool) -> Result<(), EditError> {
        self.completion = None;
        let start = self.layout.position_of(self.prompt_len());
        let blanks: String = iter::repeat_n(' ', self.buffer.len()).collect();
        self.console.set_cursor_position(start)?;
        self.console.write(&blanks)?;
        self.console.set_cursor_position(start)?;
        if !preserve_buffer {
            self.buffer.clear();
        }
        Ok(())
    }

    /// Park the console cursor at column 0 of the row after the line so the
    /// host can print output or draw the next prompt.
    pub fn finish_line(&mut self) -> Result<(), EditError> {
        let end_row = self.layout.position_of(self.line_end()).row;
        let row = self.next_free_row(end_row)?;
        self.console.set_cursor_position(CursorPos::new(row, 0))?;
        Ok(())
    }

    // ---------------------------------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------------------------------

    pub fn move_cursor_to_start(&mut self) -> Result<bool, EditError> {
        self.seek(SeekOrigin::Start, 0)
    }

    pub fn move_cursor_to_end(&mut self) -> Result<bool, EditError> {
        self.seek(SeekOrigin::End, 0)
    }

    pub fn move_cursor_forward(&mut self, count: usize) -> Result<bool, EditError> {
        self.seek(SeekOrigin::Current, signed(count))
    }

    pub fn move_cursor_backward(&mut self, count: usize) -> Result<bool, EditError> {
        self.seek(SeekOrigin::Current, -signed(count))
    }

    pub fn move_cursor_forward_one_word(&mut self) -> Result<bool, EditError> {
        let target = motion::word_forward(self.buffer.as_chars(), self.buffer.cursor_index());
        self.seek_to(target)
    }

    pub fn move_cursor_backward_one_word(&mut self) -> Result<bool, EditError> {
        let target = motion::word_backward(self.buffer.as_chars(), self.buffer.cursor_index());
        self.seek_to(target)
    }

    fn seek(&mut self, origin: SeekOrigin, offset: isize) -> Result<bool, EditError> {
        if !self.buffer.move_cursor(origin, offset) {
            trace!(target: "editor.render", ?origin, offset, "seek_rejected");
            return Ok(false);
        }
        self.sync_cursor()?;
        Ok(true)
    }

    /// Word motions report whether the cursor actually went anywhere.
    fn seek_to(&mut self, target: usize) -> Result<bool, EditError> {
        if target == self.buffer.cursor_index() {
            return Ok(false);
        }
        self.seek(SeekOrigin::Start, signed(target))
    }

    // ---------------------------------------------------------------------------------------------
    // Editing
    // ---------------------------------------------------------------------------------------------

    /// Insert at the cursor without advancing it.
    pub fn insert(&mut self, c: char) -> Result<(), EditError> {
        let mut utf8 = [0; 4];
        self.insert_str(c.encode_utf8(&mut utf8))
    }

    /// Insert at the cursor without advancing it. Rejected as unsupported when
    /// the resulting line could never fit on the console.
    pub fn insert_str(&mut self, text: &str) -> Result<(), EditError> {
        ensure_plain(text)?;
        if text.is_empty() {
            return Ok(());
        }
        self.completion = None;
        self.replace_span(self.buffer.cursor_index(), 0, text)
    }

    /// Overwrite the character under the cursor; fails at the end of the line.
    pub fn replace(&mut self, c: char) -> Result<(), EditError> {
        let mut utf8 = [0; 4];
        self.replace_str(c.encode_utf8(&mut utf8))
    }

    pub fn replace_str(&mut self, text: &str) -> Result<(), EditError> {
        ensure_plain(text)?;
        let at = self.buffer.cursor_index();
        self.buffer.replace_str(text)?;
        self.completion = None;
        let end = self.line_end();
        self.render_from(self.prompt_len() + at, end)
    }

    /// Keyboard typing: insert (or overwrite, in overwrite mode away from the
    /// end) and step past the new character.
    pub fn type_char(&mut self, c: char) -> Result<(), EditError> {
        if self.insert_mode || self.buffer.cursor_is_at_end() {
            self.insert(c)?;
        } else {
            self.replace(c)?;
        }
        self.seek(SeekOrigin::Current, 1)?;
        Ok(())
    }

    /// Forward delete. No-op at the end.
    pub fn delete(&mut self) -> Result<bool, EditError> {
        if self.buffer.cursor_is_at_end() {
            return Ok(false);
        }
        self.completion = None;
        self.replace_span(self.buffer.cursor_index(), 1, "")?;
        Ok(true)
    }

    /// Backspace. No-op at the start.
    pub fn delete_preceding_char(&mut self) -> Result<bool, EditError> {
        let cursor = self.buffer.cursor_index();
        if cursor == 0 {
            return Ok(false);
        }
        self.completion = None;
        self.replace_span(cursor - 1, 1, "")?;
        Ok(true)
    }

    pub fn delete_backward_through_last_word(&mut self) -> Result<bool, EditError> {
        let cursor = self.buffer.cursor_index();
        let target = motion::word_backward(self.buffer.as_chars(), cursor);
        if target == cursor {
            return Ok(false);
        }
        self.completion = None;
        self.replace_span(target, cursor - target, "")?;
        Ok(true)
    }

    pub fn delete_forward_to_next_word(&mut self) -> Result<bool, EditError> {
        let cursor = self.buffer.cursor_index();
        let target = motion::word_forward(self.buffer.as_chars(), cursor);
        if target == cursor {
            return Ok(false);
        }
        self.completion = None;
        self.replace_span(cursor, target - cursor, "")?;
        Ok(true)
    }

    /// Kill from the cursor to the end into the paste buffer.
    pub fn cut_to_end(&mut self) -> Result<(), EditError> {
        let cursor = self.buffer.cursor_index();
        let count = self.buffer.len() - cursor;
        self.paste_buffer = self.buffer.read(count)?;
        self.completion = None;
        self.replace_span(cursor, count, "")
    }

    /// Kill from the start of the line to the cursor into the paste buffer.
    pub fn cut_to_start(&mut self) -> Result<(), EditError> {
        let cursor = self.buffer.cursor_index();
        self.paste_buffer = self.buffer.read_at(0, cursor)?;
        self.completion = None;
        self.replace_span(0, cursor, "")
    }

    /// Insert the paste buffer and step past it. `false` when there is nothing
    /// to paste.
    pub fn paste(&mut self) -> Result<bool, EditError> {
        if self.paste_buffer.is_empty() {
            return Ok(false);
        }
        let text = self.paste_buffer.clone();
        let at = self.buffer.cursor_index();
        self.completion = None;
        self.replace_span(at, 0, &text)?;
        self.place_cursor(at + text.chars().count())?;
        Ok(true)
    }

    /// Replace the word under (or after) the cursor with `transform(word)` and
    /// leave the cursor on its first character. `false` when no word follows.
    pub fn transform_current_word(
        &mut self,
        transform: impl FnOnce(&str) -> String,
    ) -> Result<bool, EditError> {
        let Some(span) =
            motion::word_at_or_after(self.buffer.as_chars(), self.buffer.cursor_index())
        else {
            return Ok(false);
        };
        let word = self.buffer.read_at(span.start, span.len())?;
        let replacement = transform(&word);
        self.completion = None;
        self.replace_span(span.start, span.len(), &replacement)?;
        Ok(true)
    }

    /// Replace the whole line, keeping the unchanged prefix on screen, and put
    /// the cursor at `cursor` (clamped to the new length).
    pub fn set_line(&mut self, text: &str, cursor: usize) -> Result<(), EditError> {
        let new: Vec<char> = text.chars().collect();
        let old = self.buffer.as_chars();
        let common = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
        let removed = old.len() - common;
        let tail: String = new[common..].iter().collect();
        self.completion = None;
        self.replace_span(common, removed, &tail)?;
        self.place_cursor(cursor.min(new.len()))
    }

    pub fn restore(&mut self, snapshot: &LineSnapshot) -> Result<(), EditError> {
        self.set_line(&snapshot.contents, snapshot.cursor)
    }

    pub fn save_to_history(&mut self) {
        self.history.add(self.buffer.contents());
    }

    // ---------------------------------------------------------------------------------------------
    // History recall
    // ---------------------------------------------------------------------------------------------

    pub fn replace_with_last_line_in_history(&mut self) -> Result<bool, EditError> {
        self.recall(SeekOrigin::Current, -1)
    }

    pub fn replace_with_next_line_in_history(&mut self) -> Result<bool, EditError> {
        self.recall(SeekOrigin::Current, 1)
    }

    pub fn replace_with_oldest_line_in_history(&mut self) -> Result<bool, EditError> {
        self.recall(SeekOrigin::Start, 0)
    }

    pub fn replace_with_youngest_line_in_history(&mut self) -> Result<bool, EditError> {
        self.recall(SeekOrigin::End, -1)
    }

    fn recall(&mut self, origin: SeekOrigin, offset: isize) -> Result<bool, EditError> {
        if !self.history.move_cursor(origin, offset) {
            return Ok(false);
        }
        let entry = self.history.current_entry().to_string();
        self.set_line(&entry, usize::MAX)?;
        Ok(true)
    }

    // ---------------------------------------------------------------------------------------------
    // Completion
    // ---------------------------------------------------------------------------------------------

    pub fn replace_current_token_with_next_completion(
        &mut self,
        last_operation_was_completion: bool,
    ) -> Result<bool, EditError> {
        self.cycle_completion(last_operation_was_completion, true)
    }

    pub fn replace_current_token_with_previous_completion(
        &mut self,
        last_operation_was_completion: bool,
    ) -> Result<bool, EditError> {
        self.cycle_completion(last_operation_was_completion, false)
    }

    fn cycle_completion(&mut self, continuing: bool, forward: bool) -> Result<bool, EditError> {
        if !continuing || self.completion.is_none() {
            self.completion = None;
            let Some(handler) = self.completion_handler.as_mut() else {
                return Ok(false);
            };
            let Some(set) =
                fetch_candidates(handler, self.buffer.as_chars(), self.buffer.cursor_index())
            else {
                return Ok(false);
            };
            self.completion = Some(CompletionCycle::from(set));
        }
        let Some(cycle) = self.completion.as_mut() else {
            return Ok(false);
        };
        if forward {
            cycle.candidates.move_next();
        } else {
            cycle.candidates.move_previous();
        }
        let Some(pick) = cycle.candidates.current() else {
            return Ok(false);
        };
        let replacement = quote_if_needed(pick).into_owned();
        let (start, len) = (cycle.span_start, cycle.span_len);
        trace!(target: "editor.complete", index = ?cycle.candidates.cursor_index(), forward, "cycle");

        self.replace_span(start, len, &replacement)?;
        let new_len = replacement.chars().count();
        if let Some(cycle) = self.completion.as_mut() {
            cycle.span_len = new_len;
        }
        self.place_cursor(start + new_len)?;
        Ok(true)
    }

    pub fn replace_current_token_with_all_completions(&mut self) -> Result<bool, EditError> {
        let Some(handler) = self.completion_handler.as_mut() else {
            return Ok(false);
        };
        let cursor = self.buffer.cursor_index();
        let Some(set) = fetch_candidates(handler, self.buffer.as_chars(), cursor) else {
            return Ok(false);
        };
        let mut replacement = set
            .candidates
            .iter()
            .map(|c| quote_if_needed(c))
            .collect::<Vec<_>>()
            .join(" ");
        replacement.push(' ');
        self.completion = None;
        self.replace_span(set.span_start, set.span_len, &replacement)?;
        self.place_cursor(set.span_start + replacement.chars().count())?;
        Ok(true)
    }

    /// List every candidate in columns below the line, then redraw the line
    /// underneath the listing.
    pub fn display_all_completions(&mut self) -> Result<bool, EditError> {
        let Some(handler) = self.completion_handler.as_mut() else {
            return Ok(false);
        };
        let cursor = self.buffer.cursor_index();
        let Some(set) = fetch_candidates(handler, self.buffer.as_chars(), cursor) else {
            return Ok(false);
        };
        let width = self.layout.width();
        // Pieces stop short of the last column so writes never wrap on their own.
        let piece_len = width.saturating_sub(1).max(1);
        let mut row = self.layout.position_of(self.line_end()).row;
        for line in column_rows(&set.candidates, width) {
            let chars: Vec<char> = line.trim_end().chars().collect();
            if chars.is_empty() {
                row = self.next_free_row(row)?;
                continue;
            }
            for piece in chars.chunks(piece_len) {
                row = self.next_free_row(row)?;
                self.console.set_cursor_position(CursorPos::new(row, 0))?;
                self.console.write(&piece.iter().collect::<String>())?;
            }
        }
        row = self.next_free_row(row)?;
        debug!(target: "editor.complete", candidates = set.candidates.len(), prompt_row = row, "listed");

        self.layout = self.layout.with_anchor(CursorPos::new(row, 0));
        self.redraw_line(0)?;
        Ok(true)
    }

    // ---------------------------------------------------------------------------------------------
    // Rendering internals
    // ---------------------------------------------------------------------------------------------

    fn prompt_len(&self) -> usize {
        self.shown_prompt.chars().count()
    }

    /// Line offset just past the last buffer character.
    fn line_end(&self) -> usize {
        self.prompt_len() + self.buffer.len()
    }

    fn ensure_fits(&self, end: usize) -> Result<(), EditError> {
        if self.layout.fits(end) {
            return Ok(());
        }
        Err(EditError::Unsupported {
            required: end + 1,
            capacity: self.layout.capacity(),
        })
    }

    fn sync_cursor(&mut self) -> Result<(), EditError> {
        let pos = self
            .layout
            .position_of(self.prompt_len() + self.buffer.cursor_index());
        self.console.set_cursor_position(pos)?;
        Ok(())
    }

    fn move_buffer_cursor(&mut self, index: usize) -> Result<(), EditError> {
        if self.buffer.move_cursor(SeekOrigin::Start, signed(index)) {
            return Ok(());
        }
        Err(BufferError::OutOfRange {
            index,
            len: self.buffer.len(),
        }
        .into())
    }

    fn place_cursor(&mut self, index: usize) -> Result<(), EditError> {
        self.move_buffer_cursor(index)?;
        self.sync_cursor()
    }

    /// Draw the whole line with the current prompt, blanking through
    /// `old_end` when the redrawn line is shorter.
    fn redraw_line(&mut self, old_end: usize) -> Result<(), EditError> {
        let end = self.prompt.chars().count() + self.buffer.len();
        self.ensure_fits(end)?;
        if self.shown_prompt != self.prompt {
            self.shown_prompt.clone_from(&self.prompt);
        }
        self.render_from(0, old_end.max(end))
    }

    /// Replace `len` chars at `start` with `text` and re-render the changed
    /// tail. Validation and the fit check run before anything is mutated; the
    /// buffer cursor ends up at `start`.
    fn replace_span(&mut self, start: usize, len: usize, text: &str) -> Result<(), EditError> {
        ensure_plain(text)?;
        let buffer_len = self.buffer.len();
        if start + len > buffer_len {
            return Err(BufferError::OutOfRange {
                index: start + len,
                len: buffer_len,
            }
            .into());
        }
        let old_end = self.line_end();
        let new_end = old_end - len + text.chars().count();
        self.ensure_fits(new_end)?;

        self.move_buffer_cursor(start)?;
        if len > 0 && !self.buffer.remove_count(len) {
            return Err(BufferError::OutOfRange {
                index: start + len,
                len: buffer_len,
            }
            .into());
        }
        self.buffer.insert_str(text);
        self.render_from(self.prompt_len() + start, old_end)
    }

    /// Rewrite cells from line offset `from` to the end of the line, blanking
    /// through `old_end` when the line shrank, then resync the cursor.
    fn render_from(&mut self, from: usize, old_end: usize) -> Result<(), EditError> {
        let end = self.line_end();
        let overflow = self.layout.overflow(end).min(self.layout.anchor().row);
        let mut deferred = 0;
        if overflow > 0 {
            match self.console.scroll_contents(overflow) {
                Ok(()) => {
                    debug!(target: "editor.render", rows = overflow, "scroll");
                    self.layout.scroll_up(overflow);
                }
                Err(ConsoleError::Unsupported(_)) => {
                    debug!(target: "editor.render", rows = overflow, "scroll_unsupported_wrap_instead");
                    deferred = overflow;
                }
                Err(e) => return Err(e.into()),
            }
        }

        let text: String = self
            .shown_prompt
            .chars()
            .chain(self.buffer.as_chars().iter().copied())
            .skip(from)
            .chain(iter::repeat_n(' ', old_end.saturating_sub(end)))
            .collect();
        trace!(target: "editor.render", from, end, old_end, "rewrite_tail");
        self.console.set_cursor_position(self.layout.position_of(from))?;
        self.console.write(&text)?;
        self.layout.scroll_up(deferred);
        self.sync_cursor()
    }

    /// Row below `row`, scrolling the console when `row` is the last one.
    fn next_free_row(&mut self, row: usize) -> Result<usize, EditError> {
        let last = self.layout.height() - 1;
        if row < last {
            return Ok(row + 1);
        }
        match self.console.scroll_contents(1) {
            Ok(()) => {}
            Err(ConsoleError::Unsupported(_)) => {
                // Writing the bottom-right cell wraps and the console scrolls
                // itself. Deferred-wrap terminals must advertise scroll support.
                let corner = CursorPos::new(last, self.layout.width() - 1);
                self.console.set_cursor_position(corner)?;
                self.console.write(" ")?;
            }
            Err(e) => return Err(e.into()),
        }
        self.layout.scroll_up(1);
        Ok(last)
    }
}

impl<C: ConsoleOutput> std::fmt::Debug for LineEditor<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineEditor")
            .field("prompt", &self.prompt)
            .field("buffer", &self.buffer)
            .field("insert_mode", &self.insert_mode)
            .field("layout", &self.layout)
            .field("completing", &self.completion.is_some())
            .finish_non_exhaustive()
    }
}
