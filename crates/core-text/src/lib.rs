//! Cursor-addressable line buffer plus the text utilities the line editor
//! builds on (seeking, word motions, tokenizing, column formatting).
//!
//! `CursorBuffer` is a plain data structure: it knows nothing about prompts,
//! terminal width, or rendering. Indices are `char` offsets, never bytes.
//!
//! Invariant (must hold after every public call): `0 <= cursor <= len`.

use std::ops::Index;

use thiserror::Error;
use tracing::trace;

pub mod columns;
pub mod motion;
pub mod seek;
pub mod token;

pub use columns::{ColumnGrid, column_rows, format_columns};
pub use seek::{SeekOrigin, SeekOutcome};
pub use token::{Token, quote_if_needed, tokenize, tokens_at_cursor};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("index {index} out of range for buffer of length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("replacing {count} chars at {at} overruns buffer of length {len}")]
    ReplaceOverrun { at: usize, count: usize, len: usize },
}

/// Line text plus a clamped insertion cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl CursorBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pre-filled with `text`, cursor at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor_index(&self) -> usize {
        self.cursor
    }

    pub fn cursor_is_at_end(&self) -> bool {
        self.cursor == self.chars.len()
    }

    pub fn contents(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn as_chars(&self) -> &[char] {
        &self.chars
    }

    /// Bounds-checked character access.
    pub fn char_at(&self, index: usize) -> Result<char, BufferError> {
        self.chars
            .get(index)
            .copied()
            .ok_or(BufferError::OutOfRange {
                index,
                len: self.chars.len(),
            })
    }

    // ---------------------------------------------------------------------------------------------
    // Mutation. Inserts never advance the cursor; callers move it explicitly.
    // ---------------------------------------------------------------------------------------------

    pub fn insert_char(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
    }

    pub fn insert_str(&mut self, text: &str) {
        let at = self.cursor;
        let tail = self.chars.split_off(at);
        self.chars.extend(text.chars());
        self.chars.extend(tail);
        trace!(target: "text.buffer", at, inserted = self.chars.len() - at, "insert");
    }

    /// Overwrite the character under the cursor.
    pub fn replace_char(&mut self, c: char) -> Result<(), BufferError> {
        match self.chars.get_mut(self.cursor) {
            Some(slot) => {
                *slot = c;
                Ok(())
            }
            None => Err(BufferError::OutOfRange {
                index: self.cursor,
                len: self.chars.len(),
            }),
        }
    }

    /// Overwrite `text.chars().count()` characters starting at the cursor.
    pub fn replace_str(&mut self, text: &str) -> Result<(), BufferError> {
        let replacement: Vec<char> = text.chars().collect();
        if replacement.is_empty() {
            return Ok(());
        }
        let end = self.cursor + replacement.len();
        if end > self.chars.len() {
            return Err(BufferError::ReplaceOverrun {
                at: self.cursor,
                count: replacement.len(),
                len: self.chars.len(),
            });
        }
        self.chars[self.cursor..end].copy_from_slice(&replacement);
        Ok(())
    }

    /// Delete the character under the cursor.
    pub fn remove(&mut self) -> bool {
        self.remove_count(1)
    }

    /// Delete `count` characters starting at the cursor. Never deletes past the end:
    /// an overlong request is a no-op returning `false`.
    pub fn remove_count(&mut self, count: usize) -> bool {
        let Some(end) = self.cursor.checked_add(count) else {
            return false;
        };
        if end > self.chars.len() {
            return false;
        }
        self.chars.drain(self.cursor..end);
        true
    }

    /// Backspace: delete the character before the cursor and step back.
    pub fn remove_char_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        true
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    /// Drop everything from the cursor to the end.
    pub fn truncate(&mut self) {
        self.chars.truncate(self.cursor);
    }

    // ---------------------------------------------------------------------------------------------
    // Seeking
    // ---------------------------------------------------------------------------------------------

    pub fn move_cursor(&mut self, origin: SeekOrigin, offset: isize) -> bool {
        self.seek(origin, offset).moved
    }

    /// Seek and report the applied delta. Out-of-range targets leave the cursor untouched.
    pub fn seek(&mut self, origin: SeekOrigin, offset: isize) -> SeekOutcome {
        let len = self.chars.len();
        match seek::resolve(origin, offset, self.cursor, len, Some(len)) {
            Some(target) => {
                let delta = seek::signed_delta(self.cursor, target);
                self.cursor = target;
                SeekOutcome { moved: true, delta }
            }
            None => SeekOutcome::REJECTED,
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Reading
    // ---------------------------------------------------------------------------------------------

    /// Read `count` characters starting at the cursor.
    pub fn read(&self, count: usize) -> Result<String, BufferError> {
        self.read_at(self.cursor, count)
    }

    pub fn read_at(&self, offset: usize, count: usize) -> Result<String, BufferError> {
        Ok(self.span(offset, count)?.iter().collect())
    }

    /// Copy `count` characters from `offset` into `dest[dest_offset..]`.
    pub fn read_into(
        &self,
        offset: usize,
        dest: &mut [char],
        dest_offset: usize,
        count: usize,
    ) -> Result<(), BufferError> {
        let src = self.span(offset, count)?;
        let dest_len = dest.len();
        let target = dest_offset
            .checked_add(count)
            .and_then(|end| dest.get_mut(dest_offset..end))
            .ok_or(BufferError::OutOfRange {
                index: dest_offset.saturating_add(count),
                len: dest_len,
            })?;
        target.copy_from_slice(src);
        Ok(())
    }

    fn span(&self, offset: usize, count: usize) -> Result<&[char], BufferError> {
        offset
            .checked_add(count)
            .and_then(|end| self.chars.get(offset..end))
            .ok_or(BufferError::OutOfRange {
                index: offset.saturating_add(count),
                len: self.chars.len(),
            })
    }
}

impl Index<usize> for CursorBuffer {
    type Output = char;

    fn index(&self, index: usize) -> &char {
        &self.chars[index]
    }
}
