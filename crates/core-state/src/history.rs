//! Previously submitted lines plus a navigation cursor.
//!
//! Entries are append-only and immutable once added. The navigation cursor
//! uses the same origin + offset seek rules as `CursorBuffer`, over the
//! index domain `[0, len - 1]`. While unset it behaves as if it sat one past
//! the youngest entry, so `Current - 1` reaches the most recent line.

use core_text::SeekOrigin;
use core_text::seek;
use tracing::trace;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            cursor: None,
        }
    }

    /// Append a line. The navigation cursor is left where it was.
    pub fn add(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        trace!(target: "state.history", entries = self.entries.len(), "add");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor_index(&self) -> Option<usize> {
        self.cursor
    }

    /// Entry under the navigation cursor; empty when the cursor is unset.
    pub fn current_entry(&self) -> &str {
        self.cursor
            .and_then(|i| self.entries.get(i))
            .map_or("", String::as_str)
    }

    pub fn move_cursor(&mut self, origin: SeekOrigin, offset: isize) -> bool {
        let len = self.entries.len();
        let current = self.cursor.unwrap_or(len);
        match seek::resolve(origin, offset, current, len, len.checked_sub(1)) {
            Some(target) => {
                self.cursor = Some(target);
                trace!(target: "state.history", index = target, "seek");
                true
            }
            None => false,
        }
    }

    /// Forget the navigation position (next `Current - 1` yields the youngest entry).
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_and_youngest() {
        let mut h = History::with_entries(["xyz", "abcd"]);
        assert!(h.move_cursor(SeekOrigin::Start, 0));
        assert_eq!(h.current_entry(), "xyz");
        assert!(h.move_cursor(SeekOrigin::End, -1));
        assert_eq!(h.current_entry(), "abcd");
    }

    #[test]
    fn previous_from_unset_reaches_youngest() {
        let mut h = History::with_entries(["a", "b", "c"]);
        assert_eq!(h.current_entry(), "");
        assert!(h.move_cursor(SeekOrigin::Current, -1));
        assert_eq!(h.current_entry(), "c");
        assert!(h.move_cursor(SeekOrigin::Current, -1));
        assert_eq!(h.current_entry(), "b");
        assert!(h.move_cursor(SeekOrigin::Current, 1));
        assert_eq!(h.current_entry(), "c");
        assert!(!h.move_cursor(SeekOrigin::Current, 1));
        assert_eq!(h.current_entry(), "c");
    }

    #[test]
    fn empty_history_never_moves() {
        let mut h = History::new();
        assert!(!h.move_cursor(SeekOrigin::Start, 0));
        assert!(!h.move_cursor(SeekOrigin::End, -1));
        assert_eq!(h.cursor_index(), None);
    }

    #[test]
    fn add_keeps_cursor() {
        let mut h = History::with_entries(["one"]);
        assert!(h.move_cursor(SeekOrigin::Start, 0));
        h.add("two");
        assert_eq!(h.cursor_index(), Some(0));
        h.reset_cursor();
        assert!(h.move_cursor(SeekOrigin::Current, -1));
        assert_eq!(h.current_entry(), "two");
    }
}
