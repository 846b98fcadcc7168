//! Wrap-around cursor over a fixed snapshot of values.

/// Cursor over an ordered, read-only list that wraps at both ends.
///
/// The cursor starts "before the first value" (`None`). The first
/// `move_next` lands on index 0, the first `move_previous` on the last index.
/// An empty list never leaves the unstarted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircularEnumerator<T> {
    values: Vec<T>,
    cursor: Option<usize>,
}

impl<T> CircularEnumerator<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self {
            values,
            cursor: None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn cursor_index(&self) -> Option<usize> {
        self.cursor
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Value under the cursor, `None` before the first move.
    pub fn current(&self) -> Option<&T> {
        self.cursor.and_then(|i| self.values.get(i))
    }

    pub fn move_next(&mut self) -> bool {
        let len = self.values.len();
        if len == 0 {
            return false;
        }
        self.cursor = Some(match self.cursor {
            None => 0,
            Some(i) => (i + 1) % len,
        });
        true
    }

    pub fn move_previous(&mut self) -> bool {
        let len = self.values.len();
        if len == 0 {
            return false;
        }
        self.cursor = Some(match self.cursor {
            None => len - 1,
            Some(i) => (i + len - 1) % len,
        });
        true
    }

    /// Back to the unstarted state.
    pub fn reset(&mut self) {
        self.cursor = None;
    }
}

impl<T> FromIterator<T> for CircularEnumerator<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
