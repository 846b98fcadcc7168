//! Display geometry for a single wrapped line.
//!
//! The line (prompt followed by buffer contents) is laid out left to right
//! starting at the *anchor*: the console cell that was current when the prompt
//! was drawn. Character offset `k` (counted from the first prompt character)
//! occupies cell `anchor.col + k` of a virtual row-major strip, so it lands on
//! row `anchor.row + (anchor.col + k) / width`, column
//! `(anchor.col + k) % width`.
//!
//! Invariants:
//! * `width >= 1` and `height >= 1`.
//! * The anchor only ever moves up (scrolling) or is replaced wholesale when
//!   the prompt is redrawn; it never goes above row 0.

use core_terminal::{BufferSize, CursorPos};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLayout {
    anchor: CursorPos,
    width: usize,
    height: usize,
}

impl DisplayLayout {
    pub fn new(anchor: CursorPos, size: BufferSize) -> Self {
        Self {
            anchor,
            width: size.width.max(1),
            height: size.height.max(1),
        }
    }

    pub fn anchor(&self) -> CursorPos {
        self.anchor
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Console cell for line offset `offset`. May lie below the visible area
    /// until the caller scrolls.
    pub fn position_of(&self, offset: usize) -> CursorPos {
        let cell = self.anchor.col + offset;
        CursorPos::new(self.anchor.row + cell / self.width, cell % self.width)
    }

    /// Rows by which `offset` sits below the last visible row.
    pub fn overflow(&self, offset: usize) -> usize {
        self.position_of(offset)
            .row
            .saturating_sub(self.height - 1)
    }

    /// Cells addressable from the anchor column once the anchor has been
    /// scrolled to the top row.
    pub fn capacity(&self) -> usize {
        (self.width * self.height).saturating_sub(self.anchor.col)
    }

    /// Whether a cursor at `offset` can be shown at all, scrolling allowed.
    pub fn fits(&self, offset: usize) -> bool {
        offset < self.capacity()
    }

    /// Same geometry, new anchor.
    pub fn with_anchor(self, anchor: CursorPos) -> Self {
        Self { anchor, ..self }
    }

    /// Account for the console contents moving up by `rows`.
    pub fn scroll_up(&mut self, rows: usize) {
        self.anchor.row = self.anchor.row.saturating_sub(rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn layout(row: usize, col: usize, width: usize, height: usize) -> DisplayLayout {
        DisplayLayout::new(CursorPos::new(row, col), BufferSize { width, height })
    }

    #[test]
    fn offsets_wrap_at_width() {
        let l = layout(0, 0, 4, 3);
        assert_eq!(l.position_of(3), CursorPos::new(0, 3));
        assert_eq!(l.position_of(4), CursorPos::new(1, 0));
        assert_eq!(l.position_of(6), CursorPos::new(1, 2));
    }

    #[test]
    fn anchor_column_shifts_the_strip() {
        let l = layout(2, 3, 5, 10);
        assert_eq!(l.position_of(0), CursorPos::new(2, 3));
        assert_eq!(l.position_of(2), CursorPos::new(3, 0));
    }

    #[test]
    fn overflow_and_capacity() {
        let mut l = layout(1, 0, 4, 2);
        assert_eq!(l.overflow(3), 0);
        assert_eq!(l.overflow(4), 1);
        assert_eq!(l.capacity(), 8);
        assert!(l.fits(7));
        assert!(!l.fits(8));
        l.scroll_up(1);
        assert_eq!(l.anchor(), CursorPos::new(0, 0));
        l.scroll_up(5);
        assert_eq!(l.anchor().row, 0);
    }
}
