//! In-memory console: a fixed grid of cells with a cursor.
//!
//! Writes behave like a terminal with auto-wrap: reaching the right edge moves
//! to column 0 of the next row, and wrapping off the bottom row shifts the
//! grid up by one (counted separately from programmatic scrolls).

use crate::{BufferSize, ConsoleError, ConsoleOutput, CursorPos};

#[derive(Debug, Clone)]
pub struct MemoryConsole {
    width: usize,
    height: usize,
    cells: Vec<Vec<char>>,
    cursor: CursorPos,
    scroll_supported: bool,
    scrolled_lines: usize,
    auto_scrolled_lines: usize,
}

impl MemoryConsole {
    /// A blank `width` x `height` console. Both dimensions are at least 1.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![vec![' '; width]; height],
            cursor: CursorPos::default(),
            scroll_supported: true,
            scrolled_lines: 0,
            auto_scrolled_lines: 0,
        }
    }

    /// Console whose `scroll_contents` reports unsupported.
    pub fn without_scroll(mut self) -> Self {
        self.scroll_supported = false;
        self
    }

    pub fn cursor(&self) -> CursorPos {
        self.cursor
    }

    /// Row contents with trailing blanks trimmed.
    pub fn row_text(&self, row: usize) -> String {
        self.cells
            .get(row)
            .map(|r| r.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    pub fn rows(&self) -> Vec<String> {
        (0..self.height).map(|r| self.row_text(r)).collect()
    }

    /// Rows joined top to bottom with trailing blank rows dropped.
    pub fn screen_text(&self) -> String {
        let mut rows = self.rows();
        while rows.last().is_some_and(String::is_empty) {
            rows.pop();
        }
        rows.join("\n")
    }

    pub fn scrolled_lines(&self) -> usize {
        self.scrolled_lines
    }

    pub fn auto_scrolled_lines(&self) -> usize {
        self.auto_scrolled_lines
    }

    fn shift_up(&mut self, count: usize) {
        let count = count.min(self.height);
        self.cells.drain(..count);
        self.cells
            .extend(std::iter::repeat_with(|| vec![' '; self.width]).take(count));
    }
}

impl ConsoleOutput for MemoryConsole {
    fn cursor_position(&mut self) -> Result<CursorPos, ConsoleError> {
        Ok(self.cursor)
    }

    fn set_cursor_position(&mut self, pos: CursorPos) -> Result<(), ConsoleError> {
        if pos.row >= self.height || pos.col >= self.width {
            return Err(ConsoleError::OutOfRange {
                row: pos.row,
                col: pos.col,
            });
        }
        self.cursor = pos;
        Ok(())
    }

    fn buffer_size(&self) -> Result<BufferSize, ConsoleError> {
        Ok(BufferSize {
            width: self.width,
            height: self.height,
        })
    }

    fn write(&mut self, text: &str) -> Result<(), ConsoleError> {
        for c in text.chars() {
            self.cells[self.cursor.row][self.cursor.col] = c;
            self.cursor.col += 1;
            if self.cursor.col == self.width {
                self.cursor.col = 0;
                if self.cursor.row + 1 == self.height {
                    self.shift_up(1);
                    self.auto_scrolled_lines += 1;
                } else {
                    self.cursor.row += 1;
                }
            }
        }
        Ok(())
    }

    fn scroll_contents(&mut self, line_count: usize) -> Result<(), ConsoleError> {
        if !self.scroll_supported {
            return Err(ConsoleError::Unsupported("scroll_contents"));
        }
        if line_count == 0 {
            return Ok(());
        }
        self.shift_up(line_count);
        self.scrolled_lines += line_count.min(self.height);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ConsoleError> {
        for row in &mut self.cells {
            row.fill(' ');
        }
        self.cursor = CursorPos::default();
        Ok(())
    }
}
