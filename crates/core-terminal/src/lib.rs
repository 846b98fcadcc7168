//! Terminal output port and its backends.
//!
//! The line editor talks to the terminal exclusively through [`ConsoleOutput`]:
//! cursor get/set, buffer size, plain-text writes, upward scrolling, and a
//! full clear. Two implementations ship here:
//! * [`CrosstermConsole`]: stdout via crossterm, paired with [`RawModeGuard`]
//!   and key event translation ([`input`]).
//! * [`MemoryConsole`]: an in-memory cell grid used by tests and headless hosts.
//!
//! Coordinates are zero-based `(row, col)` cells.

use thiserror::Error;

pub mod capabilities;
mod crossterm_console;
pub mod input;
mod memory;

pub use capabilities::TerminalCapabilities;
pub use crossterm_console::{CrosstermConsole, RawModeGuard};
pub use memory::MemoryConsole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CursorPos {
    pub row: usize,
    pub col: usize,
}

impl CursorPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Visible buffer dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferSize {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("position ({row}, {col}) is outside the console buffer")]
    OutOfRange { row: usize, col: usize },
    #[error("operation not supported by this console: {0}")]
    Unsupported(&'static str),
}

/// Capability set the line editor needs from a terminal.
pub trait ConsoleOutput {
    fn cursor_position(&mut self) -> Result<CursorPos, ConsoleError>;

    fn set_cursor_position(&mut self, pos: CursorPos) -> Result<(), ConsoleError>;

    fn buffer_size(&self) -> Result<BufferSize, ConsoleError>;

    /// Write plain text (no control sequences) at the cursor, advancing it
    /// and wrapping at the buffer width.
    fn write(&mut self, text: &str) -> Result<(), ConsoleError>;

    /// Scroll the visible contents up by `line_count` rows. Zero is a no-op.
    /// Consoles without programmatic scroll return [`ConsoleError::Unsupported`];
    /// callers treat that as recoverable and expect `write` to scroll as soon
    /// as it fills the bottom-right cell.
    fn scroll_contents(&mut self, line_count: usize) -> Result<(), ConsoleError>;

    /// Erase everything and home the cursor.
    fn clear(&mut self) -> Result<(), ConsoleError>;
}

impl<T: ConsoleOutput + ?Sized> ConsoleOutput for &mut T {
    fn cursor_position(&mut self) -> Result<CursorPos, ConsoleError> {
        (**self).cursor_position()
    }

    fn set_cursor_position(&mut self, pos: CursorPos) -> Result<(), ConsoleError> {
        (**self).set_cursor_position(pos)
    }

    fn buffer_size(&self) -> Result<BufferSize, ConsoleError> {
        (**self).buffer_size()
    }

    fn write(&mut self, text: &str) -> Result<(), ConsoleError> {
        (**self).write(text)
    }

    fn scroll_contents(&mut self, line_count: usize) -> Result<(), ConsoleError> {
        (**self).scroll_contents(line_count)
    }

    fn clear(&mut self) -> Result<(), ConsoleError> {
        (**self).clear()
    }
}
