//! Stdout backend built on crossterm.
//!
//! Every operation queues its commands and flushes immediately; the editor
//! issues few enough writes per keystroke that batching buys nothing. Raw mode
//! is owned separately by [`RawModeGuard`] so a host can keep the console
//! around while toggling the terminal state.

use std::io::{Stdout, Write, stdout};

use crossterm::{
    cursor::{self, MoveTo},
    queue,
    style::Print,
    terminal::{self, Clear, ClearType, ScrollUp, disable_raw_mode, enable_raw_mode},
};
use tracing::{debug, trace};

use crate::{BufferSize, ConsoleError, ConsoleOutput, CursorPos, TerminalCapabilities};

pub struct CrosstermConsole {
    out: Stdout,
    caps: TerminalCapabilities,
}

impl CrosstermConsole {
    pub fn new(caps: TerminalCapabilities) -> Self {
        Self { out: stdout(), caps }
    }

    pub fn capabilities(&self) -> TerminalCapabilities {
        self.caps
    }

    /// Move to the start of a fresh row below the current one. Used by hosts
    /// after a line is accepted or aborted.
    pub fn finish_line(&mut self) -> Result<(), ConsoleError> {
        queue!(self.out, Print("\r\n"))?;
        self.out.flush()?;
        Ok(())
    }
}

impl Default for CrosstermConsole {
    fn default() -> Self {
        Self::new(TerminalCapabilities::detect())
    }
}

fn to_u16(value: usize, pos: CursorPos) -> Result<u16, ConsoleError> {
    u16::try_from(value).map_err(|_| ConsoleError::OutOfRange {
        row: pos.row,
        col: pos.col,
    })
}

impl ConsoleOutput for CrosstermConsole {
    fn cursor_position(&mut self) -> Result<CursorPos, ConsoleError> {
        let (col, row) = cursor::position()?;
        Ok(CursorPos::new(row as usize, col as usize))
    }

    fn set_cursor_position(&mut self, pos: CursorPos) -> Result<(), ConsoleError> {
        let size = self.buffer_size()?;
        if pos.row >= size.height || pos.col >= size.width {
            return Err(ConsoleError::OutOfRange {
                row: pos.row,
                col: pos.col,
            });
        }
        let col = to_u16(pos.col, pos)?;
        let row = to_u16(pos.row, pos)?;
        queue!(self.out, MoveTo(col, row))?;
        self.out.flush()?;
        Ok(())
    }

    fn buffer_size(&self) -> Result<BufferSize, ConsoleError> {
        let (width, height) = terminal::size()?;
        Ok(BufferSize {
            width: usize::from(width.max(1)),
            height: usize::from(height.max(1)),
        })
    }

    fn write(&mut self, text: &str) -> Result<(), ConsoleError> {
        trace!(target: "terminal", len = text.len(), "write");
        queue!(self.out, Print(text))?;
        self.out.flush()?;
        Ok(())
    }

    fn scroll_contents(&mut self, line_count: usize) -> Result<(), ConsoleError> {
        if !self.caps.supports_scroll {
            return Err(ConsoleError::Unsupported("scroll_contents"));
        }
        if line_count == 0 {
            return Ok(());
        }
        let lines = u16::try_from(line_count).unwrap_or(u16::MAX);
        debug!(target: "terminal", lines, "scroll_up");
        queue!(self.out, ScrollUp(lines))?;
        self.out.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ConsoleError> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()?;
        Ok(())
    }
}

/// RAII guard that holds the terminal in raw mode until dropped, restoring
/// cooked mode even on early return or panic unwind.
pub struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    pub fn enter() -> Result<Self, ConsoleError> {
        enable_raw_mode()?;
        debug!(target: "terminal", "raw_mode_enter");
        Ok(Self { active: true })
    }

    /// Restore cooked mode now instead of at drop.
    pub fn leave(&mut self) -> Result<(), ConsoleError> {
        if self.active {
            disable_raw_mode()?;
            self.active = false;
            debug!(target: "terminal", "raw_mode_leave");
        }
        Ok(())
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}
