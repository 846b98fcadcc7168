//! Terminal capability detection.
//!
//! Records the small set of booleans the line editor consults when deciding
//! whether to request a programmatic scroll or rely on the terminal's own
//! scroll-on-wrap behavior.
//!
//! Detection runs once at startup and is optimistic for crossterm backends:
//! every supported platform exposes `ScrollUp`. Hosts that know better (some
//! serial consoles, dumb terminals) construct the struct explicitly.
//!
//! Without scroll support the editor makes room at the bottom by writing the
//! bottom-right cell and assumes the terminal scrolls as part of that write.
//! Terminals that defer the wrap until the next printable character (the
//! xterm "pending wrap" state) leave the display one row short under that
//! assumption, so they must report `supports_scroll = true`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TerminalCapabilities {
    pub supports_scroll: bool,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        let dumb = std::env::var("TERM").is_ok_and(|term| term == "dumb");
        Self {
            supports_scroll: !dumb,
        }
    }

    pub const fn without_scroll() -> Self {
        Self {
            supports_scroll: false,
        }
    }
}

impl Default for TerminalCapabilities {
    fn default() -> Self {
        Self {
            supports_scroll: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_supports_scroll() {
        assert!(TerminalCapabilities::default().supports_scroll);
        assert!(!TerminalCapabilities::without_scroll().supports_scroll);
    }
}
