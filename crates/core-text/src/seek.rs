//! Reference-point seeking shared by `CursorBuffer` and `History`.
//!
//! Both containers address an integer domain `[0, max]` with a cursor and
//! accept "origin + signed offset" requests. A request whose target lands
//! outside the domain is rejected outright: callers never observe a partial
//! move.

/// Anchor a relative seek offset is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeekOrigin {
    Start,
    Current,
    End,
}

/// Result of a seek that reports the signed distance actually travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekOutcome {
    pub moved: bool,
    pub delta: isize,
}

impl SeekOutcome {
    pub const REJECTED: SeekOutcome = SeekOutcome {
        moved: false,
        delta: 0,
    };
}

/// Resolve `origin + offset` against a domain whose `End` origin is `end` and
/// whose highest addressable index is `max`.
///
/// Returns `None` when the target falls outside `[0, max]`, or when `max` is
/// `None` (empty domain).
pub fn resolve(
    origin: SeekOrigin,
    offset: isize,
    current: usize,
    end: usize,
    max: Option<usize>,
) -> Option<usize> {
    let max = max?;
    let base = match origin {
        SeekOrigin::Start => 0,
        SeekOrigin::Current => current,
        SeekOrigin::End => end,
    };
    base.checked_add_signed(offset).filter(|target| *target <= max)
}

/// Signed distance from `from` to `to`.
pub fn signed_delta(from: usize, to: usize) -> isize {
    if to >= from {
        isize::try_from(to - from).unwrap_or(isize::MAX)
    } else {
        isize::try_from(from - to).map_or(isize::MIN, |d| -d)
    }
}
