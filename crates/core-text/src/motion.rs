//! Word motion helpers.
//!
//! These operate purely on a `&[char]` + index pair and are free of editor
//! state. A word is a maximal run of non-whitespace characters.

use std::ops::Range;

fn is_space(c: char) -> bool {
    c.is_whitespace()
}

/// Target of a backward word motion from `idx`: skip whitespace to the left,
/// then skip back to the start of that word. All-whitespace prefixes land on 0.
pub fn word_backward(chars: &[char], idx: usize) -> usize {
    let mut i = idx.min(chars.len());
    while i > 0 && is_space(chars[i - 1]) {
        i -= 1;
    }
    while i > 0 && !is_space(chars[i - 1]) {
        i -= 1;
    }
    i
}

/// Target of a forward word motion from `idx`: reach the end of the current
/// (or next) word, then skip trailing whitespace, stopping on the following
/// word start. All-whitespace suffixes land on `chars.len()`.
pub fn word_forward(chars: &[char], idx: usize) -> usize {
    let len = chars.len();
    let mut i = idx.min(len);
    while i < len && is_space(chars[i]) {
        i += 1;
    }
    while i < len && !is_space(chars[i]) {
        i += 1;
    }
    while i < len && is_space(chars[i]) {
        i += 1;
    }
    i
}

/// Span of the word containing `idx`, or of the next word when `idx` sits in
/// whitespace. `None` when no word starts at or after `idx`.
pub fn word_at_or_after(chars: &[char], idx: usize) -> Option<Range<usize>> {
    let len = chars.len();
    let mut start = idx.min(len);
    if start < len && !is_space(chars[start]) {
        while start > 0 && !is_space(chars[start - 1]) {
            start -= 1;
        }
    } else {
        while start < len && is_space(chars[start]) {
            start += 1;
        }
        if start == len {
            return None;
        }
    }
    let mut end = start;
    while end < len && !is_space(chars[end]) {
        end += 1;
    }
    Some(start..end)
}
