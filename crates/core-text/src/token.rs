//! Whitespace tokenizer that keeps source spans.
//!
//! Completion replaces exactly one token in place, so each token carries the
//! char range it occupies in the line (quotes included) next to its unquoted
//! text. Double quotes group whitespace into a single token; an unterminated
//! quote runs to the end of the line.

use std::borrow::Cow;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token text with grouping quotes removed.
    pub text: String,
    /// Char range in the source line, quotes included.
    pub span: Range<usize>,
}

impl Token {
    fn empty_at(at: usize) -> Self {
        Self {
            text: String::new(),
            span: at..at,
        }
    }
}

pub fn tokenize(chars: &[char]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        let mut text = String::new();
        let mut in_quotes = false;
        while i < chars.len() {
            let c = chars[i];
            if c == '"' {
                in_quotes = !in_quotes;
            } else if c.is_whitespace() && !in_quotes {
                break;
            } else {
                text.push(c);
            }
            i += 1;
        }
        tokens.push(Token {
            text,
            span: start..i,
        });
    }
    tokens
}

/// Tokenize and locate the token under `cursor`. A cursor touching either end
/// of a token counts as inside it; a cursor in open whitespace gets an empty
/// token spliced in at its position so completion can target it.
pub fn tokens_at_cursor(chars: &[char], cursor: usize) -> (Vec<Token>, usize) {
    let mut tokens = tokenize(chars);
    if let Some(index) = tokens
        .iter()
        .position(|t| t.span.start <= cursor && cursor <= t.span.end)
    {
        return (tokens, index);
    }
    let index = tokens
        .iter()
        .position(|t| t.span.start > cursor)
        .unwrap_or(tokens.len());
    tokens.insert(index, Token::empty_at(cursor));
    (tokens, index)
}

/// Wrap `value` in double quotes when it contains whitespace.
pub fn quote_if_needed(value: &str) -> Cow<'_, str> {
    if value.chars().any(char::is_whitespace) {
        Cow::Owned(format!("\"{value}\""))
    } else {
        Cow::Borrowed(value)
    }
}
