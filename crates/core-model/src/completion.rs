//! Completion callback contract and the transient cycling state.

use core_state::CircularEnumerator;
use core_text::tokens_at_cursor;
use tracing::debug;

/// Host supplied completion source: `(tokens, index_of_token_under_cursor)`
/// to candidate strings. Called synchronously on every fresh request and
/// never cached across edits. An empty result means "nothing to offer".
/// Candidates holding control characters cannot be displayed and are dropped.
pub type CompletionHandler = Box<dyn FnMut(&[String], usize) -> Vec<String>>;

/// Candidates for the token under the cursor, plus the span they replace.
#[derive(Debug)]
pub(crate) struct CandidateSet {
    pub(crate) candidates: Vec<String>,
    pub(crate) span_start: usize,
    pub(crate) span_len: usize,
}

pub(crate) fn fetch_candidates(
    handler: &mut CompletionHandler,
    line: &[char],
    cursor: usize,
) -> Option<CandidateSet> {
    let (tokens, index) = tokens_at_cursor(line, cursor);
    let texts: Vec<String> = tokens.iter().map(|t| t.text.clone()).collect();
    let mut candidates = handler(&texts, index);
    let offered = candidates.len();
    candidates.retain(|c| !c.chars().any(char::is_control));
    debug!(
        target: "editor.complete",
        token_index = index,
        offered,
        candidates = candidates.len(),
        "fetch"
    );
    if candidates.is_empty() {
        return None;
    }
    let span = tokens[index].span.clone();
    Some(CandidateSet {
        candidates,
        span_start: span.start,
        span_len: span.len(),
    })
}

/// Active cycle: the candidate snapshot and the span the current pick occupies.
#[derive(Debug)]
pub(crate) struct CompletionCycle {
    pub(crate) candidates: CircularEnumerator<String>,
    pub(crate) span_start: usize,
    pub(crate) span_len: usize,
}

impl From<CandidateSet> for CompletionCycle {
    fn from(set: CandidateSet) -> Self {
        Self {
            candidates: CircularEnumerator::new(set.candidates),
            span_start: set.span_start,
            span_len: set.span_len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fetch_passes_tokens_and_index() {
        let mut seen = Vec::new();
        let mut handler: CompletionHandler = Box::new(move |tokens: &[String], index: usize| {
            seen.push((tokens.to_vec(), index));
            vec![format!("{}!", tokens[index]), format!("seen{}", seen.len())]
        });
        let line: Vec<char> = "git che".chars().collect();
        let set = fetch_candidates(&mut handler, &line, 7).unwrap();
        assert_eq!(set.candidates, vec!["che!".to_string(), "seen1".to_string()]);
        assert_eq!((set.span_start, set.span_len), (4, 3));
    }

    #[test]
    fn empty_candidate_list_is_none() {
        let mut handler: CompletionHandler = Box::new(|_: &[String], _: usize| Vec::new());
        assert!(fetch_candidates(&mut handler, &[], 0).is_none());
    }

    #[test]
    fn candidates_with_control_characters_are_dropped() {
        let mut handler: CompletionHandler =
            Box::new(|_: &[String], _: usize| vec!["a\tb".to_string(), "ab".to_string()]);
        let set = fetch_candidates(&mut handler, &['a'], 1).unwrap();
        assert_eq!(set.candidates, vec!["ab".to_string()]);

        let mut handler: CompletionHandler =
            Box::new(|_: &[String], _: usize| vec!["x\ny".to_string()]);
        assert!(fetch_candidates(&mut handler, &['x'], 1).is_none());
    }
}
