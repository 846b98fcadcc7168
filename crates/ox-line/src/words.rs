//! Word-list completion source.

use core_model::CompletionHandler;

/// Commands offered by the demo REPL.
pub const COMMANDS: &[&str] = &[
    "clear", "echo", "exit", "help", "history", "quit", "restart", "start", "status", "stop",
];

/// Completion handler offering every word that starts with the token under
/// the cursor. An empty token matches everything.
pub fn completer(words: &[&str]) -> CompletionHandler {
    let mut words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    words.sort();
    words.dedup();
    Box::new(move |tokens: &[String], index: usize| {
        let prefix = tokens.get(index).map_or("", String::as_str);
        words
            .iter()
            .filter(|w| w.starts_with(prefix))
            .cloned()
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn prefix_matches_in_sorted_order() {
        let mut complete = completer(COMMANDS);
        assert_eq!(
            complete(&tokens(&["st"]), 0),
            vec!["start", "status", "stop"]
        );
        assert_eq!(complete(&tokens(&["echo", "x"]), 1), Vec::<String>::new());
    }

    #[test]
    fn empty_token_matches_all() {
        let mut complete = completer(&["b", "a", "b"]);
        assert_eq!(complete(&tokens(&[""]), 0), vec!["a", "b"]);
        assert_eq!(complete(&[], 0), vec!["a", "b"]);
    }
}
