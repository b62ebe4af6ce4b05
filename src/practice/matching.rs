//! Answer checking

use std::sync::OnceLock;

use regex::Regex;

use crate::config::MatchMode;
use crate::resources::format::SEPARATOR;
use crate::resources::Entry;

fn non_word_chars() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9\s]").ok()).as_ref()
}

/// Text the user is expected to type for an entry
pub fn expected_input(entry: &Entry) -> String {
    if entry.primary.is_empty() {
        entry.to_line()
    } else {
        entry.primary.clone()
    }
}

/// The part of a typed answer that is compared. Pasting a whole
/// `primary ->> translation` line counts as typing the primary text.
pub fn answer_text(input: &str) -> &str {
    let input = input.trim();
    match input.split_once(SEPARATOR) {
        Some((primary, _)) => primary.trim(),
        None => input,
    }
}

/// Lowercase, drop everything but ASCII letters, digits and whitespace, then
/// collapse whitespace runs
pub fn normalize_for_word_match(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = match non_word_chars() {
        Some(re) => re.replace_all(&lower, "").into_owned(),
        None => lower
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
            .collect(),
    };
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn is_correct(input: &str, expected: &str, mode: MatchMode) -> bool {
    let answer = answer_text(input);
    match mode {
        MatchMode::ExactMatch => answer == expected.trim(),
        MatchMode::WordMatch => normalize_for_word_match(answer) == normalize_for_word_match(expected),
    }
}

/// Words of a wrong answer, each flagged whether it matches the expected word
/// at the same position
pub fn word_diff(input: &str, expected: &str) -> Vec<(String, bool)> {
    let expected: Vec<&str> = expected.split_whitespace().collect();
    answer_text(input)
        .split_whitespace()
        .enumerate()
        .map(|(i, word)| (word.to_string(), expected.get(i) == Some(&word)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(is_correct("  take off ", "take off", MatchMode::ExactMatch));
        assert!(!is_correct("Take off", "take off", MatchMode::ExactMatch));
        assert!(is_correct("take off ->> 起飞", "take off", MatchMode::ExactMatch));
    }

    #[test]
    fn test_word_match() {
        assert!(is_correct("hello,   WORLD!", "Hello world", MatchMode::WordMatch));
        assert!(is_correct("Its fine", "It's fine.", MatchMode::WordMatch));
        assert!(!is_correct("hello word", "hello world", MatchMode::WordMatch));
    }

    #[test]
    fn test_normalize_for_word_match() {
        assert_eq!(normalize_for_word_match("  A, b;\tC!  "), "a b c");
        assert_eq!(normalize_for_word_match("Don't-stop"), "dontstop");
    }

    #[test]
    fn test_expected_input() {
        assert_eq!(expected_input(&Entry::new("apple", "苹果")), "apple");
        assert_eq!(expected_input(&Entry::new("", "苹果")), " ->> 苹果");
    }

    #[test]
    fn test_word_diff() {
        let diff = word_diff("I has a cat", "I have a cat");
        let flags: Vec<bool> = diff.iter().map(|(_, ok)| *ok).collect();
        assert_eq!(flags, vec![true, false, true, true]);
        assert_eq!(diff[1].0, "has");
    }
}
