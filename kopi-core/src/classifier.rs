//! Keyword-overlap drift detection
//!
//! Cheap, deterministic, and language-agnostic: no second model call per
//! turn. Accepted weaknesses: topics with few significant words always pass
//! with threshold 1, and an unrelated message sharing one long word can
//! false-positive.

use std::collections::HashSet;

// Tokens must be strictly longer than this to count as keywords.
const MIN_KEYWORD_CHARS: usize = 3;

// Divisor in the overlap threshold. A tunable, not a law.
const TOPIC_KEYWORD_DIVISOR: usize = 6;

fn keywords(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .filter(|word| word.chars().count() > MIN_KEYWORD_CHARS)
        .map(|word| word.to_lowercase())
        .collect()
}

/// Decide whether `message` stays on `topic`.
///
/// Both strings are tokenized on whitespace into lowercase keyword sets;
/// the intersection must reach `max(1, topic_keywords / 6)`.
pub fn is_on_topic(message: &str, topic: &str) -> bool {
    let topic_kw = keywords(topic);
    let message_kw = keywords(message);
    let overlap = topic_kw.intersection(&message_kw).count();
    overlap >= std::cmp::max(1, topic_kw.len() / TOPIC_KEYWORD_DIVISOR)
}
