//! Text normalization: raw utterances and rule text to canonical words.
//!
//! Queries and corpus rules go through the same folding so that indexed
//! words and query words compare byte-for-byte.

use once_cell::sync::Lazy;
use regex::Regex;

/// Any character that is neither a word character nor whitespace.
///
/// `_` is a word character, so it survives normalization.
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("NON_WORD is a valid pattern"));

/// Sentence terminators for multi-sentence utterances.
static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.?!]").expect("SENTENCE_END is a valid pattern"));

/// Convert raw text into the engine's canonical word sequence.
///
/// Uppercases, replaces each punctuation or symbol character with a space,
/// collapses whitespace and splits into words. Empty or all-punctuation
/// input yields an empty vector.
///
/// ```
/// use graphmaster::normalize;
///
/// assert_eq!(normalize("  This is a pattern!  "), vec!["THIS", "IS", "A", "PATTERN"]);
/// assert_eq!(normalize("hello,world"), vec!["HELLO", "WORLD"]);
/// assert!(normalize("?!").is_empty());
/// ```
#[must_use]
pub fn normalize(text: &str) -> Vec<String> {
    let upper = text.to_uppercase();
    NON_WORD
        .replace_all(&upper, " ")
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Tokenize rule text (pattern, that or topic) for insertion.
///
/// Identical to [`normalize()`] except that `*` survives as a word of its
/// own. `_` is a word character and survives anyway.
///
/// ```
/// use graphmaster::tokenize_pattern;
///
/// assert_eq!(tokenize_pattern("what is *?"), vec!["WHAT", "IS", "*"]);
/// assert_eq!(tokenize_pattern("_ rocks"), vec!["_", "ROCKS"]);
/// ```
#[must_use]
pub fn tokenize_pattern(text: &str) -> Vec<String> {
    let upper = text.to_uppercase();
    NON_WORD
        .replace_all(&upper, |caps: &regex::Captures<'_>| {
            if &caps[0] == "*" {
                " * "
            } else {
                " "
            }
        })
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Split a multi-sentence utterance on `.`, `?` and `!`.
///
/// Pieces are trimmed; blank pieces are dropped.
///
/// ```
/// use graphmaster::split_sentences;
///
/// assert_eq!(split_sentences("Hi there. How are you?"), vec!["Hi there", "How are you"]);
/// ```
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
