//! Capture extraction: the text a wildcard matched.
//!
//! The matcher does not record wildcard spans. Instead the match path is
//! walked again against the raw (unnormalized) words of one segment, and a
//! wildcard's span is recovered by anchoring on the literal that follows it.

use crate::normalize::normalize;
use crate::{Match, MatchPath, Segment, Trie};

/// Recover the text captured by the `index`-th wildcard (1-based) of one
/// segment of `path`, from that segment's raw words.
///
/// Literal path entries advance one word each. A wildcard starts at the
/// current word and ends just before the first later word that equals the
/// following literal in the path, or at the end of `words` when it is the
/// last entry of the segment. Words are compared after normalization; the
/// returned text keeps their raw casing and punctuation.
///
/// Returns an empty string when `index` is 0, exceeds the number of
/// wildcards in the segment, or the segment is absent from the path.
///
/// ```
/// use graphmaster::{extract, Segment, Trie};
///
/// let mut trie = Trie::new();
/// trie.insert(&["*", "HELLO"], None, None, ());
///
/// let m = trie.query("Oh my, hello", "", "").unwrap();
/// let words: Vec<&str> = "Oh my, hello".split_whitespace().collect();
/// assert_eq!(extract(&m.path, Segment::Input, &words, 1), "Oh my,");
/// ```
#[must_use]
pub fn extract<S: AsRef<str>>(path: &MatchPath, segment: Segment, words: &[S], index: usize) -> String {
    let pattern = path.segment(segment);
    let mut pos = 0;
    let mut seen = 0;

    for (j, token) in pattern.iter().enumerate() {
        if !token.is_wildcard() {
            pos += 1;
            continue;
        }

        seen += 1;
        let start = pos;
        let end = match pattern.get(j + 1).and_then(|next| next.as_literal()) {
            Some(anchor) => (start + 1..words.len())
                .find(|&k| same_word(words[k].as_ref(), anchor))
                .unwrap_or(words.len()),
            // Last entry, or followed by another wildcard: runs to the end.
            None => words.len(),
        };

        if seen == index {
            return words.get(start..end).map(join).unwrap_or_default();
        }
        pos = end;
    }

    String::new()
}

/// A raw word anchors only if it normalizes to exactly the literal. Words
/// that split into several (`don't`) or vanish (`--`) never anchor.
fn same_word(raw: &str, literal: &str) -> bool {
    matches!(normalize(raw).as_slice(), [word] if word == literal)
}

fn join<S: AsRef<str>>(words: &[S]) -> String {
    words.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ")
}

fn raw_segment<'a>(segment: Segment, input: &'a str, that: &'a str, topic: &'a str) -> &'a str {
    match segment {
        Segment::Input => input,
        Segment::That => that,
        Segment::Topic => topic,
    }
}

impl<T> Match<'_, T> {
    /// Capture text for this match from the raw text of `segment`.
    ///
    /// `raw` must be the same text (for that segment) the match was
    /// produced from.
    #[must_use]
    pub fn capture(&self, segment: Segment, raw: &str, index: usize) -> String {
        let words: Vec<&str> = raw.split_whitespace().collect();
        extract(&self.path, segment, &words, index)
    }
}

impl<T> Trie<T> {
    /// Match the raw query, then return the text captured by the `index`-th
    /// wildcard (1-based) of `segment`.
    ///
    /// Returns an empty string if nothing matches or the wildcard does not
    /// exist. Callers treat "no capture" and "captured empty text" alike.
    ///
    /// ```
    /// use graphmaster::{Segment, Trie};
    ///
    /// let mut trie = Trie::new();
    /// trie.insert(&["TEST", "STAR", "*", "MIDDLE"], None, None, ());
    ///
    /// assert_eq!(trie.capture("TEST STAR HELLO MIDDLE", "", "", Segment::Input, 1), "HELLO");
    /// assert_eq!(trie.capture("TEST STAR HELLO MIDDLE", "", "", Segment::Input, 2), "");
    /// ```
    #[must_use]
    pub fn capture(&self, input: &str, that: &str, topic: &str, segment: Segment, index: usize) -> String {
        match self.query(input, that, topic) {
            Some(m) => m.capture(segment, raw_segment(segment, input, that, topic), index),
            None => String::new(),
        }
    }
}
