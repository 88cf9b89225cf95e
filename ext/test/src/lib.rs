//! graphmaster-test: Test helpers and conformance fixtures
//!
//! Provides a conversational [`Turn`] (input plus that/topic context) and a
//! small builder for tries from rule tuples, so tests across the workspace
//! read the same way.
//!
//! # Example
//!
//! ```
//! use graphmaster_test::prelude::*;
//!
//! let trie = rules(&[
//!     ("HELLO *", "", "", "greeting"),
//!     ("YES", "DO YOU LIKE *", "", "agreed"),
//! ]);
//!
//! let turn = Turn::new("yes").with_that("Do you like cheese?");
//! assert_eq!(turn.respond(&trie), Some("agreed".to_string()));
//! assert_eq!(turn.star(&trie, Segment::That, 1), "cheese?");
//! ```

use graphmaster::prelude::*;

#[cfg(feature = "fixtures")]
pub mod fixture;

/// One conversational turn: the user's utterance plus its context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Turn {
    /// The user's utterance.
    pub input: String,
    /// The previous response.
    pub that: String,
    /// The current topic.
    pub topic: String,
}

impl Turn {
    /// A turn with no that/topic context.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    /// Set the previous response (builder pattern).
    #[must_use]
    pub fn with_that(mut self, that: impl Into<String>) -> Self {
        self.that = that.into();
        self
    }

    /// Set the topic (builder pattern).
    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Match this turn.
    #[must_use]
    pub fn query<'t, T>(&self, trie: &'t Trie<T>) -> Option<Match<'t, T>> {
        trie.query(&self.input, &self.that, &self.topic)
    }

    /// Template of the winning rule, cloned.
    #[must_use]
    pub fn respond<T: Clone>(&self, trie: &Trie<T>) -> Option<T> {
        self.query(trie).map(|m| m.template.clone())
    }

    /// Capture text of the `index`-th wildcard in `segment`.
    #[must_use]
    pub fn star<T>(&self, trie: &Trie<T>, segment: Segment, index: usize) -> String {
        trie.capture(&self.input, &self.that, &self.topic, segment, index)
    }
}

/// Build a trie from `(pattern, that, topic, template)` tuples.
///
/// Rule text goes through the same tokenizer the corpus loader uses. Blank
/// `that`/`topic` means the segment is absent.
///
/// # Panics
///
/// Panics if a pattern is empty after tokenization.
#[must_use]
pub fn rules(rules: &[(&str, &str, &str, &str)]) -> Trie<String> {
    let mut trie = Trie::new();
    for (pattern, that, topic, template) in rules {
        let pattern = graphmaster::tokenize_pattern(pattern);
        let that = graphmaster::tokenize_pattern(that);
        let topic = graphmaster::tokenize_pattern(topic);
        let key = RuleKey::new(
            &pattern[..],
            (!that.is_empty()).then_some(&that[..]),
            (!topic.is_empty()).then_some(&topic[..]),
        )
        .unwrap_or_else(|e| panic!("bad test rule: {e}"));
        trie.insert_key(&key, (*template).to_string());
    }
    trie
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{rules, Turn};
    pub use graphmaster::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_builder() {
        let turn = Turn::new("hi").with_that("hello").with_topic("greetings");

        assert_eq!(turn.input, "hi");
        assert_eq!(turn.that, "hello");
        assert_eq!(turn.topic, "greetings");
    }

    #[test]
    fn rules_builds_contexts() {
        let trie = rules(&[
            ("HI", "", "", "plain"),
            ("HI", "HELLO", "", "after hello"),
            ("*", "", "GREETINGS", "on topic"),
        ]);

        assert_eq!(trie.template_count(), 3);
        assert_eq!(Turn::new("hi").respond(&trie), Some("plain".into()));
        assert_eq!(Turn::new("hi").with_that("hello").respond(&trie), Some("after hello".into()));
        assert_eq!(Turn::new("what").with_topic("greetings").respond(&trie), Some("on topic".into()));
        assert_eq!(Turn::new("what").respond(&trie), None);
    }

    #[test]
    fn turn_star_reads_each_segment() {
        let trie = rules(&[("I LIKE *", "WHAT DO YOU _", "*", "t")]);
        let turn = Turn::new("I like trains")
            .with_that("What do you enjoy?")
            .with_topic("hobbies");

        assert_eq!(turn.star(&trie, Segment::Input, 1), "trains");
        assert_eq!(turn.star(&trie, Segment::That, 1), "enjoy?");
        assert_eq!(turn.star(&trie, Segment::Topic, 1), "hobbies");
    }

    #[test]
    #[should_panic(expected = "bad test rule")]
    fn rules_rejects_empty_pattern() {
        let _ = rules(&[("!!", "", "", "t")]);
    }
}
