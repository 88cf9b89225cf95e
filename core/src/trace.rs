//! Search trace types for debugging match behavior.
//!
//! A trace records every edge the matcher entered, in order, with whether
//! that branch reached a template. Use [`Trie::query_with_trace`] to see why
//! a query resolved to a given rule, or why it backtracked away from one.
//!
//! # Example
//!
//! ```
//! use graphmaster::Trie;
//!
//! let mut trie = Trie::new();
//! trie.insert(&["HELLO", "*"], None, None, "greeting");
//!
//! let trace = trie.query_with_trace("hello there friend", "", "");
//! assert_eq!(trace.result.map(|m| *m.template), Some("greeting"));
//! for step in &trace.steps {
//!     println!("{:indent$}{} ({} words) matched={}", "", step.token, step.consumed, step.matched, indent = step.depth * 2);
//! }
//! ```

use crate::matcher::{into_match, search, Match};
use crate::normalize::normalize;
use crate::{Token, Trie};

/// Receives search events. The untraced matcher uses [`NoTrace`], which
/// compiles away.
pub(crate) trait Observer {
    /// An edge is about to be followed. Returns a handle for [`leave`](Self::leave).
    fn enter(&mut self, depth: usize, token: impl FnOnce() -> Token, consumed: usize) -> usize;

    /// The branch entered under `step` finished.
    fn leave(&mut self, step: usize, matched: bool);
}

pub(crate) struct NoTrace;

impl Observer for NoTrace {
    #[inline(always)]
    fn enter(&mut self, _: usize, _: impl FnOnce() -> Token, _: usize) -> usize {
        0
    }

    #[inline(always)]
    fn leave(&mut self, _: usize, _: bool) {}
}

impl Observer for Vec<MatchStep> {
    fn enter(&mut self, depth: usize, token: impl FnOnce() -> Token, consumed: usize) -> usize {
        self.push(MatchStep {
            depth,
            token: token(),
            consumed,
            matched: false,
        });
        self.len() - 1
    }

    fn leave(&mut self, step: usize, matched: bool) {
        if let Some(entry) = self.get_mut(step) {
            entry.matched = matched;
        }
    }
}

/// One edge followed during the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchStep {
    /// Distance from the root (0 = an edge out of the root).
    pub depth: usize,
    /// The edge followed.
    pub token: Token,
    /// Words consumed by this edge: 1 for a literal, 1 or more for a
    /// wildcard, 0 for a boundary.
    pub consumed: usize,
    /// Whether the branch below this edge reached a template.
    pub matched: bool,
}

/// Trace of a full query.
///
/// # INV: `result` == `query()` result
///
/// The `result` field always equals what [`Trie::query`] (or
/// [`Trie::match_words`]) returns for the same input.
#[derive(Debug, Clone)]
pub struct MatchTrace<'t, T> {
    /// The final result.
    pub result: Option<Match<'t, T>>,
    /// Every edge entered, in the order it was entered.
    pub steps: Vec<MatchStep>,
}

impl<T> MatchTrace<'_, T> {
    /// Number of edges entered whose branch did not reach a template.
    #[must_use]
    pub fn dead_ends(&self) -> usize {
        self.steps.iter().filter(|s| !s.matched).count()
    }
}

impl<T> Trie<T> {
    /// [`match_words`](Self::match_words) with a full search trace.
    pub fn match_words_with_trace<S: AsRef<str>>(
        &self,
        input: &[S],
        that: &[S],
        topic: &[S],
    ) -> MatchTrace<'_, T> {
        let mut steps = Vec::new();
        let result = search(self.root(), input, that, topic, 0, &mut steps).map(into_match);
        MatchTrace { result, steps }
    }

    /// [`query`](Self::query) with a full search trace.
    pub fn query_with_trace(&self, input: &str, that: &str, topic: &str) -> MatchTrace<'_, T> {
        self.match_words_with_trace(&normalize(input), &normalize(that), &normalize(topic))
    }
}
