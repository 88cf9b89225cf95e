//! Matcher — priority-ordered backtracking search over the trie
//!
//! The search walks input, that and topic as one concatenated stream,
//! entering the that and topic segments through their boundary edges once
//! the preceding segment is exhausted.

use crate::normalize::normalize;
use crate::trace::{NoTrace, Observer};
use crate::trie::Node;
use crate::{Segment, Token, Trie};
use std::fmt;

/// A successful query: the edges taken and the template they led to.
///
/// # INV: first-match-wins
///
/// At every node, `_` is tried before the literal word, and the literal
/// before `*`. The first branch that reaches a template is returned, even
/// if a lower-priority branch would also match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'t, T> {
    /// Trie edges consumed, in order, including boundary sentinels.
    pub path: MatchPath,
    /// The template attached to the matched rule.
    pub template: &'t T,
}

/// Ordered sequence of tokens consumed by a successful match.
///
/// Mirrors the matched rule's key without its trailing
/// [`Token::TemplateSlot`]. This is the only artifact passed on to capture
/// extraction; wildcard spans are not recorded during the search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MatchPath(Vec<Token>);

impl MatchPath {
    /// All tokens in order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    /// Number of tokens in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the path is empty (a rule matched at the root).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The part of the path that matched one segment of the query.
    ///
    /// - `Input`: everything before the first boundary
    /// - `That`: strictly between `<that>` and the next boundary or the end
    /// - `Topic`: strictly after `<topic>`
    ///
    /// Returns an empty slice if the segment's boundary is absent.
    #[must_use]
    pub fn segment(&self, segment: Segment) -> &[Token] {
        let start = match segment.boundary() {
            None => 0,
            Some(boundary) => match self.0.iter().position(|t| *t == boundary) {
                Some(pos) => pos + 1,
                None => return &[],
            },
        };
        let rest = &self.0[start..];
        let end = rest.iter().position(Token::is_boundary).unwrap_or(rest.len());
        &rest[..end]
    }

    /// Number of wildcard tokens within one segment.
    #[must_use]
    pub fn wildcard_count(&self, segment: Segment) -> usize {
        self.segment(segment).iter().filter(|t| t.is_wildcard()).count()
    }
}

impl From<Vec<Token>> for MatchPath {
    fn from(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }
}

impl fmt::Display for MatchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

impl<T> Trie<T> {
    /// Match already normalized words against the trie.
    ///
    /// Returns `None` when no rule matches; that is a normal outcome, not an
    /// error. An empty trie never matches.
    pub fn match_words<S: AsRef<str>>(
        &self,
        input: &[S],
        that: &[S],
        topic: &[S],
    ) -> Option<Match<'_, T>> {
        search(self.root(), input, that, topic, 0, &mut NoTrace).map(into_match)
    }

    /// Normalize raw input, that and topic text, then match.
    ///
    /// ```
    /// use graphmaster::Trie;
    ///
    /// let mut trie = Trie::new();
    /// trie.insert(&["THIS", "IS", "A", "PATTERN"], None, None, "This is a template");
    ///
    /// let m = trie.query("This is a pattern.", "", "").unwrap();
    /// assert_eq!(*m.template, "This is a template");
    /// assert!(trie.query("something else", "", "").is_none());
    /// ```
    pub fn query(&self, input: &str, that: &str, topic: &str) -> Option<Match<'_, T>> {
        let input_words = normalize(input);
        let that_words = normalize(that);
        let topic_words = normalize(topic);
        let result = self.match_words(&input_words, &that_words, &topic_words);

        match &result {
            Some(m) => tracing::debug!(input, that, topic, path = %m.path, "query matched"),
            None => tracing::debug!(input, that, topic, "query found no match"),
        }
        result
    }
}

pub(crate) fn into_match<T>((mut reversed, template): (Vec<Token>, &T)) -> Match<'_, T> {
    reversed.reverse();
    Match {
        path: MatchPath(reversed),
        template,
    }
}

/// Recursive search. On success returns the path in reverse order (tokens
/// are pushed while unwinding) and the template reached.
pub(crate) fn search<'t, T, S, O>(
    node: &'t Node<T>,
    input: &[S],
    that: &[S],
    topic: &[S],
    depth: usize,
    obs: &mut O,
) -> Option<(Vec<Token>, &'t T)>
where
    S: AsRef<str>,
    O: Observer,
{
    let Some((first, suffix)) = input.split_first() else {
        return terminal(node, that, topic, depth, obs);
    };
    let first = first.as_ref();

    // First rule: `_` before anything else.
    if let Some(child) = node.child(&Token::Underscore) {
        if let Some(found) = wildcard(child, Token::Underscore, suffix, that, topic, depth, obs) {
            return Some(found);
        }
    }

    // Second rule: the word itself.
    if let Some(child) = node.literal(first) {
        let step = obs.enter(depth, || Token::Literal(first.to_string()), 1);
        let found = search(child, suffix, that, topic, depth + 1, obs);
        obs.leave(step, found.is_some());
        if let Some((mut path, template)) = found {
            path.push(Token::Literal(first.to_string()));
            return Some((path, template));
        }
    }

    // Third rule: `*` last.
    if let Some(child) = node.child(&Token::Star) {
        return wildcard(child, Token::Star, suffix, that, topic, depth, obs);
    }

    None
}

/// Try a wildcard edge, consuming the current word plus `i` more for
/// increasing `i`. The shortest consumption that completes wins.
fn wildcard<'t, T, S, O>(
    child: &'t Node<T>,
    token: Token,
    suffix: &[S],
    that: &[S],
    topic: &[S],
    depth: usize,
    obs: &mut O,
) -> Option<(Vec<Token>, &'t T)>
where
    S: AsRef<str>,
    O: Observer,
{
    for i in 0..=suffix.len() {
        let step = obs.enter(depth, || token.clone(), i + 1);
        let found = search(child, &suffix[i..], that, topic, depth + 1, obs);
        obs.leave(step, found.is_some());
        if let Some((mut path, template)) = found {
            path.push(token);
            return Some((path, template));
        }
    }
    None
}

/// Input exhausted: move on to the that segment, else the topic segment,
/// else read this node's template.
///
/// The topic segment is only tried when this node has no `<that>` edge at
/// all. If the edge exists, topic is never consulted here: not when the
/// that branch fails further down, and not when there are no that words
/// to feed it.
fn terminal<'t, T, S, O>(
    node: &'t Node<T>,
    that: &[S],
    topic: &[S],
    depth: usize,
    obs: &mut O,
) -> Option<(Vec<Token>, &'t T)>
where
    S: AsRef<str>,
    O: Observer,
{
    let found = match node.child(&Token::ThatBoundary) {
        Some(child) if !that.is_empty() => {
            boundary(child, Token::ThatBoundary, that, topic, depth, obs)
        }
        Some(_) => None,
        None if !topic.is_empty() => node
            .child(&Token::TopicBoundary)
            .and_then(|child| boundary(child, Token::TopicBoundary, topic, &[], depth, obs)),
        None => None,
    };

    found.or_else(|| node.template().map(|template| (Vec::new(), template)))
}

/// Descend through a boundary edge, treating `words` as the new input.
fn boundary<'t, T, S, O>(
    child: &'t Node<T>,
    token: Token,
    words: &[S],
    topic: &[S],
    depth: usize,
    obs: &mut O,
) -> Option<(Vec<Token>, &'t T)>
where
    S: AsRef<str>,
    O: Observer,
{
    let step = obs.enter(depth, || token.clone(), 0);
    let found = search(child, words, &[], topic, depth + 1, obs);
    obs.leave(step, found.is_some());
    found.map(|(mut path, template)| {
        path.push(token);
        (path, template)
    })
}
