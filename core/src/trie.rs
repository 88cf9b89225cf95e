//! Token trie holding the rule corpus.
//!
//! Each rule is flattened into a [`RuleKey`] and walked from the root,
//! creating nodes as needed. The template lives on the node reached at the
//! end of the key.

use crate::{GraphmasterError, Token};
use std::collections::HashMap;
use std::fmt;

/// A pattern trie mapping rule keys to opaque templates.
///
/// # Performance
///
/// - Insert: O(k) where k is the rule key length
/// - Literal child access: O(1) via hash map, no allocation
/// - Wildcard and boundary children: direct slots
///
/// # Counters
///
/// [`rule_count()`](Self::rule_count) grows on every insert.
/// [`template_count()`](Self::template_count) grows only when a template is
/// attached to a node that had none. The first template for a key wins.
#[derive(Debug, Clone)]
pub struct Trie<T> {
    root: Node<T>,
    rule_count: usize,
    template_count: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    literals: HashMap<String, Node<T>>,
    underscore: Option<Box<Node<T>>>,
    star: Option<Box<Node<T>>>,
    that: Option<Box<Node<T>>>,
    topic: Option<Box<Node<T>>>,
    template: Option<T>,
}

/// The flattened token sequence a rule is inserted under.
///
/// Layout: `pattern… [ThatBoundary that…] [TopicBoundary topic…] TemplateSlot`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleKey {
    tokens: Vec<Token>,
}

impl RuleKey {
    /// Build a validated key from already tokenized words.
    ///
    /// # Errors
    ///
    /// Returns [`GraphmasterError::EmptyPattern`] if `pattern` has no words.
    pub fn new<S: AsRef<str>>(
        pattern: &[S],
        that: Option<&[S]>,
        topic: Option<&[S]>,
    ) -> Result<Self, GraphmasterError> {
        let key = Self::flatten(pattern, that, topic);
        if pattern.is_empty() {
            return Err(GraphmasterError::EmptyPattern {
                rule: key.to_string(),
            });
        }
        Ok(key)
    }

    fn flatten<S: AsRef<str>>(pattern: &[S], that: Option<&[S]>, topic: Option<&[S]>) -> Self {
        let words = |ws: &[S]| ws.iter().map(|w| Token::from_word(w.as_ref())).collect::<Vec<_>>();

        let mut tokens = words(pattern);
        if let Some(that) = that {
            tokens.push(Token::ThatBoundary);
            tokens.extend(words(that));
        }
        if let Some(topic) = topic {
            tokens.push(Token::TopicBoundary);
            tokens.extend(words(topic));
        }
        tokens.push(Token::TemplateSlot);
        Self { tokens }
    }

    /// The key's tokens, always ending in [`Token::TemplateSlot`].
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

impl<T> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Trie<T> {
    /// Create an empty trie.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            rule_count: 0,
            template_count: 0,
        }
    }

    /// Insert a rule from tokenized words.
    ///
    /// `"_"` and `"*"` become wildcards. A `that` or `topic` segment, when
    /// present, is entered through its boundary edge. Returns `true` if the
    /// template was attached, `false` if the key already had one (the first
    /// template is kept).
    ///
    /// Patterns are assumed non-empty; use [`RuleKey::new`] to validate.
    pub fn insert<S: AsRef<str>>(
        &mut self,
        pattern: &[S],
        that: Option<&[S]>,
        topic: Option<&[S]>,
        template: T,
    ) -> bool {
        let key = RuleKey::flatten(pattern, that, topic);
        self.insert_key(&key, template)
    }

    /// Insert a rule under a prebuilt key.
    ///
    /// Same counter and first-write-wins semantics as [`insert()`](Self::insert).
    pub fn insert_key(&mut self, key: &RuleKey, template: T) -> bool {
        self.rule_count += 1;

        let mut node = &mut self.root;
        for token in key.tokens() {
            if *token == Token::TemplateSlot {
                break;
            }
            node = node.child_or_insert(token);
        }

        if node.template.is_some() {
            tracing::warn!(rule = %key, "duplicate rule key, keeping first template");
            return false;
        }

        node.template = Some(template);
        self.template_count += 1;
        tracing::debug!(rule = %key, "rule learned");
        true
    }

    /// Number of insert calls, including duplicates.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    /// Number of distinct template slots created.
    #[must_use]
    pub fn template_count(&self) -> usize {
        self.template_count
    }

    /// Returns `true` if no template has been attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.template_count == 0
    }

    /// Total number of nodes, including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    pub(crate) fn root(&self) -> &Node<T> {
        &self.root
    }
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            literals: HashMap::new(),
            underscore: None,
            star: None,
            that: None,
            topic: None,
            template: None,
        }
    }
}

impl<T> Node<T> {
    /// Child reached through `token`, if that edge exists.
    pub(crate) fn child(&self, token: &Token) -> Option<&Self> {
        match token {
            Token::Literal(word) => self.literal(word),
            Token::Underscore => self.underscore.as_deref(),
            Token::Star => self.star.as_deref(),
            Token::ThatBoundary => self.that.as_deref(),
            Token::TopicBoundary => self.topic.as_deref(),
            Token::TemplateSlot => None,
        }
    }

    /// Literal child lookup without building a `Token`.
    pub(crate) fn literal(&self, word: &str) -> Option<&Self> {
        self.literals.get(word)
    }

    pub(crate) fn template(&self) -> Option<&T> {
        self.template.as_ref()
    }

    fn child_or_insert(&mut self, token: &Token) -> &mut Self {
        let slot = match token {
            Token::Literal(word) => return self.literals.entry(word.clone()).or_default(),
            Token::Underscore => &mut self.underscore,
            Token::Star => &mut self.star,
            Token::ThatBoundary => &mut self.that,
            Token::TopicBoundary => &mut self.topic,
            Token::TemplateSlot => return self,
        };
        &mut **slot.get_or_insert_with(Box::default)
    }

    fn count(&self) -> usize {
        let boxed = [&self.underscore, &self.star, &self.that, &self.topic];
        1 + self.literals.values().map(Self::count).sum::<usize>()
            + boxed
                .iter()
                .filter_map(|slot| slot.as_deref())
                .map(Self::count)
                .sum::<usize>()
    }
}
