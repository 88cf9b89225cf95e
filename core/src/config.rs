//! Corpus config: the serde-deserializable form of a rule set.
//!
//! A corpus is a list of categories plus optional topic groups. Each
//! category carries its pattern, an optional `that` pattern and an opaque
//! template string. Topic groups apply their name as the topic pattern of
//! every category inside them.
//!
//! ```yaml
//! categories:
//!   - pattern: "HELLO *"
//!     template: "Hi there!"
//!   - pattern: "YES"
//!     that: "DO YOU LIKE *"
//!     template: "Glad to hear it."
//! topics:
//!   - name: "_ FOOD"
//!     categories:
//!       - pattern: "*"
//!         template: "I could eat."
//! ```
//!
//! [`CorpusConfig::build()`] validates every rule and produces a
//! [`Trie<String>`].

use crate::normalize::tokenize_pattern;
use crate::{GraphmasterError, RuleKey, Trie, MAX_PATTERN_WORDS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A complete rule corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CorpusConfig {
    /// Categories outside any topic group.
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,

    /// Topic groups.
    #[serde(default)]
    pub topics: Vec<TopicConfig>,
}

/// One rule: `(pattern, that, topic) -> template`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    /// Input pattern. `*` and `_` are wildcards.
    pub pattern: String,

    /// Pattern over the previous response. Blank means absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub that: Option<String>,

    /// Topic pattern. Blank means absent. Not allowed inside a topic group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    /// Opaque response template.
    pub template: String,
}

/// Categories sharing one topic pattern.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TopicConfig {
    /// Topic pattern applied to every category in the group.
    pub name: String,

    /// The grouped categories.
    pub categories: Vec<CategoryConfig>,
}

impl CorpusConfig {
    /// Parse a corpus from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`GraphmasterError::InvalidConfig`] on malformed input.
    pub fn from_yaml(text: &str) -> Result<Self, GraphmasterError> {
        serde_yaml::from_str(text).map_err(|e| GraphmasterError::InvalidConfig {
            message: e.to_string(),
        })
    }

    /// Parse a corpus from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GraphmasterError::InvalidConfig`] on malformed input.
    pub fn from_json(text: &str) -> Result<Self, GraphmasterError> {
        serde_json::from_str(text).map_err(|e| GraphmasterError::InvalidConfig {
            message: e.to_string(),
        })
    }

    /// Read a corpus file. `.json` files are parsed as JSON, anything else
    /// as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`GraphmasterError::Io`] if the file cannot be read, or
    /// [`GraphmasterError::InvalidConfig`] if it does not parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GraphmasterError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GraphmasterError::Io {
            path: path.display().to_string(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text),
            _ => Self::from_yaml(&text),
        }
    }

    /// Total number of categories, grouped or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len() + self.topics.iter().map(|t| t.categories.len()).sum::<usize>()
    }

    /// Returns `true` if the corpus has no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate every category and insert it into a fresh trie.
    ///
    /// Duplicate keys are not an error: the first template is kept and the
    /// duplicate shows up as `rule_count() > template_count()`.
    ///
    /// # Errors
    ///
    /// - [`GraphmasterError::EmptyPattern`] if a pattern has no words
    /// - [`GraphmasterError::PatternTooLong`] if any segment exceeds [`MAX_PATTERN_WORDS`]
    /// - [`GraphmasterError::InvalidConfig`] if a grouped category sets its own topic
    pub fn build(&self) -> Result<Trie<String>, GraphmasterError> {
        let mut trie = Trie::new();

        for category in &self.categories {
            category.insert_into(&mut trie, category.topic.as_deref())?;
        }

        for group in &self.topics {
            for category in &group.categories {
                if category.topic.is_some() {
                    return Err(GraphmasterError::InvalidConfig {
                        message: format!(
                            "category {:?} sets a topic inside topic group {:?}",
                            category.pattern, group.name
                        ),
                    });
                }
                category.insert_into(&mut trie, Some(group.name.as_str()))?;
            }
        }

        tracing::info!(
            rules = trie.rule_count(),
            templates = trie.template_count(),
            nodes = trie.node_count(),
            "corpus built"
        );
        Ok(trie)
    }
}

impl CategoryConfig {
    fn insert_into(&self, trie: &mut Trie<String>, topic: Option<&str>) -> Result<bool, GraphmasterError> {
        let pattern = tokenize_pattern(&self.pattern);
        if pattern.is_empty() {
            return Err(GraphmasterError::EmptyPattern {
                rule: format!("{:?} -> {:?}", self.pattern, self.template),
            });
        }

        let that = segment(self.that.as_deref());
        let topic = segment(topic);
        for words in [Some(&pattern), that.as_ref(), topic.as_ref()].into_iter().flatten() {
            if words.len() > MAX_PATTERN_WORDS {
                return Err(GraphmasterError::PatternTooLong {
                    len: words.len(),
                    max: MAX_PATTERN_WORDS,
                });
            }
        }

        let key = RuleKey::new(&pattern[..], that.as_deref(), topic.as_deref())?;
        Ok(trie.insert_key(&key, self.template.clone()))
    }
}

/// Tokenize an optional segment. Blank text counts as absent.
fn segment(text: Option<&str>) -> Option<Vec<String>> {
    text.map(tokenize_pattern).filter(|words| !words.is_empty())
}
