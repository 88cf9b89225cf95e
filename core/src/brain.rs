//! Brain — the active trie shared between query threads.
//!
//! Readers take an `Arc` snapshot and match against it without holding any
//! lock. A reload builds the replacement trie off to the side and swaps it
//! in at once, so a reader sees either the old corpus or the new one, never
//! a partially built trie.

use crate::Trie;
use std::sync::{Arc, PoisonError, RwLock};

#[cfg(feature = "serde")]
use crate::{CorpusConfig, GraphmasterError};

/// Shared holder of the currently active [`Trie`].
///
/// # Example
///
/// ```
/// use graphmaster::{Brain, Trie};
///
/// let brain = Brain::new(Trie::new());
/// assert!(brain.current().query("hello", "", "").is_none());
///
/// let mut next = Trie::new();
/// next.insert(&["HELLO"], None, None, "Hi!");
/// brain.replace(next);
///
/// let trie = brain.current();
/// assert_eq!(trie.query("hello", "", "").map(|m| *m.template), Some("Hi!"));
/// ```
#[derive(Debug)]
pub struct Brain<T> {
    active: RwLock<Arc<Trie<T>>>,
}

impl<T> Default for Brain<T> {
    fn default() -> Self {
        Self::new(Trie::new())
    }
}

impl<T> Brain<T> {
    /// Wrap an already built trie.
    #[must_use]
    pub fn new(trie: Trie<T>) -> Self {
        Self {
            active: RwLock::new(Arc::new(trie)),
        }
    }

    /// Snapshot of the active trie. Stays valid after later swaps.
    #[must_use]
    pub fn current(&self) -> Arc<Trie<T>> {
        let guard = self.active.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Make `trie` the active trie. Returns the previous one.
    pub fn replace(&self, trie: Trie<T>) -> Arc<Trie<T>> {
        let next = Arc::new(trie);
        let mut guard = self.active.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}

#[cfg(feature = "serde")]
impl Brain<String> {
    /// Build a brain from a corpus.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found in `corpus`.
    pub fn from_corpus(corpus: &CorpusConfig) -> Result<Self, GraphmasterError> {
        corpus.build().map(Self::new)
    }

    /// Rebuild from `corpus` and swap the result in.
    ///
    /// The old trie stays active if the corpus fails to build.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found in `corpus`.
    pub fn reload(&self, corpus: &CorpusConfig) -> Result<Arc<Trie<String>>, GraphmasterError> {
        let trie = match corpus.build() {
            Ok(trie) => trie,
            Err(e) => {
                tracing::warn!(error = %e, "corpus reload failed, keeping active trie");
                return Err(e);
            }
        };
        let (rules, templates) = (trie.rule_count(), trie.template_count());
        let previous = self.replace(trie);
        tracing::info!(rules, templates, "corpus reloaded");
        Ok(previous)
    }
}
