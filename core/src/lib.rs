//! graphmaster - wildcard pattern matching for conversational rule corpora
//!
//! Indexes `(pattern, that, topic) -> template` rules into a token trie and
//! resolves a user turn plus its conversational context to the single
//! highest-priority rule, deterministically.
//!
//! # Architecture
//!
//! - [`normalize()`] — raw text to the canonical uppercase word stream
//! - [`Token`] — closed alphabet of trie edges (literals, two wildcards, sentinels)
//! - [`Trie<T>`] — the index; `T` is an opaque template the engine never inspects
//! - [`Trie::query`] — priority-ordered backtracking search over input, that and topic
//! - [`Trie::capture`] / [`extract`] — second-pass recovery of wildcard text
//! - [`Brain<T>`] — shared, atomically swappable active trie
//!
//! # Key Design Insights
//!
//! 1. **Priority is fixed**: at every node the search tries `_`, then the
//!    literal word, then `*`. The first branch that completes wins.
//!
//! 2. **Wildcards are lazy**: a wildcard consumes the fewest words that still
//!    let the rest of the rule match.
//!
//! 3. **No spans during search**: the matcher only returns the path of edges
//!    it took. Capture text is re-derived from that path against the raw
//!    words, so the hot path stays allocation-light.
//!
//! # Example
//!
//! ```
//! use graphmaster::prelude::*;
//!
//! let mut trie = Trie::new();
//! trie.insert(&["TEST", "STAR", "*", "MIDDLE"], None, None, "star rule".to_string());
//!
//! let m = trie.query("Test star hello middle", "", "").unwrap();
//! assert_eq!(m.template, "star rule");
//!
//! let star = trie.capture("Test star hello middle", "", "", Segment::Input, 1);
//! assert_eq!(star, "hello");
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod brain;
mod capture;
mod matcher;
mod normalize;
mod token;
mod trace;
mod trie;

#[cfg(feature = "serde")]
mod config;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use brain::Brain;
pub use capture::extract;
pub use matcher::{Match, MatchPath};
pub use normalize::{normalize, split_sentences, tokenize_pattern};
pub use token::{Segment, Token};
pub use trace::{MatchStep, MatchTrace};
pub use trie::{RuleKey, Trie};

#[cfg(feature = "serde")]
pub use config::{CategoryConfig, CorpusConfig, TopicConfig};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use graphmaster::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        extract, normalize, Brain, GraphmasterError, Match, MatchPath, MatchStep, MatchTrace,
        RuleKey, Segment, Token, Trie,
    };

    #[cfg(feature = "serde")]
    pub use crate::{CategoryConfig, CorpusConfig, TopicConfig};
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum number of words in a single pattern, that or topic segment
/// accepted by the corpus loader.
///
/// Search cost grows exponentially with the number of wildcards in a rule,
/// so corpora are bounded at load time. [`Trie::insert`] itself does not
/// enforce this.
pub const MAX_PATTERN_WORDS: usize = 256;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from corpus construction and request parsing.
///
/// Matching never fails: a query that finds nothing returns `None`, and a
/// capture that finds nothing returns an empty string. These errors are
/// raised only while building a trie or interpreting caller input.
#[derive(Debug, thiserror::Error)]
pub enum GraphmasterError {
    /// A rule has no pattern words after tokenization.
    #[error("empty pattern in rule {rule}")]
    EmptyPattern {
        /// Short description of the offending rule.
        rule: String,
    },

    /// A pattern, that or topic segment exceeds [`MAX_PATTERN_WORDS`].
    #[error("pattern has {len} words, but maximum allowed is {max}")]
    PatternTooLong {
        /// Actual number of words.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// A capture segment name is not one of the three known kinds.
    #[error("unknown segment \"{name}\", expected star, thatstar or topicstar")]
    UnknownSegment {
        /// The name that failed to parse.
        name: String,
    },

    /// Corpus deserialization failed.
    #[error("invalid corpus config: {message}")]
    InvalidConfig {
        /// The underlying parser message.
        message: String,
    },

    /// A corpus file could not be read.
    #[error("failed to read \"{path}\": {source}")]
    Io {
        /// The path that was being read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
