//! Trie edge alphabet and capture segment kinds.

use crate::GraphmasterError;
use std::fmt;
use std::str::FromStr;

/// An edge in the pattern trie.
///
/// Wildcards and segment boundaries are distinct variants, never strings,
/// so a rule word that happens to read `THAT` or `TEMPLATE` is always a
/// [`Token::Literal`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// An uppercase word with no internal whitespace.
    Literal(String),
    /// `_` — one or more words, tried before literals.
    Underscore,
    /// `*` — one or more words, tried after literals.
    Star,
    /// Separates the pattern from the that segment.
    ThatBoundary,
    /// Separates the pattern (or that segment) from the topic segment.
    TopicBoundary,
    /// Marks the end of a rule key, where the template is attached.
    TemplateSlot,
}

impl Token {
    /// Map a rule word to its edge: `"_"` and `"*"` are wildcards, every
    /// other word is a literal.
    #[must_use]
    pub fn from_word(word: &str) -> Self {
        match word {
            "_" => Self::Underscore,
            "*" => Self::Star,
            other => Self::Literal(other.to_string()),
        }
    }

    /// Returns `true` for `Underscore` and `Star`.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Underscore | Self::Star)
    }

    /// Returns `true` for `ThatBoundary` and `TopicBoundary`.
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        matches!(self, Self::ThatBoundary | Self::TopicBoundary)
    }

    /// The word of a literal edge.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(word) => Some(word),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(word) => f.write_str(word),
            Self::Underscore => f.write_str("_"),
            Self::Star => f.write_str("*"),
            Self::ThatBoundary => f.write_str("<that>"),
            Self::TopicBoundary => f.write_str("<topic>"),
            Self::TemplateSlot => f.write_str("<template>"),
        }
    }
}

/// Which part of a query a capture request refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// The user's utterance (`star`).
    Input,
    /// The previous bot response (`thatstar`).
    That,
    /// The current topic (`topicstar`).
    Topic,
}

impl Segment {
    /// The boundary token that opens this segment in a match path.
    #[must_use]
    pub fn boundary(self) -> Option<Token> {
        match self {
            Self::Input => None,
            Self::That => Some(Token::ThatBoundary),
            Self::Topic => Some(Token::TopicBoundary),
        }
    }
}

impl FromStr for Segment {
    type Err = GraphmasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "star" | "input" => Ok(Self::Input),
            "thatstar" | "that" => Ok(Self::That),
            "topicstar" | "topic" => Ok(Self::Topic),
            _ => Err(GraphmasterError::UnknownSegment { name: s.to_string() }),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Input => "star",
            Self::That => "thatstar",
            Self::Topic => "topicstar",
        })
    }
}
