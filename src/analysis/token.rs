//! Token types for text analysis.
//!
//! A [`Token`] is the unit that flows through the analysis pipeline, and a
//! [`TokenStream`] is a boxed iterator of tokens handed from one stage to the
//! next.
//!
//! # Examples
//!
//! ```
//! use veraz::analysis::token::Token;
//!
//! let token = Token::with_offsets("noticia", 1, 4, 11);
//! assert_eq!(token.text, "noticia");
//! assert_eq!(token.start_offset, 4);
//! assert!(!token.is_stopped());
//! ```

use std::fmt;

/// A token represents a single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the original token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the filtered text
    pub start_offset: usize,

    /// The byte offset where this token ends in the filtered text
    pub end_offset: usize,

    /// Whether this token has been marked as stopped (removed) by a filter
    pub stopped: bool,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            stopped: false,
        }
    }

    /// Create a new token with explicit byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            stopped: false,
        }
    }

    /// Length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the token text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Mark this token as stopped.
    pub fn stop(mut self) -> Self {
        self.stopped = true;
        self
    }

    /// Check if this token is stopped.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
