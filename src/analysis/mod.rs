//! Text analysis module for Veraz.
//!
//! This module turns raw Spanish news text into the cleaned token string the
//! classifier is trained and queried on. The pipeline is assembled from char
//! filters, a tokenizer and token filters, then joined back into a string by
//! [`TextNormalizer`](normalizer::TextNormalizer).

pub mod analyzer;
pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use normalizer::{TextNormalizer, normalize};
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
