//! Core analyzer trait definition.
//!
//! Analyzers combine char filters, a tokenizer and token filters into the
//! complete text processing pipeline:
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Filter 1 → ... → Filter N → Token Stream
//! ```
//!
//! # Examples
//!
//! ```
//! use veraz::analysis::analyzer::analyzer::Analyzer;
//! use veraz::analysis::analyzer::spanish::SpanishAnalyzer;
//!
//! let analyzer = SpanishAnalyzer::new().unwrap();
//! let tokens: Vec<_> = analyzer.analyze("El Gobierno anunció").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "gobierno");
//! assert_eq!(tokens[1].text, "anunció");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so a single analyzer can be shared by
/// every request handler of the web server.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
