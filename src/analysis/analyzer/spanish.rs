//! Spanish news analyzer.
//!
//! # Pipeline
//!
//! 1. LowercaseCharFilter (Unicode-aware)
//! 2. PatternReplaceCharFilter removing URL-like substrings
//! 3. PatternReplaceCharFilter replacing everything outside `a-z`, `áéíóúüñ`
//!    and whitespace with a space
//! 4. WhitespaceTokenizer
//! 5. StopFilter (313 Spanish stop words)
//! 6. RemoveEmptyFilter

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::{LowercaseCharFilter, PatternReplaceCharFilter};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{RemoveEmptyFilter, StopFilter};
use crate::analysis::tokenizer::WhitespaceTokenizer;
use crate::error::Result;

/// URL-like substrings: `http…`, `https…` or `www…` up to the next whitespace.
pub const URL_PATTERN: &str = r"http\S+|www\S+|https\S+";

/// Any character outside the output alphabet.
pub const NON_ALPHABET_PATTERN: &str = r"[^a-záéíóúüñ\s]";

/// Analyzer producing the cleaned tokens the classifier works on.
pub struct SpanishAnalyzer {
    inner: PipelineAnalyzer,
}

impl SpanishAnalyzer {
    /// Create a new Spanish analyzer with the default stop words.
    pub fn new() -> Result<Self> {
        Self::with_stop_filter(StopFilter::new())
    }

    /// Create a Spanish analyzer with a custom stop filter.
    pub fn with_stop_filter(stop_filter: StopFilter) -> Result<Self> {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new(URL_PATTERN, " ")?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new(
                NON_ALPHABET_PATTERN,
                " ",
            )?))
            .add_filter(Arc::new(stop_filter))
            .add_filter(Arc::new(RemoveEmptyFilter::new()))
            .with_name("spanish");

        Ok(Self { inner: analyzer })
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Default for SpanishAnalyzer {
    fn default() -> Self {
        Self::new().expect("Spanish analyzer should be creatable with default settings")
    }
}

impl Analyzer for SpanishAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "spanish"
    }
}

impl Debug for SpanishAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanishAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
