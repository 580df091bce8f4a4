//! Text normalization for training and inference.
//!
//! [`normalize`] is the function both the trainer and the inference service
//! call on every text. It runs the [`SpanishAnalyzer`] and joins the surviving
//! tokens with single spaces.
//!
//! # Examples
//!
//! ```
//! use veraz::analysis::normalize;
//!
//! assert_eq!(
//!     normalize("¡Mira esto! https://bit.ly/x El 90% de los MÉDICOS lo confirma"),
//!     "mira médicos confirma"
//! );
//! ```

use std::sync::{Arc, LazyLock};

use crate::analysis::analyzer::{Analyzer, SpanishAnalyzer};

static DEFAULT_NORMALIZER: LazyLock<TextNormalizer> = LazyLock::new(TextNormalizer::default);

/// Normalize text with the process-wide default Spanish normalizer.
pub fn normalize(text: &str) -> String {
    DEFAULT_NORMALIZER.normalize(text)
}

/// Turns raw text into the cleaned, space-joined token string.
#[derive(Clone)]
pub struct TextNormalizer {
    analyzer: Arc<dyn Analyzer>,
}

impl TextNormalizer {
    /// Create a normalizer backed by the given analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self { analyzer }
    }

    /// Normalize a single text.
    ///
    /// The built-in filters cannot fail; if a custom analyzer does, the error
    /// is logged and the text normalizes to an empty string.
    pub fn normalize(&self, text: &str) -> String {
        match self.analyzer.analyze(text) {
            Ok(tokens) => tokens
                .map(|token| token.text)
                .collect::<Vec<_>>()
                .join(" "),
            Err(e) => {
                log::error!("Analyzer '{}' failed: {e}", self.analyzer.name());
                String::new()
            }
        }
    }

    /// Normalize many texts, preserving their order.
    pub fn normalize_all<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<String> {
        use rayon::prelude::*;

        texts
            .par_iter()
            .map(|text| self.normalize(text.as_ref()))
            .collect()
    }

    /// Name of the underlying analyzer.
    pub fn analyzer_name(&self) -> &'static str {
        self.analyzer.name()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(Arc::new(SpanishAnalyzer::default()))
    }
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}
