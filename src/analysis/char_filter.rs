//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the whole text string before it reaches the
//! tokenizer. They run in the order they were added to the pipeline, which
//! matters here: lowercasing must happen before the URL pattern and the
//! alphabet restriction are applied.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseCharFilter`] - Unicode-aware lowercasing
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text and return the filtered text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod pattern_replace;

pub use lowercase::LowercaseCharFilter;
pub use pattern_replace::PatternReplaceCharFilter;
