//! Analyzer implementations that combine tokenizers and filters.

pub mod analyzer;
pub mod pipeline;
pub mod spanish;

pub use analyzer::Analyzer;
pub use pipeline::PipelineAnalyzer;
pub use spanish::SpanishAnalyzer;
