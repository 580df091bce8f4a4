//! # Veraz
//!
//! A Spanish-language fake-news detector.
//!
//! ## Features
//!
//! - Spanish text normalization (URL stripping, alphabet restriction, stop words)
//! - TF-IDF (unigrams + bigrams) and logistic regression trained from a labeled CSV
//! - Versioned JSON model artifact, loaded once and shared read-only
//! - LLM-generated summaries with manipulation-signal notes
//! - Command line interface and a small web UI

pub mod analysis;
pub mod analysis_service;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod ml;
pub mod server;
pub mod summary;

pub mod prelude {
    pub use crate::analysis::normalize;
    pub use crate::analysis_service::{AnalysisReport, AnalysisService};
    pub use crate::error::{Result, VerazError};
    pub use crate::ml::{
        ClassifierPipeline, InferenceService, Label, PredictionResult, Trainer, TrainerConfig,
        Verdict,
    };
    pub use crate::summary::Summarizer;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
