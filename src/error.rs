//! Error types for the Veraz library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`VerazError`] enum. The variants follow the failure taxonomy of the
//! detector:
//!
//! - setup errors (missing dataset or model file, missing CSV columns)
//! - validation errors (labels that cannot be mapped to a class)
//! - user-input errors (empty text submitted for analysis)
//!
//! Degraded paths such as a missing API key or a failed summary request are
//! not errors; they are reported as placeholder strings by the summarizer.
//!
//! # Examples
//!
//! ```
//! use veraz::error::{VerazError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(VerazError::invalid_argument("test_fraction must be in (0, 1)"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

use crate::ml::MLError;

/// The main error type for Veraz operations.
#[derive(Error, Debug)]
pub enum VerazError {
    /// I/O errors (missing dataset file, unwritable model path, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Dataset schema errors (missing required columns)
    #[error("Schema error: {0}")]
    Schema(String),

    /// Label values that map to neither class.
    #[error(
        "Unrecognized values in label column: {values:?}. Expected one of: {expected:?}"
    )]
    UnmappableLabels {
        values: Vec<String>,
        expected: Vec<String>,
    },

    /// Training failures (split, fitting, evaluation)
    #[error("Training error: {0}")]
    Training(String),

    /// Model artifact errors (unreadable, wrong format, unsupported version)
    #[error("Model error: {0}")]
    Model(String),

    /// Model artifact does not exist
    #[error("Model file not found: {0}. Train one first with `veraz train`")]
    ModelNotFound(String),

    /// Empty text submitted for analysis
    #[error("{0}")]
    EmptyInput(String),

    /// Dataset download failures
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with VerazError.
pub type Result<T> = std::result::Result<T, VerazError>;

impl VerazError {
    /// Create a new schema error.
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        VerazError::Schema(msg.into())
    }

    /// Create a new training error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        VerazError::Training(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        VerazError::Model(msg.into())
    }

    /// Create a new fetch error.
    pub fn fetch<S: Into<String>>(msg: S) -> Self {
        VerazError::Fetch(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        VerazError::InvalidArgument(msg.into())
    }

    /// Create a new empty input error.
    pub fn empty_input<S: Into<String>>(msg: S) -> Self {
        VerazError::EmptyInput(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        VerazError::Other(msg.into())
    }

    /// Whether this error was caused by the caller's input rather than the system.
    pub fn is_user_error(&self) -> bool {
        matches!(self, VerazError::EmptyInput(_))
    }
}

impl From<MLError> for VerazError {
    fn from(err: MLError) -> Self {
        VerazError::Model(err.to_string())
    }
}
