//! Labeled news datasets: CSV loading and download.

pub mod fetch;
pub mod loader;

use serde::{Deserialize, Serialize};

pub use fetch::{DatasetFetcher, FetchOutcome};
pub use loader::{CsvDatasetLoader, load_csv};

/// Default name of the text column.
pub const DEFAULT_TEXT_COLUMN: &str = "Text";

/// Default name of the label column.
pub const DEFAULT_LABEL_COLUMN: &str = "class";

/// One dataset row, before label mapping or normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub raw_text: String,
    pub class_label: String,
}

impl LabeledExample {
    pub fn new<T: Into<String>, L: Into<String>>(raw_text: T, class_label: L) -> Self {
        Self {
            raw_text: raw_text.into(),
            class_label: class_label.into(),
        }
    }
}
