//! One-shot analysis of a news text: prediction, then summary.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VerazError};
use crate::ml::inference::{InferenceService, PredictionResult};
use crate::summary::Summarizer;

/// Shown when the submitted text is empty.
pub const EMPTY_INPUT_MESSAGE: &str = "Por favor pega un texto de noticia para analizar.";

/// Everything the UI shows for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub prediction: PredictionResult,
    /// Probability of fake as a percentage, rounded to one decimal.
    pub probability_percent: f64,
    /// Spanish verdict text.
    pub label_text: String,
    pub summary: String,
    /// The submitted text, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
}

/// Combines the classifier and the summarizer.
#[derive(Debug, Clone)]
pub struct AnalysisService {
    inference: Arc<InferenceService>,
    summarizer: Arc<Summarizer>,
}

impl AnalysisService {
    pub fn new(inference: Arc<InferenceService>, summarizer: Arc<Summarizer>) -> Self {
        Self {
            inference,
            summarizer,
        }
    }

    pub fn inference(&self) -> &InferenceService {
        &self.inference
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    /// Classify `text` and summarize it.
    ///
    /// Empty or whitespace-only text is rejected with [`EMPTY_INPUT_MESSAGE`]
    /// before any work is done.
    pub async fn analyze(&self, text: &str, include_source: bool) -> Result<AnalysisReport> {
        if text.trim().is_empty() {
            return Err(VerazError::empty_input(EMPTY_INPUT_MESSAGE));
        }

        let prediction = self.inference.predict(text);
        log::info!(
            "prediction: {} ({:.1}%)",
            prediction.label,
            prediction.percent()
        );

        let summary = self.summarizer.summarize(text).await;

        Ok(AnalysisReport {
            prediction,
            probability_percent: (prediction.percent() * 10.0).round() / 10.0,
            label_text: prediction.label.label_text().to_string(),
            summary,
            source_text: include_source.then(|| text.to_string()),
        })
    }
}
