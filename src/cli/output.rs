//! Output formatting for CLI commands.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::analysis_service::AnalysisReport;
use crate::cli::args::{OutputFormat, VerazArgs};
use crate::dataset::FetchOutcome;
use crate::error::Result;
use crate::ml::{PredictionResult, TrainingReport};

/// Plain-text rendering of a command result.
pub trait HumanReadable {
    fn to_human(&self) -> String;
}

/// Result structure for summarization.
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
}

/// Result structure for dataset download.
#[derive(Debug, Serialize, Deserialize)]
pub struct FetchResult {
    pub dataset: String,
    /// Unset when the download contained no CSV.
    pub saved_to: Option<PathBuf>,
    pub download_dir: PathBuf,
}

impl FetchResult {
    pub fn new(dataset: &str, outcome: FetchOutcome, download_dir: PathBuf) -> Self {
        let saved_to = match outcome {
            FetchOutcome::Saved(path) => Some(path),
            FetchOutcome::NoCsvFound => None,
        };
        Self {
            dataset: dataset.to_string(),
            saved_to,
            download_dir,
        }
    }
}

fn prediction_lines(prediction: &PredictionResult) -> String {
    format!(
        "Probabilidad de Fake News: {:.1}%\n{}",
        prediction.percent(),
        prediction.label.label_text()
    )
}

impl HumanReadable for PredictionResult {
    fn to_human(&self) -> String {
        prediction_lines(self)
    }
}

impl HumanReadable for TrainingReport {
    fn to_human(&self) -> String {
        let mut out = format!(
            "Classifier: {}\nTrain/test: {}/{} ({}, test fraction {})\nVocabulary: {} terms\n",
            self.classifier,
            self.train_size,
            self.test_size,
            if self.stratified {
                "stratified"
            } else {
                "not stratified"
            },
            self.test_fraction,
            self.vocabulary_size,
        );
        if let Some(iterations) = self.iterations {
            out.push_str(&format!("Iterations: {iterations}\n"));
        }
        out.push_str(&format!("\n{}\n", self.evaluation));
        if let Some(path) = &self.model_path {
            out.push_str(&format!("\nModel saved to {}", path.display()));
        }
        out
    }
}

impl HumanReadable for SummaryResult {
    fn to_human(&self) -> String {
        self.summary.clone()
    }
}

impl HumanReadable for AnalysisReport {
    fn to_human(&self) -> String {
        let mut out = format!(
            "{}\n\nResumen y análisis:\n{}",
            prediction_lines(&self.prediction),
            self.summary
        );
        if let Some(source) = &self.source_text {
            out.push_str(&format!("\n\nTexto original:\n{source}"));
        }
        out
    }
}

impl HumanReadable for FetchResult {
    fn to_human(&self) -> String {
        match &self.saved_to {
            Some(path) => format!("Dataset {} saved to {}", self.dataset, path.display()),
            None => format!(
                "No CSV files found in {} after downloading {}; check it manually.",
                self.download_dir.display(),
                self.dataset
            ),
        }
    }
}

/// Render a result in the requested format.
pub fn format_result<T: Serialize + HumanReadable>(result: &T, args: &VerazArgs) -> Result<String> {
    match args.output_format {
        OutputFormat::Human => Ok(result.to_human()),
        OutputFormat::Json if args.pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
    }
}

/// Print a result in the requested format.
pub fn output_result<T: Serialize + HumanReadable>(result: &T, args: &VerazArgs) -> Result<()> {
    println!("{}", format_result(result, args)?);
    Ok(())
}
