//! Command line argument parsing for the Veraz CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{BIND_ENV, DEFAULT_BIND, DEFAULT_MODEL_PATH, MODEL_PATH_ENV};
use crate::dataset::fetch::DEFAULT_KAGGLE_PROGRAM;
use crate::dataset::{DEFAULT_LABEL_COLUMN, DEFAULT_TEXT_COLUMN};
use crate::ml::ClassifierKind;

/// Veraz - Spanish fake-news detector
#[derive(Parser, Debug, Clone)]
#[command(name = "veraz")]
#[command(about = "Spanish fake-news detector: TF-IDF + logistic regression with LLM summaries")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct VerazArgs {
    /// Verbosity level (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl VerazArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose + 1
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a model from a labeled CSV dataset
    Train(TrainArgs),

    /// Estimate the probability that a text is fake news
    Predict(PredictArgs),

    /// Summarize a text with the configured LLM
    Summarize(SummarizeArgs),

    /// Predict and summarize in one step
    Analyze(AnalyzeArgs),

    /// Start the web UI
    Serve(ServeArgs),

    /// Download a dataset from Kaggle
    #[command(name = "fetch-dataset")]
    FetchDataset(FetchDatasetArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Labeled dataset (CSV)
    #[arg(short, long, default_value = "dataset.csv")]
    pub data: PathBuf,

    /// Where to write the model artifact
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    pub out: PathBuf,

    /// Share of the dataset held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    pub test_size: f64,

    /// Seed of the train/test shuffle
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Vocabulary size limit
    #[arg(long, default_value_t = 6000)]
    pub max_features: usize,

    /// Maximum gradient descent iterations
    #[arg(long, default_value_t = 1000)]
    pub max_iter: usize,

    /// Classifier family
    #[arg(long, value_enum, default_value_t = ClassifierKind::Logistic)]
    pub classifier: ClassifierKind,

    /// Name of the text column
    #[arg(long, default_value = DEFAULT_TEXT_COLUMN)]
    pub text_column: String,

    /// Name of the label column
    #[arg(long, default_value = DEFAULT_LABEL_COLUMN)]
    pub label_column: String,
}

/// Where the news text comes from.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// News text
    #[arg(short, long)]
    pub text: Option<String>,

    /// File containing the news text ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Model artifact
    #[arg(short, long, env = MODEL_PATH_ENV, default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for summarization
#[derive(Parser, Debug, Clone)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for analysis
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Model artifact
    #[arg(short, long, env = MODEL_PATH_ENV, default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    #[command(flatten)]
    pub input: InputArgs,

    /// Include the original text in the output
    #[arg(long)]
    pub show_source: bool,
}

/// Arguments for the web UI
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Model artifact
    #[arg(short, long, env = MODEL_PATH_ENV, default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Address to listen on
    #[arg(short, long, env = BIND_ENV, default_value = DEFAULT_BIND)]
    pub bind: String,
}

/// Arguments for dataset download
#[derive(Parser, Debug, Clone)]
pub struct FetchDatasetArgs {
    /// Kaggle dataset identifier (owner/dataset-name)
    #[arg(long)]
    pub dataset: String,

    /// Name of the output CSV
    #[arg(short, long, default_value = "dataset.csv")]
    pub out: PathBuf,

    /// Directory the archive is unpacked into
    #[arg(long, default_value = ".")]
    pub download_dir: PathBuf,

    /// Kaggle CLI executable
    #[arg(long, default_value = DEFAULT_KAGGLE_PROGRAM)]
    pub kaggle_bin: PathBuf,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_train_defaults() {
        let args = VerazArgs::try_parse_from(["veraz", "train"]).unwrap();
        match &args.command {
            Command::Train(train) => {
                assert_eq!(train.data, PathBuf::from("dataset.csv"));
                assert_eq!(train.out, PathBuf::from("model.json"));
                assert_eq!(train.test_size, 0.2);
                assert_eq!(train.seed, 42);
                assert_eq!(train.classifier, ClassifierKind::Logistic);
                assert_eq!(train.text_column, "Text");
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(args.verbosity(), 1);
    }

    #[test]
    fn test_input_requires_exactly_one_source() {
        assert!(VerazArgs::try_parse_from(["veraz", "summarize"]).is_err());
        assert!(
            VerazArgs::try_parse_from(["veraz", "summarize", "--text", "a", "--file", "b"])
                .is_err()
        );
        assert!(VerazArgs::try_parse_from(["veraz", "summarize", "--text", "hola"]).is_ok());
    }

    #[test]
    fn test_global_flags() {
        let args = VerazArgs::try_parse_from([
            "veraz",
            "analyze",
            "--text",
            "hola",
            "--show-source",
            "-f",
            "json",
            "--pretty",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
        assert_eq!(args.verbosity(), 3);

        let quiet = VerazArgs::try_parse_from(["veraz", "-q", "serve"]).unwrap();
        assert_eq!(quiet.verbosity(), 0);
    }

    #[test]
    fn test_fetch_dataset_args() {
        let args = VerazArgs::try_parse_from([
            "veraz",
            "fetch-dataset",
            "--dataset",
            "owner/name",
            "--kaggle-bin",
            "/usr/local/bin/kaggle",
        ])
        .unwrap();
        match args.command {
            Command::FetchDataset(fetch) => {
                assert_eq!(fetch.dataset, "owner/name");
                assert_eq!(fetch.out, PathBuf::from("dataset.csv"));
                assert_eq!(fetch.download_dir, PathBuf::from("."));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
