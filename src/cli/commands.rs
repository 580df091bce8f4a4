//! Command implementations for the Veraz CLI.

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use crate::analysis_service::{AnalysisService, EMPTY_INPUT_MESSAGE};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{ServerConfig, SummaryConfig};
use crate::dataset::DatasetFetcher;
use crate::error::{Result, VerazError};
use crate::ml::{InferenceService, PipelineConfig, TfIdfConfig, Trainer, TrainerConfig};
use crate::ml::logistic::LogisticRegressionConfig;
use crate::server;
use crate::summary::Summarizer;

/// Execute a CLI command.
pub fn execute_command(args: VerazArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args, &args),
        Command::Predict(predict_args) => predict(predict_args, &args),
        Command::Summarize(summarize_args) => summarize(summarize_args, &args),
        Command::Analyze(analyze_args) => analyze(analyze_args, &args),
        Command::Serve(serve_args) => serve(serve_args),
        Command::FetchDataset(fetch_args) => fetch_dataset(fetch_args, &args),
    }
}

/// Read the news text from `--text`, `--file` or stdin (`--file -`).
///
/// Blank input is rejected before any model or network work.
fn read_input(input: &InputArgs) -> Result<String> {
    let text = match (&input.text, &input.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) if path == Path::new("-") => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => String::new(),
    };

    if text.trim().is_empty() {
        return Err(VerazError::empty_input(EMPTY_INPUT_MESSAGE));
    }
    Ok(text)
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Runtime::new()?)
}

/// Build a trainer configuration from command line arguments.
pub fn trainer_config(args: &TrainArgs) -> TrainerConfig {
    TrainerConfig {
        test_fraction: args.test_size,
        seed: args.seed,
        text_column: args.text_column.clone(),
        label_column: args.label_column.clone(),
        pipeline: PipelineConfig {
            vectorizer: TfIdfConfig {
                max_features: Some(args.max_features),
                ..TfIdfConfig::default()
            },
            classifier: args.classifier,
            logistic: LogisticRegressionConfig {
                max_iter: args.max_iter,
                ..LogisticRegressionConfig::default()
            },
        },
        ..TrainerConfig::default()
    }
}

/// Train a model.
fn train(args: &TrainArgs, cli_args: &VerazArgs) -> Result<()> {
    let config = trainer_config(args);
    config.validate()?;

    log::info!("training from {}", args.data.display());
    let report = Trainer::new(config).train(&args.data, &args.out)?;
    output_result(&report, cli_args)
}

/// Predict with a saved model.
fn predict(args: &PredictArgs, cli_args: &VerazArgs) -> Result<()> {
    let text = read_input(&args.input)?;
    let service = InferenceService::load(&args.model)?;
    let prediction = service.predict(&text);
    output_result(&prediction, cli_args)
}

/// Summarize a text.
fn summarize(args: &SummarizeArgs, cli_args: &VerazArgs) -> Result<()> {
    let text = read_input(&args.input)?;
    let summarizer = Summarizer::from_config(&SummaryConfig::from_env())?;

    let summary = runtime()?.block_on(summarizer.summarize(&text));
    output_result(&SummaryResult { summary }, cli_args)
}

/// Predict and summarize.
fn analyze(args: &AnalyzeArgs, cli_args: &VerazArgs) -> Result<()> {
    let text = read_input(&args.input)?;
    let inference = InferenceService::load(&args.model)?;
    let summarizer = Summarizer::from_config(&SummaryConfig::from_env())?;
    let service = AnalysisService::new(Arc::new(inference), Arc::new(summarizer));

    let report = runtime()?.block_on(service.analyze(&text, args.show_source))?;
    output_result(&report, cli_args)
}

/// Run the web UI.
fn serve(args: &ServeArgs) -> Result<()> {
    let config = ServerConfig {
        model_path: args.model.clone(),
        bind: args.bind.clone(),
        summary: SummaryConfig::from_env(),
    };
    runtime()?.block_on(server::serve(&config))
}

/// Download a dataset.
fn fetch_dataset(args: &FetchDatasetArgs, cli_args: &VerazArgs) -> Result<()> {
    let fetcher = DatasetFetcher::new(&args.download_dir).with_program(&args.kaggle_bin);
    let outcome = fetcher.fetch(&args.dataset, &args.out)?;
    output_result(
        &FetchResult::new(&args.dataset, outcome, args.download_dir.clone()),
        cli_args,
    )
}
