//! Offline training: labeled CSV in, model artifact out.
//!
//! Steps, in order: load the CSV, map labels, normalize texts, split, fit
//! the pipeline on the training side, evaluate on the test side, save. Any
//! failure before the last step leaves the output path untouched.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::TextNormalizer;
use crate::dataset::{CsvDatasetLoader, DEFAULT_LABEL_COLUMN, DEFAULT_TEXT_COLUMN, LabeledExample};
use crate::error::{Result, VerazError};
use crate::ml::classifier::ClassifierKind;
use crate::ml::label::{Label, map_labels};
use crate::ml::metrics::ClassificationReport;
use crate::ml::pipeline::{ClassifierPipeline, PipelineConfig};
use crate::ml::split::train_test_split;

/// Training configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Share of the dataset held out for evaluation.
    pub test_fraction: f64,
    /// Seed of the split shuffle.
    pub seed: u64,
    /// Datasets smaller than this are split 50/50 without stratification.
    pub small_dataset_threshold: usize,
    pub small_dataset_test_fraction: f64,
    pub text_column: String,
    pub label_column: String,
    pub pipeline: PipelineConfig,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            small_dataset_threshold: 20,
            small_dataset_test_fraction: 0.5,
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
            pipeline: PipelineConfig::default(),
        }
    }
}

/// Summary of a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub train_size: usize,
    pub test_size: usize,
    pub stratified: bool,
    pub test_fraction: f64,
    pub vocabulary_size: usize,
    /// Gradient descent iterations, for probabilistic classifiers.
    pub iterations: Option<usize>,
    pub classifier: ClassifierKind,
    pub evaluation: ClassificationReport,
    /// Where the artifact was written, once saved.
    pub model_path: Option<PathBuf>,
}

/// Trains and saves classifier pipelines.
#[derive(Debug, Default)]
pub struct Trainer {
    config: TrainerConfig,
    normalizer: TextNormalizer,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self {
            config,
            normalizer: TextNormalizer::default(),
        }
    }

    /// Use a custom normalizer instead of the default Spanish one.
    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Train on the CSV at `dataset_path` and save the pipeline to `output_path`.
    pub fn train<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        dataset_path: P,
        output_path: Q,
    ) -> Result<TrainingReport> {
        let output_path = output_path.as_ref();

        let examples = CsvDatasetLoader::new()
            .with_columns(&self.config.text_column, &self.config.label_column)
            .load(dataset_path)?;

        let (pipeline, mut report) = self.fit_examples(&examples)?;

        pipeline.save(output_path)?;
        log::info!("model saved to {}", output_path.display());

        report.model_path = Some(output_path.to_path_buf());
        Ok(report)
    }

    /// Fit and evaluate a pipeline on in-memory examples, without saving.
    pub fn fit_examples(
        &self,
        examples: &[LabeledExample],
    ) -> Result<(ClassifierPipeline, TrainingReport)> {
        let labels = map_labels(examples.iter().map(|e| e.class_label.as_str()))?;

        let raw_texts: Vec<&str> = examples.iter().map(|e| e.raw_text.as_str()).collect();
        let texts = self.normalizer.normalize_all(&raw_texts);

        let n = texts.len();
        let small = n < self.config.small_dataset_threshold;
        let (test_fraction, stratified) = if small {
            log::warn!(
                "only {n} examples; using a {:.0}% test split without stratification",
                self.config.small_dataset_test_fraction * 100.0
            );
            (self.config.small_dataset_test_fraction, false)
        } else {
            (self.config.test_fraction, true)
        };

        let split = train_test_split(&labels, test_fraction, self.config.seed, stratified)?;
        log::info!(
            "split {n} examples into {} train / {} test",
            split.train.len(),
            split.test.len()
        );

        let select = |indices: &[usize]| -> (Vec<String>, Vec<Label>) {
            indices
                .iter()
                .map(|&i| (texts[i].clone(), labels[i]))
                .unzip()
        };
        let (train_texts, train_labels) = select(&split.train);
        let (test_texts, test_labels) = select(&split.test);

        let mut pipeline =
            ClassifierPipeline::fit(&train_texts, &train_labels, &self.config.pipeline)?;
        log::info!(
            "fitted {} classifier on {} terms",
            pipeline.classifier().kind(),
            pipeline.vectorizer().vocabulary_size()
        );

        // Hard-label classifiers score 0/1, which still ranks for ROC AUC.
        let (predicted, probabilities) = pipeline.predict_batch(&test_texts);
        let evaluation = ClassificationReport::evaluate(
            &test_labels,
            &predicted,
            Some(probabilities.as_slice()),
        )?;

        match evaluation.roc_auc {
            Some(auc) => log::info!(
                "test accuracy {:.4}, ROC AUC {auc:.4}",
                evaluation.accuracy
            ),
            None => log::info!(
                "test accuracy {:.4}, ROC AUC unavailable",
                evaluation.accuracy
            ),
        }

        let metrics = &mut pipeline.metadata_mut().validation_metrics;
        metrics.insert("accuracy".to_string(), evaluation.accuracy);
        metrics.insert("f1_fake".to_string(), evaluation.fake.f1_score);
        if let Some(auc) = evaluation.roc_auc {
            metrics.insert("roc_auc".to_string(), auc);
        }

        let report = TrainingReport {
            train_size: split.train.len(),
            test_size: split.test.len(),
            stratified,
            test_fraction,
            vocabulary_size: pipeline.vectorizer().vocabulary_size(),
            iterations: pipeline.classifier().iterations(),
            classifier: pipeline.classifier().kind(),
            evaluation,
            model_path: None,
        };

        Ok((pipeline, report))
    }
}

/// Train with the default configuration.
pub fn train<P: AsRef<Path>, Q: AsRef<Path>>(
    dataset_path: P,
    output_path: Q,
) -> Result<TrainingReport> {
    Trainer::new(TrainerConfig::default()).train(dataset_path, output_path)
}

impl TrainerConfig {
    /// Reject settings that cannot produce a split.
    pub fn validate(&self) -> Result<()> {
        for (name, fraction) in [
            ("test fraction", self.test_fraction),
            ("small dataset test fraction", self.small_dataset_test_fraction),
        ] {
            if !(fraction > 0.0 && fraction < 1.0) {
                return Err(VerazError::invalid_argument(format!(
                    "{name} must be in (0, 1), got {fraction}"
                )));
            }
        }
        if self.pipeline.vectorizer.max_features == Some(0) {
            return Err(VerazError::invalid_argument("max features must be positive"));
        }
        if self.pipeline.logistic.max_iter == 0 {
            return Err(VerazError::invalid_argument("max iterations must be positive"));
        }
        Ok(())
    }
}
