//! The trained artifact: vectorizer and classifier fitted together.
//!
//! Pipelines are stored as a single JSON document:
//!
//! ```json
//! {
//!   "format": "veraz-pipeline",
//!   "version": 1,
//!   "metadata": { ... },
//!   "vectorizer": { ... },
//!   "classifier": { "kind": "logistic", ... }
//! }
//! ```
//!
//! Loading rejects any other format tag or version before touching the rest
//! of the document.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VerazError};
use crate::ml::MLError;
use crate::ml::classifier::{Classifier, ClassifierKind};
use crate::ml::label::Label;
use crate::ml::logistic::LogisticRegressionConfig;
use crate::ml::tfidf::{TfIdfConfig, TfIdfVectorizer};

/// Format tag written into every artifact.
pub const PIPELINE_FORMAT: &str = "veraz-pipeline";

/// Artifact layout version understood by this build.
pub const PIPELINE_VERSION: u32 = 1;

/// Hyperparameters for fitting a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub vectorizer: TfIdfConfig,
    pub classifier: ClassifierKind,
    pub logistic: LogisticRegressionConfig,
}

/// Descriptive information stored alongside the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineMetadata {
    /// Model name/identifier.
    pub name: String,
    /// Version of the crate that trained the model.
    pub crate_version: String,
    /// Training timestamp.
    pub trained_at: DateTime<Utc>,
    /// Number of training examples used.
    pub training_examples: usize,
    /// Model hyperparameters.
    pub hyperparameters: BTreeMap<String, f64>,
    /// Performance metrics on the held-out split.
    pub validation_metrics: BTreeMap<String, f64>,
}

impl PipelineMetadata {
    pub fn new(training_examples: usize) -> Self {
        Self {
            name: "veraz-fake-news".to_string(),
            crate_version: crate::VERSION.to_string(),
            trained_at: Utc::now(),
            training_examples,
            hyperparameters: BTreeMap::new(),
            validation_metrics: BTreeMap::new(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct PipelineArtifact {
    format: String,
    version: u32,
    metadata: PipelineMetadata,
    vectorizer: TfIdfVectorizer,
    classifier: Classifier,
}

#[derive(Deserialize)]
struct ArtifactHeader {
    #[serde(default)]
    format: String,
    #[serde(default)]
    version: u32,
}

/// A fitted vectorizer and classifier, used as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierPipeline {
    metadata: PipelineMetadata,
    vectorizer: TfIdfVectorizer,
    classifier: Classifier,
}

impl ClassifierPipeline {
    /// Assemble a pipeline from fitted parts, checking that they agree.
    pub fn new(
        vectorizer: TfIdfVectorizer,
        classifier: Classifier,
        metadata: PipelineMetadata,
    ) -> Result<Self> {
        vectorizer.validate()?;
        if classifier.n_features() != vectorizer.vocabulary_size() {
            return Err(MLError::InvalidFeatureVector {
                message: format!(
                    "classifier expects {} features but the vectorizer produces {}",
                    classifier.n_features(),
                    vectorizer.vocabulary_size()
                ),
            }
            .into());
        }

        Ok(Self {
            metadata,
            vectorizer,
            classifier,
        })
    }

    /// Fit vectorizer and classifier on already normalized texts.
    pub fn fit(texts: &[String], labels: &[Label], config: &PipelineConfig) -> Result<Self> {
        if texts.len() != labels.len() {
            return Err(VerazError::training(format!(
                "{} texts but {} labels",
                texts.len(),
                labels.len()
            )));
        }

        let mut vectorizer = TfIdfVectorizer::new(config.vectorizer.clone());
        let features = vectorizer
            .fit_transform(texts)
            .map_err(|e| VerazError::training(e.to_string()))?;

        let classifier = Classifier::fit(
            config.classifier,
            &config.logistic,
            &features,
            labels,
            vectorizer.vocabulary_size(),
        )
        .map_err(|e| VerazError::training(e.to_string()))?;

        let mut metadata = PipelineMetadata::new(texts.len());
        let (min_n, max_n) = config.vectorizer.ngram_range;
        let hyperparameters = &mut metadata.hyperparameters;
        hyperparameters.insert("ngram_min".to_string(), min_n as f64);
        hyperparameters.insert("ngram_max".to_string(), max_n as f64);
        hyperparameters.insert(
            "vocabulary_size".to_string(),
            vectorizer.vocabulary_size() as f64,
        );
        if let Classifier::Probabilistic(_) = classifier {
            hyperparameters.insert("c".to_string(), config.logistic.c);
            hyperparameters.insert("max_iter".to_string(), config.logistic.max_iter as f64);
        }

        Self::new(vectorizer, classifier, metadata)
    }

    /// Probability that an already normalized text is fake.
    pub fn probability_of(&self, cleaned_text: &str) -> f64 {
        let features = self.vectorizer.transform(cleaned_text);
        self.classifier.probability_of(&features)
    }

    /// Hard label for an already normalized text.
    pub fn predict(&self, cleaned_text: &str) -> Label {
        let features = self.vectorizer.transform(cleaned_text);
        self.classifier.predict(&features)
    }

    /// Labels and fake probabilities for a batch of normalized texts.
    pub fn predict_batch(&self, cleaned_texts: &[String]) -> (Vec<Label>, Vec<f64>) {
        cleaned_texts
            .iter()
            .map(|text| {
                let features = self.vectorizer.transform(text);
                (
                    self.classifier.predict(&features),
                    self.classifier.probability_of(&features),
                )
            })
            .unzip()
    }

    pub fn metadata(&self) -> &PipelineMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut PipelineMetadata {
        &mut self.metadata
    }

    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Serialize to the artifact JSON document.
    pub fn to_json(&self) -> Result<String> {
        let artifact = PipelineArtifact {
            format: PIPELINE_FORMAT.to_string(),
            version: PIPELINE_VERSION,
            metadata: self.metadata.clone(),
            vectorizer: self.vectorizer.clone(),
            classifier: self.classifier.clone(),
        };
        Ok(serde_json::to_string(&artifact)?)
    }

    /// Parse an artifact JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let header: ArtifactHeader = serde_json::from_str(json)
            .map_err(|e| VerazError::model(format!("not a model artifact: {e}")))?;
        if header.format != PIPELINE_FORMAT || header.version != PIPELINE_VERSION {
            return Err(MLError::UnsupportedArtifact {
                format: header.format,
                version: header.version,
            }
            .into());
        }

        let artifact: PipelineArtifact = serde_json::from_str(json)
            .map_err(|e| VerazError::model(format!("corrupt model artifact: {e}")))?;
        Self::new(artifact.vectorizer, artifact.classifier, artifact.metadata)
    }

    /// Write the artifact to `path`, replacing any existing file.
    ///
    /// The document is written to a sibling temporary file first and renamed
    /// into place, so readers never observe a partial artifact.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        let tmp_path = temporary_path(path);

        let write = || -> io::Result<()> {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(json.as_bytes())?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
            fs::rename(&tmp_path, path)
        };

        if let Err(e) = write() {
            let _ = fs::remove_file(&tmp_path);
            return Err(MLError::ModelSaveError {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into());
        }

        log::debug!("saved model artifact to {}", path.display());
        Ok(())
    }

    /// Read an artifact from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(VerazError::ModelNotFound(path.display().to_string()));
            }
            Err(e) => {
                return Err(MLError::ModelLoadError {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }
                .into());
            }
        };

        Self::from_json(&json)
    }
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "model.json".into());
    name.push(format!(".tmp-{}", std::process::id()));
    path.with_file_name(name)
}
