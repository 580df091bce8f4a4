//! Machine learning for fake-news classification.
//!
//! This module holds the whole offline/online split of the detector:
//!
//! - [`label`]: mapping free-form dataset labels to [`Label`]
//! - [`tfidf`]: n-gram TF-IDF feature extraction
//! - [`logistic`] and [`centroid`]: the two classifier families
//! - [`classifier`]: the tagged union both are served through
//! - [`pipeline`]: the versioned, serializable vectorizer + classifier pair
//! - [`split`] and [`metrics`]: held-out evaluation
//! - [`trainer`]: dataset → trained artifact
//! - [`inference`]: artifact → predictions

pub mod centroid;
pub mod classifier;
pub mod features;
pub mod inference;
pub mod label;
pub mod logistic;
pub mod metrics;
pub mod pipeline;
pub mod split;
pub mod tfidf;
pub mod trainer;

pub use centroid::CentroidClassifier;
pub use classifier::{Classifier, ClassifierKind};
pub use features::SparseVector;
pub use inference::{InferenceService, PredictionResult, Verdict};
pub use label::{Label, map_label, map_labels};
pub use logistic::{LogisticRegression, LogisticRegressionConfig};
pub use metrics::{ClassMetrics, ClassificationReport, ConfusionMatrix, roc_auc_score};
pub use pipeline::{ClassifierPipeline, PipelineConfig, PipelineMetadata};
pub use split::{Split, train_test_split};
pub use tfidf::{TfIdfConfig, TfIdfVectorizer};
pub use trainer::{Trainer, TrainerConfig, TrainingReport, train};

/// Machine learning error types.
#[derive(Debug, thiserror::Error)]
pub enum MLError {
    #[error("Model not trained: {message}")]
    ModelNotTrained { message: String },

    #[error("Invalid feature vector: {message}")]
    InvalidFeatureVector { message: String },

    #[error("Training data insufficient: need at least {min_samples} samples, got {actual}")]
    InsufficientTrainingData { min_samples: usize, actual: usize },

    #[error("Model loading failed: {path}: {reason}")]
    ModelLoadError { path: String, reason: String },

    #[error("Model saving failed: {path}: {reason}")]
    ModelSaveError { path: String, reason: String },

    #[error("Feature extraction failed: {message}")]
    FeatureExtractionError { message: String },

    #[error("Unsupported model artifact: format '{format}', version {version}")]
    UnsupportedArtifact { format: String, version: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ml_error_messages() {
        let err = MLError::InsufficientTrainingData {
            min_samples: 2,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "Training data insufficient: need at least 2 samples, got 1"
        );

        let err = MLError::UnsupportedArtifact {
            format: "pickle".to_string(),
            version: 3,
        };
        assert!(err.to_string().contains("pickle"));
    }
}
