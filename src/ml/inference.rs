//! Online inference over a loaded pipeline.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::TextNormalizer;
use crate::error::{Result, VerazError};
use crate::ml::label::Label;
use crate::ml::pipeline::ClassifierPipeline;

/// Probabilities strictly above this are classified as fake.
pub const FAKE_THRESHOLD: f64 = 0.5;

/// Outcome of classifying one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Credible,
    Fake,
}

impl Verdict {
    /// Apply the strict `> 0.5` threshold.
    pub fn from_probability(probability_of_fake: f64) -> Self {
        if probability_of_fake > FAKE_THRESHOLD {
            Verdict::Fake
        } else {
            Verdict::Credible
        }
    }

    /// Verdict text shown to Spanish-speaking users.
    pub fn label_text(self) -> &'static str {
        match self {
            Verdict::Fake => "❌ Posible Fake News",
            Verdict::Credible => "✅ Noticia Creíble",
        }
    }

    pub fn as_label(self) -> Label {
        match self {
            Verdict::Fake => Label::Fake,
            Verdict::Credible => Label::Credible,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Fake => write!(f, "FAKE"),
            Verdict::Credible => write!(f, "CREDIBLE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Always within `[0, 1]`.
    pub probability_of_fake: f64,
    pub label: Verdict,
}

impl PredictionResult {
    pub fn from_probability(probability_of_fake: f64) -> Self {
        let probability_of_fake = if probability_of_fake.is_nan() {
            0.0
        } else {
            probability_of_fake.clamp(0.0, 1.0)
        };
        Self {
            probability_of_fake,
            label: Verdict::from_probability(probability_of_fake),
        }
    }

    /// Probability as a percentage.
    pub fn percent(&self) -> f64 {
        self.probability_of_fake * 100.0
    }
}

/// Classifies raw news text with a pipeline loaded once.
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug)]
pub struct InferenceService {
    pipeline: ClassifierPipeline,
    normalizer: TextNormalizer,
}

impl InferenceService {
    /// Wrap an in-memory pipeline.
    pub fn new(pipeline: ClassifierPipeline) -> Self {
        Self {
            pipeline,
            normalizer: TextNormalizer::default(),
        }
    }

    /// Load the pipeline at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(VerazError::ModelNotFound(path.display().to_string()));
        }

        let pipeline = ClassifierPipeline::load(path)?;
        log::info!(
            "loaded {} model ({} terms, trained {}) from {}",
            pipeline.classifier().kind(),
            pipeline.vectorizer().vocabulary_size(),
            pipeline.metadata().trained_at.format("%Y-%m-%d %H:%M:%S"),
            path.display()
        );
        Ok(Self::new(pipeline))
    }

    /// Use a custom normalizer; it must match the one used in training.
    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Normalize `text` and classify it.
    pub fn predict(&self, text: &str) -> PredictionResult {
        let cleaned = self.normalizer.normalize(text);
        let probability = self.pipeline.probability_of(&cleaned);
        log::debug!("p(fake) = {probability:.4} for {} cleaned chars", cleaned.len());
        PredictionResult::from_probability(probability)
    }

    pub fn pipeline(&self) -> &ClassifierPipeline {
        &self.pipeline
    }

    /// Whether predictions carry graded probabilities.
    pub fn supports_probability(&self) -> bool {
        self.pipeline.classifier().supports_probability()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::classifier::Classifier;
    use crate::ml::logistic::LogisticRegression;
    use crate::ml::pipeline::PipelineMetadata;
    use crate::ml::tfidf::TfIdfVectorizer;

    /// A pipeline whose prediction ignores the text: p = sigmoid(intercept).
    fn constant_pipeline(intercept: f64) -> ClassifierPipeline {
        let mut vectorizer = TfIdfVectorizer::default();
        vectorizer
            .fit(&["noticia verificada".to_string()])
            .unwrap();
        let weights = vec![0.0; vectorizer.vocabulary_size()];
        ClassifierPipeline::new(
            vectorizer,
            Classifier::Probabilistic(LogisticRegression::from_parts(weights, intercept)),
            PipelineMetadata::new(1),
        )
        .unwrap()
    }

    #[test]
    fn test_threshold() {
        assert_eq!(PredictionResult::from_probability(0.73).label, Verdict::Fake);
        assert_eq!(PredictionResult::from_probability(0.5).label, Verdict::Credible);
        assert_eq!(PredictionResult::from_probability(0.0).label, Verdict::Credible);
        assert_eq!(PredictionResult::from_probability(1.0).label, Verdict::Fake);
    }

    #[test]
    fn test_probability_is_clamped() {
        assert_eq!(PredictionResult::from_probability(1.2).probability_of_fake, 1.0);
        assert_eq!(PredictionResult::from_probability(-0.1).probability_of_fake, 0.0);
        assert_eq!(PredictionResult::from_probability(f64::NAN).probability_of_fake, 0.0);
    }

    #[test]
    fn test_predict_with_fixed_pipeline() {
        let service = InferenceService::new(constant_pipeline((0.73f64 / 0.27).ln()));
        let result = service.predict("Cualquier texto, con URL http://x.y");
        assert!((result.probability_of_fake - 0.73).abs() < 1e-9);
        assert_eq!(result.label, Verdict::Fake);
        assert!((result.percent() - 73.0).abs() < 1e-6);

        let service = InferenceService::new(constant_pipeline(0.0));
        let result = service.predict("texto");
        assert_eq!(result.probability_of_fake, 0.5);
        assert_eq!(result.label, Verdict::Credible);
    }

    #[test]
    fn test_empty_text_still_predicts() {
        let service = InferenceService::new(constant_pipeline(-1.0));
        let result = service.predict("");
        assert_eq!(result.label, Verdict::Credible);
        assert!(service.supports_probability());
    }

    #[test]
    fn test_load_missing_model() {
        let err = InferenceService::load("/nonexistent/model.json").unwrap_err();
        assert!(matches!(err, VerazError::ModelNotFound(_)));
    }

    #[test]
    fn test_verdict_text() {
        assert_eq!(Verdict::Fake.label_text(), "❌ Posible Fake News");
        assert_eq!(Verdict::Credible.label_text(), "✅ Noticia Creíble");
        assert_eq!(Verdict::Fake.to_string(), "FAKE");
        assert_eq!(Verdict::Credible.as_label(), Label::Credible);
    }
}
