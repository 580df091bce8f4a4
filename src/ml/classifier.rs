//! Classifier families behind a pipeline.
//!
//! A pipeline carries either a probabilistic model or a hard-label one; the
//! variant is the capability check. Hard-label predictions are reported as
//! probability `1.0` (fake) or `0.0` (credible).

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::ml::MLError;
use crate::ml::centroid::CentroidClassifier;
use crate::ml::features::SparseVector;
use crate::ml::label::Label;
use crate::ml::logistic::{LogisticRegression, LogisticRegressionConfig};

/// Which classifier family to train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    /// L2-regularized logistic regression (probabilistic)
    #[default]
    Logistic,
    /// Nearest class centroid (hard labels only)
    Centroid,
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierKind::Logistic => write!(f, "logistic"),
            ClassifierKind::Centroid => write!(f, "centroid"),
        }
    }
}

/// A fitted classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    #[serde(rename = "logistic")]
    Probabilistic(LogisticRegression),
    #[serde(rename = "centroid")]
    HardLabel(CentroidClassifier),
}

impl Classifier {
    /// Fit a classifier of the given kind.
    pub fn fit(
        kind: ClassifierKind,
        logistic: &LogisticRegressionConfig,
        x: &[SparseVector],
        y: &[Label],
        n_features: usize,
    ) -> Result<Self, MLError> {
        match kind {
            ClassifierKind::Logistic => {
                let mut model = LogisticRegression::new(logistic.clone());
                model.fit(x, y, n_features)?;
                Ok(Classifier::Probabilistic(model))
            }
            ClassifierKind::Centroid => {
                let mut model = CentroidClassifier::new();
                model.fit(x, y, n_features)?;
                Ok(Classifier::HardLabel(model))
            }
        }
    }

    pub fn kind(&self) -> ClassifierKind {
        match self {
            Classifier::Probabilistic(_) => ClassifierKind::Logistic,
            Classifier::HardLabel(_) => ClassifierKind::Centroid,
        }
    }

    /// Whether [`Classifier::probability_of`] returns graded probabilities.
    pub fn supports_probability(&self) -> bool {
        matches!(self, Classifier::Probabilistic(_))
    }

    /// Probability that `x` is fake.
    pub fn probability_of(&self, x: &SparseVector) -> f64 {
        match self {
            Classifier::Probabilistic(model) => model.predict_proba(x),
            Classifier::HardLabel(model) => match model.predict(x) {
                Label::Fake => 1.0,
                Label::Credible => 0.0,
            },
        }
    }

    pub fn predict(&self, x: &SparseVector) -> Label {
        match self {
            Classifier::Probabilistic(model) => model.predict(x),
            Classifier::HardLabel(model) => model.predict(x),
        }
    }

    /// Input dimension the classifier was fitted for.
    pub fn n_features(&self) -> usize {
        match self {
            Classifier::Probabilistic(model) => model.n_features(),
            Classifier::HardLabel(model) => model.n_features(),
        }
    }

    /// Gradient descent iterations, for probabilistic models.
    pub fn iterations(&self) -> Option<usize> {
        match self {
            Classifier::Probabilistic(model) => Some(model.n_iter()),
            Classifier::HardLabel(_) => None,
        }
    }
}
