//! Held-out evaluation metrics for the binary fake-news task.
//!
//! [`Label::Fake`] is the positive class. The report mirrors the usual
//! per-class precision/recall/F1 table with accuracy and macro/weighted
//! averages, plus ROC AUC when probabilities are available.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VerazError};
use crate::ml::label::Label;

/// Confusion matrix with fake as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// Fake predicted as fake
    pub tp: usize,
    /// Credible predicted as credible
    pub tn: usize,
    /// Credible predicted as fake
    pub fp: usize,
    /// Fake predicted as credible
    pub fn_: usize,
}

impl ConfusionMatrix {
    /// Create from ground truth and predictions of equal length.
    pub fn from_predictions(ground_truth: &[Label], predictions: &[Label]) -> Self {
        let mut matrix = Self::default();

        for (truth, pred) in ground_truth.iter().zip(predictions) {
            match (truth, pred) {
                (Label::Fake, Label::Fake) => matrix.tp += 1,
                (Label::Credible, Label::Credible) => matrix.tn += 1,
                (Label::Credible, Label::Fake) => matrix.fp += 1,
                (Label::Fake, Label::Credible) => matrix.fn_ += 1,
            }
        }

        matrix
    }

    pub fn total(&self) -> usize {
        self.tp + self.tn + self.fp + self.fn_
    }

    /// Accuracy: (TP + TN) / Total
    pub fn accuracy(&self) -> f64 {
        ratio(self.tp + self.tn, self.total())
    }

    /// Metrics for one class, treating it as the positive one.
    pub fn class_metrics(&self, label: Label) -> ClassMetrics {
        let (tp, fp, fn_) = match label {
            Label::Fake => (self.tp, self.fp, self.fn_),
            Label::Credible => (self.tn, self.fn_, self.fp),
        };

        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1_score = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        ClassMetrics {
            precision,
            recall,
            f1_score,
            support: tp + fn_,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Precision, recall, F1 and support of one row of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: usize,
}

/// Full classification report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub confusion_matrix: ConfusionMatrix,
    pub credible: ClassMetrics,
    pub fake: ClassMetrics,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
    /// Only present when both classes occur in the ground truth and
    /// probabilities were supplied.
    pub roc_auc: Option<f64>,
}

impl ClassificationReport {
    /// Evaluate predictions, and probabilities of fake when available.
    pub fn evaluate(
        ground_truth: &[Label],
        predictions: &[Label],
        probabilities: Option<&[f64]>,
    ) -> Result<Self> {
        if ground_truth.len() != predictions.len() {
            return Err(VerazError::training(format!(
                "{} labels but {} predictions",
                ground_truth.len(),
                predictions.len()
            )));
        }
        if let Some(probabilities) = probabilities {
            if probabilities.len() != ground_truth.len() {
                return Err(VerazError::training(format!(
                    "{} labels but {} probabilities",
                    ground_truth.len(),
                    probabilities.len()
                )));
            }
        }

        let confusion_matrix = ConfusionMatrix::from_predictions(ground_truth, predictions);
        let credible = confusion_matrix.class_metrics(Label::Credible);
        let fake = confusion_matrix.class_metrics(Label::Fake);
        let total = credible.support + fake.support;

        let macro_avg = ClassMetrics {
            precision: (credible.precision + fake.precision) / 2.0,
            recall: (credible.recall + fake.recall) / 2.0,
            f1_score: (credible.f1_score + fake.f1_score) / 2.0,
            support: total,
        };

        let weight = |metric: fn(&ClassMetrics) -> f64| {
            if total == 0 {
                0.0
            } else {
                (metric(&credible) * credible.support as f64 + metric(&fake) * fake.support as f64)
                    / total as f64
            }
        };
        let weighted_avg = ClassMetrics {
            precision: weight(|m| m.precision),
            recall: weight(|m| m.recall),
            f1_score: weight(|m| m.f1_score),
            support: total,
        };

        let roc_auc = probabilities.and_then(|p| roc_auc_score(ground_truth, p));

        Ok(Self {
            accuracy: confusion_matrix.accuracy(),
            confusion_matrix,
            credible,
            fake,
            macro_avg,
            weighted_avg,
            roc_auc,
        })
    }

    pub fn support(&self) -> usize {
        self.confusion_matrix.total()
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for (name, m) in [("credible", &self.credible), ("fake", &self.fake)] {
            writeln!(
                f,
                "{:>12} {:>9.4} {:>9.4} {:>9.4} {:>9}",
                name, m.precision, m.recall, m.f1_score, m.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>12} {:>9} {:>9} {:>9.4} {:>9}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.support()
        )?;
        for (name, m) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>12} {:>9.4} {:>9.4} {:>9.4} {:>9}",
                name, m.precision, m.recall, m.f1_score, m.support
            )?;
        }
        match self.roc_auc {
            Some(auc) => write!(f, "\nROC AUC: {auc:.4}"),
            None => write!(f, "\nROC AUC: n/a (single class in test split)"),
        }
    }
}

/// Area under the ROC curve via the Mann-Whitney rank statistic.
///
/// Tied scores receive their average rank. Returns `None` unless both
/// classes are present.
pub fn roc_auc_score(ground_truth: &[Label], scores: &[f64]) -> Option<f64> {
    if ground_truth.len() != scores.len() {
        return None;
    }

    let n_pos = ground_truth.iter().filter(|&&l| l == Label::Fake).count();
    let n_neg = ground_truth.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return None;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let mut ranks = vec![0.0; scores.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && scores[order[end]] == scores[order[start]] {
            end += 1;
        }
        // 1-based ranks start+1..=end share their mean
        let average_rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = average_rank;
        }
        start = end;
    }

    let positive_rank_sum: f64 = ground_truth
        .iter()
        .zip(&ranks)
        .filter(|(l, _)| **l == Label::Fake)
        .map(|(_, r)| r)
        .sum();

    let n_pos = n_pos as f64;
    let n_neg = n_neg as f64;
    Some((positive_rank_sum - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg))
}
