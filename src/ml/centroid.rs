//! Nearest-centroid classifier.
//!
//! Scores a document by its average cosine similarity to the training rows of
//! each class. Because TF-IDF rows are unit length, that average is the dot
//! product with the class mean, so only the two means are stored. The model
//! yields hard labels only.

use serde::{Deserialize, Serialize};

use crate::ml::MLError;
use crate::ml::features::SparseVector;
use crate::ml::label::Label;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CentroidClassifier {
    credible_centroid: Vec<f64>,
    fake_centroid: Vec<f64>,
    credible_count: usize,
    fake_count: usize,
}

impl CentroidClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute class means from training rows of dimension `n_features`.
    pub fn fit(
        &mut self,
        x: &[SparseVector],
        y: &[Label],
        n_features: usize,
    ) -> Result<(), MLError> {
        if x.is_empty() {
            return Err(MLError::InsufficientTrainingData {
                min_samples: 1,
                actual: 0,
            });
        }
        if x.len() != y.len() {
            return Err(MLError::InvalidFeatureVector {
                message: format!("{} samples but {} labels", x.len(), y.len()),
            });
        }

        let mut sums = [vec![0.0; n_features], vec![0.0; n_features]];
        let mut counts = [0usize; 2];
        for (row, label) in x.iter().zip(y) {
            let slot = label.as_index();
            row.add_scaled_to(&mut sums[slot], 1.0);
            counts[slot] += 1;
        }

        for (sum, &count) in sums.iter_mut().zip(&counts) {
            if count > 0 {
                for value in sum.iter_mut() {
                    *value /= count as f64;
                }
            }
        }

        let [credible, fake] = sums;
        self.credible_centroid = credible;
        self.fake_centroid = fake;
        self.credible_count = counts[0];
        self.fake_count = counts[1];
        Ok(())
    }

    /// Average similarity of `x` to each class, `(credible, fake)`.
    pub fn scores(&self, x: &SparseVector) -> (f64, f64) {
        let norm = x.norm();
        if norm == 0.0 {
            return (0.0, 0.0);
        }
        (
            x.dot_dense(&self.credible_centroid) / norm,
            x.dot_dense(&self.fake_centroid) / norm,
        )
    }

    /// Predict the closer class. Ties, including empty input, go to the
    /// class with more training rows, then to credible.
    pub fn predict(&self, x: &SparseVector) -> Label {
        let (credible, fake) = self.scores(x);
        if fake > credible || (fake == credible && self.fake_count > self.credible_count) {
            Label::Fake
        } else {
            Label::Credible
        }
    }

    pub fn n_features(&self) -> usize {
        self.credible_centroid.len()
    }

    /// Training rows seen per class, `(credible, fake)`.
    pub fn class_counts(&self) -> (usize, usize) {
        (self.credible_count, self.fake_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centroid_classifier() {
        let x = vec![
            SparseVector::from_pairs(vec![(0, 1.0)]),
            SparseVector::from_pairs(vec![(0, 0.8), (1, 0.6)]),
            SparseVector::from_pairs(vec![(2, 1.0)]),
            SparseVector::from_pairs(vec![(2, 0.6), (1, 0.8)]),
        ];
        let y = vec![Label::Fake, Label::Fake, Label::Credible, Label::Credible];

        let mut classifier = CentroidClassifier::new();
        classifier.fit(&x, &y, 3).unwrap();

        assert_eq!(classifier.n_features(), 3);
        assert_eq!(classifier.class_counts(), (2, 2));
        assert_eq!(
            classifier.predict(&SparseVector::from_pairs(vec![(0, 1.0)])),
            Label::Fake
        );
        assert_eq!(
            classifier.predict(&SparseVector::from_pairs(vec![(2, 1.0)])),
            Label::Credible
        );
    }

    #[test]
    fn test_empty_input_uses_majority_class() {
        let x = vec![
            SparseVector::from_pairs(vec![(0, 1.0)]),
            SparseVector::from_pairs(vec![(1, 1.0)]),
            SparseVector::from_pairs(vec![(1, 1.0)]),
        ];
        let y = vec![Label::Credible, Label::Fake, Label::Fake];

        let mut classifier = CentroidClassifier::new();
        classifier.fit(&x, &y, 2).unwrap();
        assert_eq!(classifier.predict(&SparseVector::new()), Label::Fake);
    }
}
