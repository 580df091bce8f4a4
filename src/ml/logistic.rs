//! Logistic regression for binary classification over sparse features.
//!
//! Minimizes the L2-penalized log loss
//! `0.5 * ||w||^2 + C * sum(log_loss)` (scaled by `1 / n`) with full-batch
//! gradient descent. The intercept is not penalized.

use serde::{Deserialize, Serialize};

use crate::ml::MLError;
use crate::ml::features::SparseVector;
use crate::ml::label::Label;

/// Training hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionConfig {
    /// Inverse regularization strength.
    pub c: f64,
    /// Maximum gradient descent iterations.
    pub max_iter: usize,
    /// Stop once the loss improves by less than this.
    pub tolerance: f64,
    pub learning_rate: f64,
    pub fit_intercept: bool,
}

impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tolerance: 1e-6,
            learning_rate: 1.0,
            fit_intercept: true,
        }
    }
}

/// Logistic regression classifier. Predicts the probability of [`Label::Fake`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    config: LogisticRegressionConfig,
    coefficients: Vec<f64>,
    intercept: f64,
    /// Iterations run by the last fit.
    n_iter: usize,
    /// Penalized loss after each iteration of the last fit.
    #[serde(skip)]
    loss_history: Vec<f64>,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(LogisticRegressionConfig::default())
    }
}

/// Numerically stable sigmoid.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let exp_z = z.exp();
        exp_z / (1.0 + exp_z)
    }
}

/// Mean binary cross-entropy.
fn log_loss(targets: &[f64], probabilities: &[f64]) -> f64 {
    let eps = 1e-15;
    let n = targets.len() as f64;

    -targets
        .iter()
        .zip(probabilities)
        .map(|(&y, &p)| {
            let p_clipped = p.clamp(eps, 1.0 - eps);
            y * p_clipped.ln() + (1.0 - y) * (1.0 - p_clipped).ln()
        })
        .sum::<f64>()
        / n
}

impl LogisticRegression {
    /// Create an unfitted model.
    pub fn new(config: LogisticRegressionConfig) -> Self {
        Self {
            config,
            coefficients: Vec::new(),
            intercept: 0.0,
            n_iter: 0,
            loss_history: Vec::new(),
        }
    }

    /// Build a fitted model from known parameters.
    pub fn from_parts(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
            ..Self::default()
        }
    }

    /// Fit on sparse rows of dimension `n_features`.
    ///
    /// A single-class target is accepted; the model then leans entirely on
    /// its intercept.
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
        if self.config.c <= 0.0 || self.config.learning_rate <= 0.0 {
            return Err(MLError::InvalidFeatureVector {
                message: "C and learning rate must be positive".to_string(),
            });
        }

        let n_samples = x.len() as f64;
        let targets: Vec<f64> = y.iter().map(|label| label.as_f64()).collect();
        let penalty = 1.0 / (self.config.c * n_samples);

        let mut weights = vec![0.0; n_features];
        let mut bias = 0.0;
        let mut previous_loss = f64::INFINITY;

        self.loss_history.clear();
        self.n_iter = 0;

        for _ in 0..self.config.max_iter {
            let probabilities: Vec<f64> = x
                .iter()
                .map(|row| sigmoid(row.dot_dense(&weights) + bias))
                .collect();

            let squared_norm: f64 = weights.iter().map(|w| w * w).sum();
            let loss = log_loss(&targets, &probabilities) + 0.5 * penalty * squared_norm;
            self.loss_history.push(loss);
            self.n_iter += 1;

            if (previous_loss - loss).abs() < self.config.tolerance {
                break;
            }
            previous_loss = loss;

            let mut gradient: Vec<f64> = weights.iter().map(|w| penalty * w).collect();
            let mut bias_gradient = 0.0;
            for ((row, p), t) in x.iter().zip(&probabilities).zip(&targets) {
                let error = (p - t) / n_samples;
                row.add_scaled_to(&mut gradient, error);
                bias_gradient += error;
            }

            for (w, g) in weights.iter_mut().zip(&gradient) {
                *w -= self.config.learning_rate * g;
            }
            if self.config.fit_intercept {
                bias -= self.config.learning_rate * bias_gradient;
            }
        }

        log::debug!(
            "logistic regression stopped after {} iterations (loss {:.6})",
            self.n_iter,
            self.loss_history.last().copied().unwrap_or(f64::NAN)
        );

        self.coefficients = weights;
        self.intercept = bias;
        Ok(())
    }

    /// Raw score `w·x + b`.
    pub fn decision_function(&self, x: &SparseVector) -> f64 {
        x.dot_dense(&self.coefficients) + self.intercept
    }

    /// Probability that `x` is fake.
    pub fn predict_proba(&self, x: &SparseVector) -> f64 {
        sigmoid(self.decision_function(x))
    }

    pub fn predict(&self, x: &SparseVector) -> Label {
        if self.predict_proba(x) > 0.5 {
            Label::Fake
        } else {
            Label::Credible
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    pub fn loss_history(&self) -> &[f64] {
        &self.loss_history
    }

    pub fn config(&self) -> &LogisticRegressionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_hot(index: usize) -> SparseVector {
        SparseVector::from_pairs(vec![(index, 1.0)])
    }

    #[test]
    fn test_sigmoid() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(800.0) <= 1.0);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_separable_data() {
        let x: Vec<SparseVector> = (0..10).map(|i| one_hot(i % 2)).collect();
        let y: Vec<Label> = (0..10)
            .map(|i| if i % 2 == 0 { Label::Fake } else { Label::Credible })
            .collect();

        let mut model = LogisticRegression::default();
        model.fit(&x, &y, 2).unwrap();

        assert!(model.predict_proba(&one_hot(0)) > 0.7);
        assert!(model.predict_proba(&one_hot(1)) < 0.3);
        assert_eq!(model.predict(&one_hot(0)), Label::Fake);
        assert_eq!(model.n_features(), 2);

        let history = model.loss_history();
        assert!(history.last().unwrap() < history.first().unwrap());
        assert!(model.n_iter() <= 1000);
    }

    #[test]
    fn test_single_class_training() {
        let x = vec![one_hot(0), one_hot(1), one_hot(0)];
        let y = vec![Label::Fake; 3];

        let mut model = LogisticRegression::default();
        model.fit(&x, &y, 2).unwrap();

        assert!(model.intercept() > 0.0);
        assert!(model.predict_proba(&SparseVector::new()) > 0.5);
        assert!(model.coefficients().iter().all(|w| w.is_finite()));
    }

    #[test]
    fn test_from_parts() {
        let model = LogisticRegression::from_parts(vec![2.0, -2.0], 0.0);
        assert_eq!(model.predict_proba(&SparseVector::new()), 0.5);
        assert_eq!(model.predict(&SparseVector::new()), Label::Credible);
        assert!(model.predict_proba(&one_hot(0)) > 0.5);
    }

    #[test]
    fn test_invalid_input() {
        let mut model = LogisticRegression::default();
        assert!(matches!(
            model.fit(&[], &[], 3),
            Err(MLError::InsufficientTrainingData { .. })
        ));
        assert!(matches!(
            model.fit(&[one_hot(0)], &[Label::Fake, Label::Credible], 1),
            Err(MLError::InvalidFeatureVector { .. })
        ));
    }
}
