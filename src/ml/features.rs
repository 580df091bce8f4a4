//! Sparse feature vectors.
//!
//! TF-IDF rows are overwhelmingly zero, so features are kept as sorted
//! `(index, value)` pairs.

use serde::{Deserialize, Serialize};

/// A sparse vector with strictly increasing indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Create an empty sparse vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sparse vector from unordered pairs; duplicate indices are summed.
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.sort_by_key(|&(index, _)| index);

        let mut indices: Vec<usize> = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());
        for (index, value) in pairs {
            match indices.last() {
                Some(&last) if last == index => {
                    if let Some(v) = values.last_mut() {
                        *v += value;
                    }
                }
                _ => {
                    indices.push(index);
                    values.push(value);
                }
            }
        }

        Self { indices, values }
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Whether the vector has no stored entries.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over `(index, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Largest index plus one, or zero for an empty vector.
    pub fn min_dimension(&self) -> usize {
        self.indices.last().map_or(0, |&i| i + 1)
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Scale to unit Euclidean norm. Zero vectors are left untouched.
    pub fn normalize_l2(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for v in &mut self.values {
                *v /= norm;
            }
        }
    }

    /// Dot product with a dense vector. Indices past its end count as zero.
    pub fn dot_dense(&self, dense: &[f64]) -> f64 {
        self.iter()
            .filter_map(|(i, v)| dense.get(i).map(|w| v * w))
            .sum()
    }

    /// Add `scale * self` into a dense accumulator.
    pub fn add_scaled_to(&self, dense: &mut [f64], scale: f64) {
        for (i, v) in self.iter() {
            if let Some(slot) = dense.get_mut(i) {
                *slot += scale * v;
            }
        }
    }

    /// Expand into a dense vector of the given dimension.
    pub fn to_dense(&self, dimension: usize) -> Vec<f64> {
        let mut dense = vec![0.0; dimension];
        self.add_scaled_to(&mut dense, 1.0);
        dense
    }
}

/// Cosine similarity between a sparse and a dense vector.
pub fn cosine_similarity(a: &SparseVector, b: &[f64]) -> f64 {
    let magnitude_a = a.norm();
    let magnitude_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        0.0
    } else {
        a.dot_dense(b) / (magnitude_a * magnitude_b)
    }
}
