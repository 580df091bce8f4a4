//! TF-IDF vectorizer for text feature extraction.
//!
//! Documents are expected to be normalized already (lower-case, letters and
//! whitespace only), so terms are whitespace-separated words of at least
//! [`TfIdfConfig::min_token_chars`] characters, joined into n-grams.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::ml::MLError;
use crate::ml::features::SparseVector;

/// TF-IDF vectorizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfIdfConfig {
    /// Smallest and largest n-gram length, inclusive.
    pub ngram_range: (usize, usize),
    /// Keep only the most frequent terms across the corpus.
    pub max_features: Option<usize>,
    /// Shorter words are ignored.
    pub min_token_chars: usize,
    /// Use `1 + ln(tf)` instead of the raw count.
    pub sublinear_tf: bool,
    /// Add one to document counts, as if an extra document held every term.
    pub smooth_idf: bool,
}

impl Default for TfIdfConfig {
    fn default() -> Self {
        Self {
            ngram_range: (1, 2),
            max_features: Some(6000),
            min_token_chars: 2,
            sublinear_tf: false,
            smooth_idf: true,
        }
    }
}

/// TF-IDF vectorizer for text feature extraction.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    config: TfIdfConfig,
    /// Term -> column index. Columns are assigned in lexicographic term order.
    vocabulary: BTreeMap<String, usize>,
    /// Inverse document frequency per column.
    idf: Vec<f64>,
    /// Total number of documents seen during training.
    n_documents: usize,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("config", &self.config)
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .finish()
    }
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new(TfIdfConfig::default())
    }
}

impl TfIdfVectorizer {
    /// Create an unfitted vectorizer.
    pub fn new(config: TfIdfConfig) -> Self {
        Self {
            config,
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
            n_documents: 0,
        }
    }

    pub fn config(&self) -> &TfIdfConfig {
        &self.config
    }

    /// Fit the vectorizer on training documents.
    pub fn fit(&mut self, documents: &[String]) -> Result<(), MLError> {
        let (min_n, max_n) = self.config.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(MLError::FeatureExtractionError {
                message: format!("invalid n-gram range ({min_n}, {max_n})"),
            });
        }
        if documents.is_empty() {
            return Err(MLError::InsufficientTrainingData {
                min_samples: 1,
                actual: 0,
            });
        }

        let mut term_frequency: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let terms = self.extract_terms(doc);
            let unique_terms: HashSet<&String> = terms.iter().collect();
            for term in unique_terms {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
            for term in terms {
                *term_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if term_frequency.is_empty() {
            return Err(MLError::FeatureExtractionError {
                message: "empty vocabulary; the documents contain only stop words or nothing"
                    .to_string(),
            });
        }

        let mut selected: Vec<(String, usize)> = term_frequency.into_iter().collect();
        if let Some(limit) = self.config.max_features {
            if selected.len() > limit {
                // Most frequent first, ties broken alphabetically.
                selected.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                selected.truncate(limit);
            }
        }

        let terms: Vec<String> = {
            let mut terms: Vec<String> = selected.into_iter().map(|(term, _)| term).collect();
            terms.sort();
            terms
        };

        let n = documents.len() as f64;
        let smooth = if self.config.smooth_idf { 1.0 } else { 0.0 };
        let idf = terms
            .iter()
            .map(|term| {
                let df = document_frequency.get(term).copied().unwrap_or(0) as f64;
                // IDF = ln((N + 1) / (df + 1)) + 1
                ((n + smooth) / (df + smooth)).ln() + 1.0
            })
            .collect();

        self.vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();
        self.idf = idf;
        self.n_documents = documents.len();

        Ok(())
    }

    /// Fit on `documents` and return their feature vectors.
    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<SparseVector>, MLError> {
        self.fit(documents)?;
        Ok(self.transform_all(documents))
    }

    /// Transform a document into an L2-normalized TF-IDF feature vector.
    ///
    /// Unknown terms are ignored; a document with no known term maps to the
    /// empty vector.
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.extract_terms(document) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let pairs = counts
            .into_iter()
            .map(|(idx, count)| {
                let tf = if self.config.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                (idx, tf * self.idf[idx])
            })
            .collect();

        let mut vector = SparseVector::from_pairs(pairs);
        vector.normalize_l2();
        vector
    }

    /// Transform many documents, preserving order.
    pub fn transform_all(&self, documents: &[String]) -> Vec<SparseVector> {
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    /// Words and word n-grams of a document, in order of appearance.
    pub fn extract_terms(&self, document: &str) -> Vec<String> {
        let words: Vec<&str> = document
            .split_whitespace()
            .filter(|w| w.chars().count() >= self.config.min_token_chars)
            .collect();

        let (min_n, max_n) = self.config.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n == 0 || n > words.len() {
                continue;
            }
            terms.extend(words.windows(n).map(|window| window.join(" ")));
        }
        terms
    }

    /// Get vocabulary size.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column index of a term, if it is in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Terms in column order.
    pub fn feature_names(&self) -> Vec<&str> {
        let mut names = vec![""; self.vocabulary.len()];
        for (term, &idx) in &self.vocabulary {
            if let Some(slot) = names.get_mut(idx) {
                *slot = term.as_str();
            }
        }
        names
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Check if the vectorizer has been fitted.
    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Check internal consistency of a (possibly deserialized) vectorizer.
    pub fn validate(&self) -> Result<(), MLError> {
        if !self.is_fitted() {
            return Err(MLError::ModelNotTrained {
                message: "vectorizer has an empty vocabulary".to_string(),
            });
        }
        if self.idf.len() != self.vocabulary.len() {
            return Err(MLError::InvalidFeatureVector {
                message: format!(
                    "vocabulary has {} terms but {} idf weights",
                    self.vocabulary.len(),
                    self.idf.len()
                ),
            });
        }
        if self.vocabulary.values().any(|&idx| idx >= self.idf.len()) {
            return Err(MLError::InvalidFeatureVector {
                message: "vocabulary index out of range".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tfidf_vectorizer() {
        let documents = docs(&[
            "gobierno anuncia reforma",
            "gobierno niega rumores",
            "milagro cura cancer",
        ]);

        let mut vectorizer = TfIdfVectorizer::default();
        vectorizer.fit(&documents).unwrap();

        assert!(vectorizer.is_fitted());
        assert_eq!(vectorizer.n_documents(), 3);
        // 8 unique unigrams + 6 bigrams
        assert_eq!(vectorizer.vocabulary_size(), 8 + 6);
        assert!(vectorizer.term_index("gobierno anuncia").is_some());

        let features = vectorizer.transform("gobierno anuncia");
        assert!((features.norm() - 1.0).abs() < 1e-9);
        assert_eq!(features.nnz(), 3);
    }

    #[test]
    fn test_smooth_idf_values() {
        let documents = docs(&["hola mundo", "hola amigo"]);
        let mut vectorizer = TfIdfVectorizer::new(TfIdfConfig {
            ngram_range: (1, 1),
            ..TfIdfConfig::default()
        });
        vectorizer.fit(&documents).unwrap();

        let hola = vectorizer.term_index("hola").unwrap();
        let mundo = vectorizer.term_index("mundo").unwrap();
        assert!((vectorizer.idf()[hola] - 1.0).abs() < 1e-12);
        assert!((vectorizer.idf()[mundo] - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_columns_in_lexicographic_order() {
        let mut vectorizer = TfIdfVectorizer::new(TfIdfConfig {
            ngram_range: (1, 1),
            ..TfIdfConfig::default()
        });
        vectorizer.fit(&docs(&["zeta alfa", "beta"])).unwrap();
        assert_eq!(vectorizer.feature_names(), vec!["alfa", "beta", "zeta"]);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let mut vectorizer = TfIdfVectorizer::new(TfIdfConfig {
            ngram_range: (1, 1),
            max_features: Some(2),
            ..TfIdfConfig::default()
        });
        vectorizer
            .fit(&docs(&["vacuna vacuna vacuna", "gobierno gobierno", "ovni"]))
            .unwrap();
        assert_eq!(vectorizer.feature_names(), vec!["gobierno", "vacuna"]);
    }

    #[test]
    fn test_short_tokens_ignored() {
        let vectorizer = TfIdfVectorizer::default();
        let terms = vectorizer.extract_terms("a casa x blanca");
        assert_eq!(terms, vec!["casa", "blanca", "casa blanca"]);
    }

    #[test]
    fn test_unknown_terms_give_empty_vector() {
        let mut vectorizer = TfIdfVectorizer::default();
        vectorizer.fit(&docs(&["economia crece"])).unwrap();
        let features = vectorizer.transform("ovnis aterrizan");
        assert!(features.is_empty());
        assert!(vectorizer.transform("").is_empty());
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        let mut vectorizer = TfIdfVectorizer::default();
        assert!(matches!(
            vectorizer.fit(&docs(&["", "a b"])),
            Err(MLError::FeatureExtractionError { .. })
        ));
        assert!(matches!(
            vectorizer.fit(&[]),
            Err(MLError::InsufficientTrainingData { .. })
        ));
    }

    #[test]
    fn test_serde_round_trip_preserves_transform() {
        let mut vectorizer = TfIdfVectorizer::default();
        vectorizer
            .fit(&docs(&["gobierno anuncia reforma", "milagro cura"]))
            .unwrap();

        let json = serde_json::to_string(&vectorizer).unwrap();
        let restored: TfIdfVectorizer = serde_json::from_str(&json).unwrap();
        restored.validate().unwrap();
        assert_eq!(
            restored.transform("reforma milagro"),
            vectorizer.transform("reforma milagro")
        );
    }
}
