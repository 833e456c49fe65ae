//! Artifact-backed TF-IDF transform.
//!
//! Reproduces the fitted vectorizer exported by the training pipeline: word tokens
//! are maximal runs of alphanumeric characters (or `_`) at least two characters
//! long, out-of-vocabulary tokens are dropped, weights are `tf * idf`, optionally
//! with sublinear tf and row normalisation.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::TextVectorizer;
use super::error::SimilarityError;
use super::sparse::SparseVector;

const MIN_TOKEN_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

fn default_true() -> bool {
    true
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

#[derive(Debug, Deserialize)]
struct TfidfArtifact {
    vocabulary: HashMap<String, u32>,
    idf: Vec<f64>,
    #[serde(default = "default_true")]
    lowercase: bool,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
    #[serde(default)]
    sublinear_tf: bool,
}

/// Fitted TF-IDF vectorizer.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, u32>,
    idf: Vec<f64>,
    lowercase: bool,
    norm: Option<Norm>,
    sublinear_tf: bool,
}

impl TfidfVectorizer {
    /// Builds a vectorizer with l2 normalisation, lowercasing and raw tf.
    pub fn new(vocabulary: HashMap<String, u32>, idf: Vec<f64>) -> Result<Self, SimilarityError> {
        Self::validate(&vocabulary, &idf)?;
        Ok(Self {
            vocabulary,
            idf,
            lowercase: true,
            norm: Some(Norm::L2),
            sublinear_tf: false,
        })
    }

    pub fn with_norm(mut self, norm: Option<Norm>) -> Self {
        self.norm = norm;
        self
    }

    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Loads the JSON artifact at `path`.
    pub fn load(path: &Path) -> Result<Self, SimilarityError> {
        if !path.exists() {
            return Err(SimilarityError::ArtifactNotFound {
                path: path.to_path_buf(),
            });
        }

        let raw = std::fs::read(path)?;
        let artifact: TfidfArtifact =
            serde_json::from_slice(&raw).map_err(|e| SimilarityError::LoadFailed {
                reason: format!("{}: {}", path.display(), e),
            })?;

        Self::validate(&artifact.vocabulary, &artifact.idf)?;
        debug!(
            path = %path.display(),
            vocabulary = artifact.vocabulary.len(),
            "Loaded TF-IDF vectorizer"
        );

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            lowercase: artifact.lowercase,
            norm: artifact.norm,
            sublinear_tf: artifact.sublinear_tf,
        })
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    fn validate(vocabulary: &HashMap<String, u32>, idf: &[f64]) -> Result<(), SimilarityError> {
        if let Some((term, index)) = vocabulary
            .iter()
            .find(|(_, index)| **index as usize >= idf.len())
        {
            return Err(SimilarityError::LoadFailed {
                reason: format!(
                    "term '{}' maps to index {} but idf has {} entries",
                    term,
                    index,
                    idf.len()
                ),
            });
        }

        if idf.iter().any(|v| !v.is_finite()) {
            return Err(SimilarityError::LoadFailed {
                reason: "idf contains non-finite weights".to_string(),
            });
        }

        Ok(())
    }
}

impl TextVectorizer for TfidfVectorizer {
    fn transform(&self, text: &str) -> Result<SparseVector, SimilarityError> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let mut counts: HashMap<u32, u32> = HashMap::new();
        for token in tokenize(&text) {
            if let Some(&index) = self.vocabulary.get(token) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }

        let pairs = counts
            .into_iter()
            .map(|(index, count)| {
                let tf = if self.sublinear_tf {
                    1.0 + f64::from(count).ln()
                } else {
                    f64::from(count)
                };
                (index, tf * self.idf[index as usize])
            })
            .collect();

        let mut vector = SparseVector::from_pairs(pairs);

        let norm = match self.norm {
            Some(Norm::L2) => vector.l2_norm(),
            Some(Norm::L1) => vector.entries().iter().map(|(_, w)| w.abs()).sum::<f64>(),
            None => 0.0,
        };
        if norm > 0.0 {
            vector.divide(norm);
        }

        Ok(vector)
    }
}

/// Splits `text` into word tokens of at least two characters.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
}
