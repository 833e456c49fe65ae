use std::collections::HashMap;

use super::TextVectorizer;
use super::error::SimilarityError;
use super::sparse::SparseVector;
use super::tfidf::tokenize;

const STUB_DIM: u32 = 4096;

/// Vocabulary-free vectorizer for tests: hashed bag of lowercase words.
#[derive(Debug, Clone, Default)]
pub struct StubVectorizer {
    failure: Option<String>,
}

impl StubVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A vectorizer whose every transform fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
        }
    }
}

fn fnv1a(token: &str) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in token.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

impl TextVectorizer for StubVectorizer {
    fn transform(&self, text: &str) -> Result<SparseVector, SimilarityError> {
        if let Some(reason) = &self.failure {
            return Err(SimilarityError::TransformFailed {
                reason: reason.clone(),
            });
        }

        let lowered = text.to_lowercase();
        let mut counts: HashMap<u32, f64> = HashMap::new();
        for token in tokenize(&lowered) {
            *counts.entry(fnv1a(token) % STUB_DIM).or_insert(0.0) += 1.0;
        }

        Ok(SparseVector::from_pairs(counts.into_iter().collect()))
    }
}
