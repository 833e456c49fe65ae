//! Text match score between a job description and a résumé.
//!
//! Both texts go through the same fitted [`TextVectorizer`] independently; the
//! score is the cosine similarity of the two sparse vectors. With non-negative
//! TF-IDF weights the score lies in `[0, 1]`. Texts with no in-vocabulary tokens
//! (including `""`) vectorize to the zero vector and score `0.0`.

pub mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod sparse;
pub mod tfidf;


pub use error::SimilarityError;
#[cfg(any(test, feature = "mock"))]
pub use mock::StubVectorizer;
pub use sparse::{SparseVector, cosine_similarity};
pub use tfidf::TfidfVectorizer;

use std::sync::Arc;

/// A fitted text-to-sparse-vector transform.
pub trait TextVectorizer: Send + Sync {
    fn transform(&self, text: &str) -> Result<SparseVector, SimilarityError>;
}

/// Computes the match score with a shared vectorizer.
#[derive(Clone)]
pub struct SimilarityExtractor {
    vectorizer: Arc<dyn TextVectorizer>,
}

impl std::fmt::Debug for SimilarityExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityExtractor").finish_non_exhaustive()
    }
}

impl SimilarityExtractor {
    pub fn new(vectorizer: Arc<dyn TextVectorizer>) -> Self {
        Self { vectorizer }
    }

    pub fn similarity(&self, text_a: &str, text_b: &str) -> Result<f64, SimilarityError> {
        let a = self.vectorizer.transform(text_a)?;
        let b = self.vectorizer.transform(text_b)?;
        Ok(cosine_similarity(&a, &b))
    }
}
