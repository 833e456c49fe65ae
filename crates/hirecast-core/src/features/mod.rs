//! Feature vector assembly.
//!
//! `[match_score, nivel_profissional_vaga_enc, nivel_ingles_vaga_enc,
//! nivel_ingles_enc, nivel_academico_enc]`, deterministic for fixed encoder and
//! vectorizer state. Required-field validation happens at the HTTP boundary.

mod builder;
pub mod error;
mod vector;


pub use builder::{FeatureBuilder, LevelFields};
pub use error::FeatureError;
pub use vector::FeatureVector;
