//! Categorical label encoding with an unknown-label fallback.
//!
//! Each categorical request field has one frozen encoder, loaded at startup.
//! [`EncoderSet::encode`] returns the encoder's code for a known label and
//! [`FALLBACK_CODE`] for anything else, empty string included.
//!
//! # Known Lossy Behavior
//!
//! The fallback never fails a request, but it is lossy: an unrecognised label is
//! indistinguishable from whichever known label owns code `0`. There is no fuzzy
//! matching, case folding or trimming; membership is exact.

pub mod error;
mod field;
mod label;

#[cfg(test)]
mod tests;

pub use error::EncodingError;
pub use field::CategoricalField;
pub use label::LabelEncoder;

use std::path::Path;
use std::sync::Arc;

use crate::constants::FALLBACK_CODE;

/// A fitted label-to-code encoder for one categorical field.
pub trait CategoricalEncoder: Send + Sync {
    /// Known labels, in code order.
    fn classes(&self) -> &[String];

    /// Code for a known label, or `None` if the label is outside the known set.
    fn code_for(&self, label: &str) -> Option<u32>;

    fn is_known(&self, label: &str) -> bool {
        self.code_for(label).is_some()
    }
}

/// The four field encoders, applied with the fallback policy.
#[derive(Clone)]
pub struct EncoderSet {
    encoders: [Arc<dyn CategoricalEncoder>; 4],
}

impl std::fmt::Debug for EncoderSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("EncoderSet");
        for field in CategoricalField::ALL {
            s.field(field.request_key(), &self.encoders[field.ordinal()].classes().len());
        }
        s.finish()
    }
}

impl EncoderSet {
    pub fn new(
        nivel_profissional_vaga: Arc<dyn CategoricalEncoder>,
        nivel_ingles_vaga: Arc<dyn CategoricalEncoder>,
        nivel_ingles: Arc<dyn CategoricalEncoder>,
        nivel_academico: Arc<dyn CategoricalEncoder>,
    ) -> Self {
        Self {
            encoders: [
                nivel_profissional_vaga,
                nivel_ingles_vaga,
                nivel_ingles,
                nivel_academico,
            ],
        }
    }

    /// Loads `encoder_<field>.json` for every field from `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, EncodingError> {
        let load = |field: CategoricalField| -> Result<Arc<dyn CategoricalEncoder>, EncodingError> {
            Ok(Arc::new(LabelEncoder::load(&dir.join(field.artifact_file()))?))
        };

        Ok(Self::new(
            load(CategoricalField::NivelProfissionalVaga)?,
            load(CategoricalField::NivelInglesVaga)?,
            load(CategoricalField::NivelIngles)?,
            load(CategoricalField::NivelAcademico)?,
        ))
    }

    pub fn encoder(&self, field: CategoricalField) -> &dyn CategoricalEncoder {
        self.encoders[field.ordinal()].as_ref()
    }

    /// Encodes `raw_label` for `field`, falling back to [`FALLBACK_CODE`].
    pub fn encode(&self, field: CategoricalField, raw_label: &str) -> u32 {
        self.encoder(field)
            .code_for(raw_label)
            .unwrap_or(FALLBACK_CODE)
    }
}
