use serde::Deserialize;
use tracing::trace;

use crate::encoding::{CategoricalField, EncoderSet};
use crate::similarity::SimilarityExtractor;

use super::error::FeatureError;
use super::vector::FeatureVector;

/// Raw categorical labels of one request. A missing label encodes as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LevelFields {
    #[serde(default)]
    pub nivel_profissional_vaga: Option<String>,
    #[serde(default)]
    pub nivel_ingles_vaga: Option<String>,
    #[serde(default)]
    pub nivel_ingles: Option<String>,
    #[serde(default)]
    pub nivel_academico: Option<String>,
}

impl LevelFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: CategoricalField, label: impl Into<String>) -> Self {
        *self.slot_mut(field) = Some(label.into());
        self
    }

    /// Label for `field`, or `""` when absent.
    pub fn get(&self, field: CategoricalField) -> &str {
        let slot = match field {
            CategoricalField::NivelProfissionalVaga => &self.nivel_profissional_vaga,
            CategoricalField::NivelInglesVaga => &self.nivel_ingles_vaga,
            CategoricalField::NivelIngles => &self.nivel_ingles,
            CategoricalField::NivelAcademico => &self.nivel_academico,
        };
        slot.as_deref().unwrap_or("")
    }

    fn slot_mut(&mut self, field: CategoricalField) -> &mut Option<String> {
        match field {
            CategoricalField::NivelProfissionalVaga => &mut self.nivel_profissional_vaga,
            CategoricalField::NivelInglesVaga => &mut self.nivel_ingles_vaga,
            CategoricalField::NivelIngles => &mut self.nivel_ingles,
            CategoricalField::NivelAcademico => &mut self.nivel_academico,
        }
    }
}

/// Turns request text and labels into a [`FeatureVector`].
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    similarity: SimilarityExtractor,
    encoders: EncoderSet,
}

impl FeatureBuilder {
    pub fn new(similarity: SimilarityExtractor, encoders: EncoderSet) -> Self {
        Self {
            similarity,
            encoders,
        }
    }

    pub fn encoders(&self) -> &EncoderSet {
        &self.encoders
    }

    pub fn build(
        &self,
        job_description: &str,
        cv_text: &str,
        levels: &LevelFields,
    ) -> Result<FeatureVector, FeatureError> {
        let match_score = self.similarity.similarity(job_description, cv_text)?;
        let codes = CategoricalField::ALL.map(|field| self.encoders.encode(field, levels.get(field)));

        trace!(match_score, ?codes, "Built feature vector");
        Ok(FeatureVector::from_parts(match_score, codes))
    }
}
