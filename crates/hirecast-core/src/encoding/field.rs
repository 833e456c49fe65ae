use serde::{Deserialize, Serialize};

/// The four categorical request fields, in feature-vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    NivelProfissionalVaga,
    NivelInglesVaga,
    NivelIngles,
    NivelAcademico,
}

impl CategoricalField {
    /// All fields, in the order their codes appear in the feature vector.
    pub const ALL: [CategoricalField; 4] = [
        CategoricalField::NivelProfissionalVaga,
        CategoricalField::NivelInglesVaga,
        CategoricalField::NivelIngles,
        CategoricalField::NivelAcademico,
    ];

    /// JSON key of the raw label in a `/predict` request.
    pub fn request_key(self) -> &'static str {
        match self {
            CategoricalField::NivelProfissionalVaga => "nivel_profissional_vaga",
            CategoricalField::NivelInglesVaga => "nivel_ingles_vaga",
            CategoricalField::NivelIngles => "nivel_ingles",
            CategoricalField::NivelAcademico => "nivel_academico",
        }
    }

    /// Name of the encoded column in the feature schema.
    pub fn column(self) -> &'static str {
        match self {
            CategoricalField::NivelProfissionalVaga => "nivel_profissional_vaga_enc",
            CategoricalField::NivelInglesVaga => "nivel_ingles_vaga_enc",
            CategoricalField::NivelIngles => "nivel_ingles_enc",
            CategoricalField::NivelAcademico => "nivel_academico_enc",
        }
    }

    /// Encoder artifact file name inside the artifacts directory.
    pub fn artifact_file(self) -> String {
        format!("encoder_{}.json", self.request_key())
    }

    /// Position in [`ALL`](Self::ALL).
    pub fn ordinal(self) -> usize {
        match self {
            CategoricalField::NivelProfissionalVaga => 0,
            CategoricalField::NivelInglesVaga => 1,
            CategoricalField::NivelIngles => 2,
            CategoricalField::NivelAcademico => 3,
        }
    }
}

impl std::fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.request_key())
    }
}
