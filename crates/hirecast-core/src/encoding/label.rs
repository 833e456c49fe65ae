use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::CategoricalEncoder;
use super::error::EncodingError;

#[derive(Debug, Deserialize)]
struct LabelEncoderArtifact {
    classes: Vec<String>,
}

/// Frozen label-to-code mapping where a label's code is its index in `classes`.
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    classes: Vec<String>,
    codes: HashMap<String, u32>,
}

impl LabelEncoder {
    /// Builds an encoder from an ordered class list.
    pub fn from_classes<I, S>(classes: I) -> Result<Self, EncodingError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let classes: Vec<String> = classes.into_iter().map(Into::into).collect();
        let mut codes = HashMap::with_capacity(classes.len());

        for (i, label) in classes.iter().enumerate() {
            let code = u32::try_from(i).map_err(|_| EncodingError::InvalidArtifact {
                reason: format!("too many classes ({})", classes.len()),
            })?;
            if codes.insert(label.clone(), code).is_some() {
                return Err(EncodingError::DuplicateClass {
                    label: label.clone(),
                });
            }
        }

        Ok(Self { classes, codes })
    }

    /// Loads a `{"classes": [...]}` JSON artifact.
    pub fn load(path: &Path) -> Result<Self, EncodingError> {
        if !path.exists() {
            return Err(EncodingError::ArtifactNotFound {
                path: path.to_path_buf(),
            });
        }

        let raw = std::fs::read(path).map_err(|e| EncodingError::ArtifactUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let artifact: LabelEncoderArtifact =
            serde_json::from_slice(&raw).map_err(|e| EncodingError::InvalidArtifact {
                reason: format!("{}: {}", path.display(), e),
            })?;

        let encoder = Self::from_classes(artifact.classes)?;
        debug!(path = %path.display(), classes = encoder.len(), "Loaded label encoder");
        Ok(encoder)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl CategoricalEncoder for LabelEncoder {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn code_for(&self, label: &str) -> Option<u32> {
        self.codes.get(label).copied()
    }
}
