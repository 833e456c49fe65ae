//! On-disk artifact fixtures.

use std::path::{Path, PathBuf};

use serde_json::json;
use tempfile::TempDir;

use hirecast::Config;
use hirecast::constants::{CLASSIFIER_ARTIFACT, FEATURE_COLUMNS, VECTORIZER_ARTIFACT};
use hirecast::encoding::CategoricalField;

pub const VOCABULARY: [&str; 6] = ["rust", "python", "backend", "data", "engineer", "sql"];

/// An artifacts directory, ledger path and reference path under one temp dir.
pub struct ArtifactDir {
    pub dir: TempDir,
}

impl ArtifactDir {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        std::fs::create_dir_all(dir.path().join("artifacts")).expect("artifacts dir");
        let fixture = Self { dir };
        fixture.write_vectorizer();
        fixture.write_encoders();
        fixture.write_classifier(&[3.0, 0.25, 0.5, 0.125, 1.0], -2.0);
        fixture
    }

    pub fn artifacts(&self) -> PathBuf {
        self.dir.path().join("artifacts")
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.dir.path().join("data").join("logged_features.csv")
    }

    pub fn reference_path(&self) -> PathBuf {
        self.dir.path().join("data").join("train_features.csv")
    }

    pub fn config(&self) -> Config {
        Config {
            artifacts_dir: self.artifacts(),
            ledger_path: self.ledger_path(),
            reference_path: self.reference_path(),
            ..Config::default()
        }
    }

    pub fn write_classifier(&self, coefficients: &[f64], intercept: f64) {
        write_json(
            &self.artifacts().join(CLASSIFIER_ARTIFACT),
            &json!({ "coefficients": coefficients, "intercept": intercept }),
        );
    }

    fn write_vectorizer(&self) {
        let vocabulary: serde_json::Map<String, serde_json::Value> = VOCABULARY
            .iter()
            .enumerate()
            .map(|(i, term)| (term.to_string(), json!(i)))
            .collect();
        write_json(
            &self.artifacts().join(VECTORIZER_ARTIFACT),
            &json!({ "vocabulary": vocabulary, "idf": [1.0, 1.5, 1.25, 2.0, 1.0, 1.75] }),
        );
    }

    fn write_encoders(&self) {
        let classes = |field: CategoricalField| match field {
            CategoricalField::NivelProfissionalVaga => json!(["junior", "pleno", "senior"]),
            CategoricalField::NivelInglesVaga | CategoricalField::NivelIngles => {
                json!(["avancado", "basico", "fluente", "intermediario"])
            }
            CategoricalField::NivelAcademico => json!(["ensino medio", "graduado", "mestre"]),
        };
        for field in CategoricalField::ALL {
            write_json(
                &self.artifacts().join(field.artifact_file()),
                &json!({ "classes": classes(field) }),
            );
        }
    }

    /// Writes a reference CSV with one row per entry of `rows`.
    pub fn write_reference(&self, rows: &[[f64; 5]]) {
        let mut text = FEATURE_COLUMNS.join(",");
        text.push('\n');
        for row in rows {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            text.push_str(&cells.join(","));
            text.push('\n');
        }
        let path = self.reference_path();
        std::fs::create_dir_all(path.parent().expect("parent")).expect("data dir");
        std::fs::write(path, text).expect("reference written");
    }
}

fn write_json(path: &Path, value: &serde_json::Value) {
    std::fs::write(path, serde_json::to_vec_pretty(value).expect("json")).expect("artifact written");
}
