use super::*;
use std::sync::Arc;
use tempfile::TempDir;

fn encoder(classes: &[&str]) -> Arc<dyn CategoricalEncoder> {
    Arc::new(LabelEncoder::from_classes(classes.iter().copied()).unwrap())
}

fn sample_set() -> EncoderSet {
    EncoderSet::new(
        encoder(&["junior", "pleno", "senior"]),
        encoder(&["basico", "fluente", "intermediario"]),
        encoder(&["basico", "fluente", "intermediario", "nenhum"]),
        encoder(&["ensino medio", "graduado", "pos graduado"]),
    )
}

#[test]
fn test_known_label_maps_to_class_index() {
    let set = sample_set();

    assert_eq!(set.encode(CategoricalField::NivelProfissionalVaga, "junior"), 0);
    assert_eq!(set.encode(CategoricalField::NivelProfissionalVaga, "senior"), 2);
    assert_eq!(set.encode(CategoricalField::NivelIngles, "nenhum"), 3);
    assert_eq!(set.encode(CategoricalField::NivelAcademico, "graduado"), 1);
}

#[test]
fn test_unknown_label_falls_back_to_zero() {
    let set = sample_set();

    for field in CategoricalField::ALL {
        assert_eq!(set.encode(field, "astronauta"), 0);
        assert_eq!(set.encode(field, ""), 0);
    }
}

#[test]
fn test_membership_is_exact() {
    let set = sample_set();

    assert_eq!(set.encode(CategoricalField::NivelProfissionalVaga, "Senior"), 0);
    assert_eq!(set.encode(CategoricalField::NivelProfissionalVaga, " senior"), 0);
    assert!(!set.encoder(CategoricalField::NivelProfissionalVaga).is_known("Senior"));
    assert!(set.encoder(CategoricalField::NivelProfissionalVaga).is_known("senior"));
}

#[test]
fn test_encoding_is_stable_across_calls() {
    let set = sample_set();
    let first = set.encode(CategoricalField::NivelInglesVaga, "intermediario");

    for _ in 0..100 {
        assert_eq!(set.encode(CategoricalField::NivelInglesVaga, "intermediario"), first);
    }
    assert_eq!(first, 2);
}

#[test]
fn test_duplicate_classes_rejected() {
    let err = LabelEncoder::from_classes(["a", "b", "a"]).unwrap_err();
    assert!(matches!(err, EncodingError::DuplicateClass { ref label } if label == "a"));
}

#[test]
fn test_load_dir_reads_every_field() {
    let dir = TempDir::new().unwrap();
    for field in CategoricalField::ALL {
        let body = serde_json::json!({ "classes": ["x", field.request_key()] });
        std::fs::write(dir.path().join(field.artifact_file()), body.to_string()).unwrap();
    }

    let set = EncoderSet::load_dir(dir.path()).expect("encoders should load");

    for field in CategoricalField::ALL {
        assert_eq!(set.encode(field, field.request_key()), 1);
        assert_eq!(set.encoder(field).classes().len(), 2);
    }
}

#[test]
fn test_load_missing_artifact() {
    let dir = TempDir::new().unwrap();

    let err = EncoderSet::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, EncodingError::ArtifactNotFound { .. }));
}

#[test]
fn test_load_malformed_artifact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("encoder.json");
    std::fs::write(&path, r#"{"labels": ["a"]}"#).unwrap();

    let err = LabelEncoder::load(&path).unwrap_err();
    assert!(matches!(err, EncodingError::InvalidArtifact { .. }));
}

#[test]
fn test_field_names_line_up_with_schema() {
    for (i, field) in CategoricalField::ALL.iter().enumerate() {
        assert_eq!(field.ordinal(), i);
        assert_eq!(crate::constants::FEATURE_COLUMNS[i + 1], field.column());
        assert_eq!(field.column(), format!("{}_enc", field.request_key()));
    }
}
