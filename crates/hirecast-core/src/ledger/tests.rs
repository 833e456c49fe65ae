use super::*;
use std::sync::Arc;
use tempfile::TempDir;

use crate::features::FeatureVector;

fn row(i: u32) -> FeatureVector {
    FeatureVector::from_parts(f64::from(i) / 100.0, [i % 3, i % 2, 1, i % 5])
}

fn ledger_in(dir: &TempDir) -> DriftLedger {
    DriftLedger::new(dir.path().join("nested").join("logged_features.csv"))
}

#[test]
fn test_first_append_creates_file_with_header() {
    let dir = TempDir::new().unwrap();
    let ledger = ledger_in(&dir);
    assert!(!ledger.path().exists());

    ledger.append(&FeatureVector::from_parts(0.1, [1, 2, 3, 4])).unwrap();

    let text = std::fs::read_to_string(ledger.path()).unwrap();
    assert_eq!(
        text,
        "match_score,nivel_profissional_vaga_enc,nivel_ingles_vaga_enc,nivel_ingles_enc,nivel_academico_enc\n\
         0.1,1,2,3,4\n"
    );
}

#[test]
fn test_header_written_once() {
    let dir = TempDir::new().unwrap();
    let ledger = ledger_in(&dir);

    for i in 0..3 {
        ledger.append(&row(i)).unwrap();
    }

    let text = std::fs::read_to_string(ledger.path()).unwrap();
    assert_eq!(text.matches("match_score").count(), 1);
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn test_read_all_returns_rows_in_append_order() {
    let dir = TempDir::new().unwrap();
    let ledger = ledger_in(&dir);
    let expected: Vec<FeatureVector> = (0..25).map(row).collect();

    for v in &expected {
        ledger.append(v).unwrap();
    }

    assert_eq!(ledger.read_all().unwrap(), expected);
    assert_eq!(ledger.row_count().unwrap(), 25);
}

#[test]
fn test_rows_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logged_features.csv");

    DriftLedger::new(&path).append(&row(7)).unwrap();
    DriftLedger::new(&path).append(&row(8)).unwrap();

    assert_eq!(DriftLedger::new(&path).read_all().unwrap(), vec![row(7), row(8)]);
}

#[test]
fn test_missing_file_reads_empty() {
    let dir = TempDir::new().unwrap();
    let ledger = ledger_in(&dir);

    assert!(ledger.read_all().unwrap().is_empty());
}

#[test]
fn test_empty_file_reads_empty_and_gets_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logged_features.csv");
    std::fs::write(&path, "").unwrap();
    let ledger = DriftLedger::new(&path);

    assert!(ledger.read_all().unwrap().is_empty());

    ledger.append(&row(1)).unwrap();
    assert_eq!(ledger.read_all().unwrap(), vec![row(1)]);
}

#[test]
fn test_foreign_header_reads_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logged_features.csv");
    std::fs::write(&path, "a,b,c,d,e\n1,2,3,4,5\n").unwrap();

    assert!(DriftLedger::new(&path).read_all().unwrap().is_empty());
}

#[test]
fn test_malformed_rows_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logged_features.csv");
    std::fs::write(
        &path,
        "match_score,nivel_profissional_vaga_enc,nivel_ingles_vaga_enc,nivel_ingles_enc,nivel_academico_enc\n\
         0.5,1,1,1,1\n\
         garbage,1,1,1,1\n\
         0.25,2,2\n\
         0.75,0,0,0,0\n\
         0.9,1,",
    )
    .unwrap();

    let rows = DriftLedger::new(&path).read_all().unwrap();
    assert_eq!(
        rows,
        vec![
            FeatureVector::from_parts(0.5, [1, 1, 1, 1]),
            FeatureVector::from_parts(0.75, [0, 0, 0, 0]),
        ]
    );
}

#[test]
fn test_append_after_torn_row_starts_fresh_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logged_features.csv");
    std::fs::write(
        &path,
        "match_score,nivel_profissional_vaga_enc,nivel_ingles_vaga_enc,nivel_ingles_enc,nivel_academico_enc\n\
         0.9,1,",
    )
    .unwrap();

    let ledger = DriftLedger::new(&path);
    ledger.append(&FeatureVector::from_parts(0.5, [1, 1, 1, 1])).unwrap();
    assert_eq!(
        ledger.read_all().unwrap(),
        vec![FeatureVector::from_parts(0.5, [1, 1, 1, 1])]
    );

    ledger.append(&FeatureVector::from_parts(0.25, [0, 1, 0, 1])).unwrap();
    assert_eq!(ledger.read_all().unwrap().len(), 2);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n0.9,1,\n0.5,1,1,1,1\n"));
}

#[test]
fn test_unreadable_ledger_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let ledger = DriftLedger::new(dir.path());

    let err = ledger.read_all().unwrap_err();
    assert!(matches!(err, StorageError::Unavailable { .. }));
}

#[test]
fn test_unwritable_ledger_fails_append() {
    let dir = TempDir::new().unwrap();
    let ledger = DriftLedger::new(dir.path());

    let err = ledger.append(&row(1)).unwrap_err();
    assert!(matches!(err, StorageError::WriteFailed { .. }));
    assert!(!ledger.location_ready());
}

#[test]
fn test_location_ready_for_new_path() {
    let dir = TempDir::new().unwrap();
    assert!(ledger_in(&dir).location_ready());
    assert!(DriftLedger::new("logged_features.csv").location_ready());
}

#[test]
fn test_concurrent_appends_do_not_interleave() {
    let dir = TempDir::new().unwrap();
    let ledger = Arc::new(ledger_in(&dir));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let ledger = Arc::clone(&ledger);
            std::thread::spawn(move || {
                for i in 0..25 {
                    ledger.append(&row(t * 100 + i)).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let rows = ledger.read_all().unwrap();
    assert_eq!(rows.len(), 200);

    let text = std::fs::read_to_string(ledger.path()).unwrap();
    assert_eq!(text.lines().count(), 201);
    for line in text.lines().skip(1) {
        assert_eq!(line.split(',').count(), 5, "torn row: {line:?}");
    }
}
