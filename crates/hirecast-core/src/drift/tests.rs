use super::ks::{kolmogorov_q, ks_statistic};
use super::*;
use tempfile::TempDir;

use crate::config::ConfigError;
use crate::constants::{DRIFT_RUN_NAME, FEATURE_COLUMNS, INSUFFICIENT_DATA};
use crate::features::FeatureVector;
use crate::ledger::DriftLedger;
use crate::tracking::RecordingSink;

fn training_rows(n: u32) -> Vec<FeatureVector> {
    (0..n)
        .map(|i| FeatureVector::from_parts(f64::from(i) / f64::from(n), [i % 3, i % 2, 1, i % 4]))
        .collect()
}

fn shifted(rows: &[FeatureVector], by: f64) -> Vec<FeatureVector> {
    rows.iter()
        .map(|r| {
            let mut values = *r.values();
            values[0] += by;
            FeatureVector::from_values(values)
        })
        .collect()
}

// KS statistic

#[test]
fn test_ks_identical_samples_have_zero_statistic() {
    let a = [0.1, 0.5, 0.5, 0.9, 1.3];
    assert_eq!(ks_statistic(&a, &a), 0.0);
}

#[test]
fn test_ks_disjoint_samples_have_unit_statistic() {
    let a = [0.0, 0.1, 0.2];
    let b = [5.0, 6.0, 7.0, 8.0];
    assert_eq!(ks_statistic(&a, &b), 1.0);
    assert_eq!(ks_statistic(&b, &a), 1.0);
}

#[test]
fn test_ks_statistic_handles_ties_across_samples() {
    // F_a jumps to 1.0 at 1.0; F_b reaches 0.5 at 1.0 and 1.0 at 2.0.
    let a = [1.0, 1.0];
    let b = [1.0, 2.0];
    assert!((ks_statistic(&a, &b) - 0.5).abs() < 1e-12);
}

#[test]
fn test_ks_statistic_is_symmetric_and_order_independent() {
    let a = [3.0, 1.0, 2.0, 8.0, 5.0];
    let b = [2.5, 7.0, 0.5];
    let mut a_rev = a;
    a_rev.reverse();

    let d = ks_statistic(&a, &b);
    assert_eq!(d, ks_statistic(&b, &a));
    assert_eq!(d, ks_statistic(&a_rev, &b));
    assert!((0.0..=1.0).contains(&d));
}

#[test]
fn test_ks_empty_sample_is_not_significant() {
    let result = ks_2samp(&[], &[1.0, 2.0]);
    assert_eq!(result.statistic, 0.0);
    assert_eq!(result.p_value, 1.0);
}

// Kolmogorov distribution

#[test]
fn test_kolmogorov_q_limits() {
    assert_eq!(kolmogorov_q(0.0), 1.0);
    assert!(kolmogorov_q(5.0) < 1e-15);
}

#[test]
fn test_kolmogorov_q_known_quantile() {
    // The 5% critical value of the Kolmogorov distribution is λ ≈ 1.3581.
    let q = kolmogorov_q(1.3581);
    assert!((q - 0.05).abs() < 1e-3, "got {q}");
}

#[test]
fn test_kolmogorov_q_is_monotone_decreasing() {
    let mut previous = kolmogorov_q(0.5);
    for step in 6..40 {
        let current = kolmogorov_q(f64::from(step) / 10.0);
        assert!(current <= previous);
        previous = current;
    }
}

#[test]
fn test_ks_2samp_small_samples_use_asymptotic_p_value() {
    // Fully separated samples of three: the exact two-sided p-value is 0.1.
    let result = ks_2samp(&[0.0, 1.0, 2.0], &[10.0, 11.0, 12.0]);

    assert_eq!(result.statistic, 1.0);
    assert!((result.p_value - 0.032_621_65).abs() < 1e-6, "p {}", result.p_value);
}

#[test]
fn test_ks_2samp_identical_samples_not_significant() {
    let a: Vec<f64> = (0..30).map(|i| f64::from(i) / 30.0).collect();
    let result = ks_2samp(&a, &a);
    assert_eq!(result.statistic, 0.0);
    assert_eq!(result.p_value, 1.0);
}

#[test]
fn test_ks_2samp_shifted_samples_significant() {
    let a: Vec<f64> = (0..30).map(|i| f64::from(i) / 30.0).collect();
    let b: Vec<f64> = a.iter().map(|x| x + 2.0).collect();
    let result = ks_2samp(&a, &b);
    assert_eq!(result.statistic, 1.0);
    assert!(result.p_value < 1e-6);
}

// Reference snapshot

#[test]
fn test_reference_from_columns_keeps_schema_order() {
    let snapshot = ReferenceSnapshot::from_columns([
        ("nivel_academico_enc", vec![1.0]),
        ("unrelated", vec![9.0]),
        ("match_score", vec![0.5]),
    ]);

    let names: Vec<&str> = snapshot.column_names().collect();
    assert_eq!(names, vec!["match_score", "nivel_academico_enc"]);
    assert!(snapshot.column("unrelated").is_none());
}

#[test]
fn test_reference_load_reads_columns_and_drops_bad_cells() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("train_features.csv");
    std::fs::write(
        &path,
        "match_score,nivel_ingles_enc,target\n0.25,1,1\nnot-a-number,2,0\n0.75,,1\n",
    )
    .unwrap();

    let snapshot = ReferenceSnapshot::load(&path).unwrap();
    assert_eq!(snapshot.column("match_score"), Some(&[0.25, 0.75][..]));
    assert_eq!(snapshot.column("nivel_ingles_enc"), Some(&[1.0, 2.0][..]));
    assert!(snapshot.column("nivel_academico_enc").is_none());
}

#[test]
fn test_reference_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = ReferenceSnapshot::load(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, ReferenceError::NotFound { .. }));
}

#[test]
fn test_reference_load_without_feature_columns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("train_features.csv");
    std::fs::write(&path, "a,b\n1,2\n").unwrap();

    let err = ReferenceSnapshot::load(&path).unwrap_err();
    assert!(matches!(err, ReferenceError::NoFeatureColumns { .. }));
}

// Detector

#[test]
fn test_compare_without_reference_is_insufficient() {
    let report = DriftDetector::new().compare(None, &training_rows(10));
    assert!(!report.drift);
    assert_eq!(report.details, INSUFFICIENT_DATA);
    assert!(report.features.is_none());
}

#[test]
fn test_compare_without_live_rows_is_insufficient() {
    let reference = ReferenceSnapshot::from_rows(&training_rows(10));
    let report = DriftDetector::new().compare(Some(&reference), &[]);
    assert!(!report.drift);
    assert!(report.is_insufficient());
}

#[test]
fn test_compare_identical_distribution_no_drift() {
    let rows = training_rows(30);
    let reference = ReferenceSnapshot::from_rows(&rows);

    let report = DriftDetector::new().compare(Some(&reference), &rows);

    assert!(!report.drift);
    assert_eq!(report.details, "no drift detected across 5 features");
    let features = report.features.unwrap();
    assert_eq!(features.len(), FEATURE_COLUMNS.len());
    assert!(features.values().all(|f| !f.drift && f.ks_stat == 0.0));
}

#[test]
fn test_compare_shifted_match_score_drifts() {
    let rows = training_rows(30);
    let reference = ReferenceSnapshot::from_rows(&rows);
    let live = shifted(&rows, 5.0);

    let report = DriftDetector::new().compare(Some(&reference), &live);

    assert!(report.drift);
    assert_eq!(report.details, "drift detected in 1 of 5 features: match_score");
    assert_eq!(report.drifted_columns(), vec!["match_score"]);
    let score = report.features.as_ref().unwrap()["match_score"];
    assert_eq!(score.ks_stat, 1.0);
    assert!(score.p_value < 0.05);
}

#[test]
fn test_compare_only_reference_columns() {
    let rows = training_rows(20);
    let values: Vec<f64> = rows.iter().map(|r| r.match_score()).collect();
    let reference = ReferenceSnapshot::from_columns([("match_score", values)]);

    let report = DriftDetector::new().compare(Some(&reference), &rows);

    let features = report.features.unwrap();
    assert_eq!(features.keys().collect::<Vec<_>>(), vec!["match_score"]);
    assert_eq!(report.details, "no drift detected across 1 features");
}

#[test]
fn test_compare_no_comparable_columns() {
    let reference = ReferenceSnapshot::from_columns([("match_score", Vec::new())]);

    let report = DriftDetector::new().compare(Some(&reference), &training_rows(5));

    assert!(!report.drift);
    assert_eq!(report.details, "no comparable feature columns");
    assert!(report.features.is_none());
}

#[test]
fn test_alpha_controls_significance() {
    let reference: Vec<FeatureVector> = training_rows(30);
    let live = shifted(&reference, 0.2);
    let snapshot = ReferenceSnapshot::from_rows(&reference);

    let strict = DriftDetector::new().with_alpha(1e-12).unwrap().compare(Some(&snapshot), &live);
    let loose = DriftDetector::new().with_alpha(0.99).unwrap().compare(Some(&snapshot), &live);

    assert!(!strict.drift);
    assert!(loose.drift);
}

#[test]
fn test_invalid_alpha_rejected() {
    for alpha in [0.0, 1.0, 1.5, -0.1, f64::NAN] {
        let result = DriftDetector::new().with_alpha(alpha);
        assert!(
            matches!(result, Err(ConfigError::InvalidAlpha { .. })),
            "{alpha}"
        );
    }
    assert_eq!(DriftDetector::new().with_alpha(0.01).unwrap().alpha(), 0.01);
}

#[test]
fn test_report_serialization_omits_missing_features() {
    let json = serde_json::to_value(DriftReport::insufficient_data()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"drift": false, "details": "insufficient data"})
    );
}

#[test]
fn test_check_empty_ledger_logs_nothing() {
    let dir = TempDir::new().unwrap();
    let ledger = DriftLedger::new(dir.path().join("logged_features.csv"));
    let reference = ReferenceSnapshot::from_rows(&training_rows(10));
    let sink = RecordingSink::new();

    let report = DriftDetector::new().check(&ledger, Some(&reference), &sink);

    assert_eq!(report, DriftReport::insufficient_data());
    assert!(sink.runs().is_empty());
}

#[test]
fn test_check_unreadable_ledger_degrades() {
    let dir = TempDir::new().unwrap();
    // A directory where the ledger file should be.
    let ledger = DriftLedger::new(dir.path());
    let reference = ReferenceSnapshot::from_rows(&training_rows(10));
    let sink = RecordingSink::new();

    let report = DriftDetector::new().check(&ledger, Some(&reference), &sink);

    assert!(!report.drift);
    assert_eq!(report.details, INSUFFICIENT_DATA);
}

#[test]
fn test_check_reads_ledger_and_logs_run() {
    let dir = TempDir::new().unwrap();
    let ledger = DriftLedger::new(dir.path().join("logged_features.csv"));
    let rows = training_rows(30);
    for row in shifted(&rows, 5.0) {
        ledger.append(&row).unwrap();
    }
    let reference = ReferenceSnapshot::from_rows(&rows);
    let sink = RecordingSink::new();

    let report = DriftDetector::new().check(&ledger, Some(&reference), &sink);
    assert!(report.drift);

    let runs = sink.runs_named(DRIFT_RUN_NAME);
    assert_eq!(runs.len(), 1);
    let run = &runs[0];
    assert_eq!(run.metric("drift"), Some(1.0));
    assert_eq!(run.metric("match_score_ks_stat"), Some(1.0));
    assert_eq!(run.metric("match_score_drift"), Some(1.0));
    assert_eq!(run.metric("nivel_ingles_enc_drift"), Some(0.0));
    assert_eq!(run.param("live_rows"), Some("30"));
    assert_eq!(run.dict("drift_report").unwrap()["drift"], true);
}
