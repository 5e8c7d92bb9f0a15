//! Load a CASF-style decoy table from disk, evaluate it, and export the results.

use casf_io::{load_pose_table, parse_labelled_values, save_predictions, write_target_outcomes, TableFormat};
use casf_metrics::{evaluate, DockingPowerEvaluator};
use std::io::Write;

const DECOYS: &str = "\
#code      pdb_id  score   rmsd
1a30_01    1a30    9.10    0.40
1a30_02    1a30    8.70    0.90
1a30_03    1a30    7.20    1.30
1a30_04    1a30    6.60    1.80
1a30_05    1a30    5.00    2.60
1a30_06    1a30    3.30    6.10
1bcu_01    1bcu    9.90    5.50
1bcu_02    1bcu    9.00    4.20
1bcu_03    1bcu    4.00    0.70
1bcu_04    1bcu    3.00    8.00
";

#[test]
fn test_evaluate_decoy_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("decoys.dat");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(DECOYS.as_bytes()).unwrap();

    let records = load_pose_table(&path).unwrap();
    assert_eq!(records.len(), 10);

    let result = evaluate(&records, 2.0).unwrap();
    assert_eq!(result.n_targets, 2);
    // 1a30 succeeds at every rank; 1bcu only reaches a near-native pose at rank 3
    assert_eq!(result.top(1).unwrap().correct, 1);
    assert_eq!(result.top(1).unwrap().success, 50.0);
    assert_eq!(result.top(2).unwrap().correct, 1);
    assert_eq!(result.top(3).unwrap().correct, 2);
    assert_eq!(result.top(3).unwrap().success, 100.0);

    // Only 1a30 has five poses within 3 A, ranked perfectly
    assert_eq!(result.sp(2), None);
    assert_eq!(result.sp(3), Some(1.0));
    assert_eq!(result.sp(10), Some(1.0));

    let json = serde_json::to_value(&result).unwrap();
    assert!(json["sp2"].is_null());
    assert_eq!(json["top3_correct"], serde_json::json!(2));
}

#[test]
fn test_target_detail_and_prediction_export() {
    let dir = tempfile::tempdir().unwrap();
    let records = casf_io::parse_pose_table(DECOYS, TableFormat::Whitespace).unwrap();
    let report = DockingPowerEvaluator::default().report(&records).unwrap();

    let mut detail = Vec::new();
    write_target_outcomes(&mut detail, &report.targets).unwrap();
    let detail = String::from_utf8(detail).unwrap();
    assert!(detail.lines().nth(1).unwrap().starts_with("1a30,1a30_01,0.40,1a30_02,0.90,1a30_03,1.30,1,1,1"));
    assert!(detail.lines().nth(2).unwrap().starts_with("1bcu,1bcu_01,5.50,1bcu_02,4.20,1bcu_03,0.70,0,0,1"));

    let ids: Vec<&str> = records.iter().map(|r| r.pose_code.as_str()).collect();
    let scores: Vec<f64> = records.iter().map(|r| r.score).collect();
    let out = dir.path().join("scores.dat");
    save_predictions(&out, &ids, &scores).unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("#code score\n1a30_01 9.10\n"));
    let (codes, back) = parse_labelled_values(&written, TableFormat::Whitespace, "#code", "score").unwrap();
    assert_eq!(codes.len(), 10);
    assert_eq!(back[6], 9.9);
}
