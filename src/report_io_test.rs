//! Tests for report save/load.

use std::collections::BTreeMap;

use crate::report_io::{load_report, save_report};
use crate::types::AuditReport;

fn report() -> AuditReport {
  let mut categories = BTreeMap::new();
  categories.insert("code_quality".to_string(), 8.0);
  categories.insert("overall".to_string(), 8.0);
  AuditReport {
    overall_score: 8.0,
    categories,
    issues: vec!["an issue".to_string()],
    recommendations: vec!["a recommendation".to_string()],
  }
}

#[test]
fn save_then_load_round_trips() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("audit-report.json");
  save_report(&path, &report()).unwrap();
  assert_eq!(load_report(&path).unwrap(), report());
}

#[test]
fn save_creates_parent_directories() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("nested").join("audit-report.json");
  save_report(&path, &report()).unwrap();
  assert!(path.exists());
}

#[test]
fn load_missing_file_errors() {
  let dir = tempfile::tempdir().unwrap();
  assert!(load_report(&dir.path().join("absent.json")).is_err());
}

#[test]
fn load_invalid_json_errors() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("broken.json");
  std::fs::write(&path, "not json").unwrap();
  let err = load_report(&path).unwrap_err();
  assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}
