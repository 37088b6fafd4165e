//! Tests for [DocsAnalyzer].

use std::path::Path;

use super::{Analyzer, DocsAnalyzer};
use crate::types::{
  AnalysisRecord, ModelConfig, RepoSource, RepoStructure, Severity,
};

fn record_for(path: &Path, files: &[&str], readme: bool) -> AnalysisRecord {
  let mut record = AnalysisRecord::new(
    RepoSource::Local {
      path: path.to_path_buf(),
    },
    None,
    ModelConfig::default(),
    true,
  );
  record.working_path = Some(path.to_path_buf());
  record.is_valid = true;
  record.set_repo_structure(&RepoStructure {
    files: files.iter().map(|f| f.to_string()).collect(),
    readme,
  });
  record
}

#[tokio::test]
async fn no_readme_and_no_comments_scores_four_with_both_issues() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join("main.py"), "value = 1\n").unwrap();
  let record = record_for(dir.path(), &["main.py"], false);

  let report = DocsAnalyzer::new().analyze(&record).await.unwrap();
  assert_eq!(report.score, 4.0);
  let messages: Vec<&str> = report.issues.iter().map(|i| i.message.as_str()).collect();
  assert!(messages.contains(&"Missing README.md"));
  assert!(messages.contains(&"Low inline documentation"));
}

#[tokio::test]
async fn readme_and_comments_raise_the_score() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(
    dir.path().join("main.py"),
    "# one\n# two\n# three\n# four\n# five\nvalue = 1\n",
  )
  .unwrap();
  let record = record_for(dir.path(), &["main.py"], true);

  let report = DocsAnalyzer::new().analyze(&record).await.unwrap();
  assert_eq!(report.score, 8.5);
  assert!(report.issues.is_empty());
}

#[tokio::test]
async fn comment_credit_is_capped_at_two_points() {
  let dir = tempfile::tempdir().unwrap();
  let heavily_commented = "# comment\n".repeat(40);
  std::fs::write(dir.path().join("main.py"), heavily_commented).unwrap();
  let record = record_for(dir.path(), &["main.py"], true);

  let report = DocsAnalyzer::new().analyze(&record).await.unwrap();
  assert_eq!(report.score, 10.0);
}

#[tokio::test]
async fn slash_comments_count_for_non_python_files() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(
    dir.path().join("lib.rs"),
    "// a\n// b\n// c\n// d\n// e\nfn main() {}\n",
  )
  .unwrap();
  let record = record_for(dir.path(), &["lib.rs"], true);

  let report = DocsAnalyzer::new().analyze(&record).await.unwrap();
  assert_eq!(report.score, 8.5);
  assert_eq!(report.output["comment_lines"], 5);
}

#[tokio::test]
async fn unreadable_file_is_a_minor_issue_not_a_failure() {
  let dir = tempfile::tempdir().unwrap();
  let record = record_for(dir.path(), &["ghost.py"], true);

  let report = DocsAnalyzer::new().analyze(&record).await.unwrap();
  let unreadable: Vec<_> = report
    .issues
    .iter()
    .filter(|i| i.message.starts_with("Failed to read file ghost.py"))
    .collect();
  assert_eq!(unreadable.len(), 1);
  assert_eq!(unreadable[0].severity, Severity::Minor);
}
