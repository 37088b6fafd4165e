//! A single finding recorded against the audited repository.

use serde::{Deserialize, Serialize};

use super::Severity;

/// One finding: a human-readable message plus its unified severity.
///
/// Issues are append-only for the duration of a run; discovery order is
/// preserved and nothing deduplicates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
  pub message: String,
  pub severity: Severity,
}

impl Issue {
  pub fn new(message: impl Into<String>, severity: Severity) -> Self {
    Self {
      message: message.into(),
      severity,
    }
  }
}

/// Returns the messages of the top `n` issues by descending severity.
///
/// The sort is stable: issues of equal severity keep their discovery order.
pub fn top_issues(issues: &[Issue], n: usize) -> Vec<String> {
  let mut sorted: Vec<&Issue> = issues.iter().collect();
  sorted.sort_by(|a, b| b.severity.cmp(&a.severity));
  sorted
    .into_iter()
    .take(n)
    .map(|i| i.message.clone())
    .collect()
}
