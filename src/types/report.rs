//! Caller-facing projection of a finished analysis record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::AnalysisRecord;

/// Final audit result exposed outside the pipeline: overall score, the full
/// category score map, flat issue messages and recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
  pub overall_score: f64,
  pub categories: BTreeMap<String, f64>,
  pub issues: Vec<String>,
  pub recommendations: Vec<String>,
}

impl AuditReport {
  /// Projects the record; issue severities are dropped at this boundary.
  pub fn from_record(record: &AnalysisRecord) -> Self {
    Self {
      overall_score: record.scores.get("overall").copied().unwrap_or(0.0),
      categories: record.scores.clone(),
      issues: record.issue_messages(),
      recommendations: record.recommendations.clone(),
    }
  }
}
