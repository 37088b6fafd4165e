//! Analyzer collaborators: each produces a tool-output payload, unified
//! issues and one category score for a materialized repository.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{AnalysisRecord, Issue};

mod docs;
#[cfg(test)]
mod docs_test;
mod lint;
mod security_scan;

pub use docs::DocsAnalyzer;
pub use lint::LintAnalyzer;
pub use security_scan::SecurityScanAnalyzer;

/// Output of one analyzer run.
#[derive(Debug, Clone)]
pub struct AnalyzerReport {
  /// Free-form structured payload stored under the analyzer's name.
  pub output: serde_json::Value,
  /// Findings mapped onto the unified severity scale.
  pub issues: Vec<Issue>,
  /// Category score in [0, 10], monotonically decreasing in issue count.
  pub score: f64,
}

/// Analyzer failure; the owning step downgrades this to a severity-3 issue
/// and a sentinel score.
#[derive(Debug, Error)]
pub enum AnalyzerError {
  #[error("repository working path is not set")]
  MissingWorkingPath,
  #[error("repository structure summary is missing")]
  MissingStructure,
  #[error(transparent)]
  Io(#[from] std::io::Error),
}

/// Uniform analyzer contract consumed by the analyzer steps.
#[async_trait]
pub trait Analyzer: Send + Sync {
  /// Tool name; keys the payload in the record's tool outputs.
  fn name(&self) -> &'static str;

  async fn analyze(&self, record: &AnalysisRecord) -> Result<AnalyzerReport, AnalyzerError>;
}
