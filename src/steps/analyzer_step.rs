//! Generic analyzer step: validity gating, failure containment and score
//! bookkeeping around one analyzer collaborator.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, instrument, warn};

use super::{CODE_QUALITY, DOCUMENTATION, SECURITY};
use crate::analyzers::Analyzer;
use crate::engine::Step;
use crate::types::{AnalysisRecord, Severity};

/// Sentinel score written when a category cannot be analyzed.
const SENTINEL_SCORE: f64 = 0.0;

/// Step wrapper for one analyzer collaborator.
///
/// Owns a single category score. When the record is invalid it writes the
/// sentinel score and one explanatory warning instead of doing real work;
/// when the analyzer fails it downgrades the failure to a severity-3 issue.
pub struct AnalyzerStep {
  id: &'static str,
  /// Human wording used in skip/failure messages, e.g. "code quality".
  label: &'static str,
  analyzer: Arc<dyn Analyzer>,
}

impl AnalyzerStep {
  pub fn code_quality(analyzer: Arc<dyn Analyzer>) -> Self {
    Self {
      id: CODE_QUALITY,
      label: "code quality",
      analyzer,
    }
  }

  pub fn security(analyzer: Arc<dyn Analyzer>) -> Self {
    Self {
      id: SECURITY,
      label: "security",
      analyzer,
    }
  }

  pub fn documentation(analyzer: Arc<dyn Analyzer>) -> Self {
    Self {
      id: DOCUMENTATION,
      label: "documentation",
      analyzer,
    }
  }

  fn capitalized_label(&self) -> String {
    let mut chars = self.label.chars();
    match chars.next() {
      Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
      None => String::new(),
    }
  }
}

#[async_trait]
impl Step for AnalyzerStep {
  fn id(&self) -> &str {
    self.id
  }

  #[instrument(level = "trace", skip(self, record), fields(run_id = %record.run_id, category = self.id))]
  async fn apply(&self, mut record: AnalysisRecord) -> AnalysisRecord {
    if !record.is_valid {
      warn!(category = self.id, "skipping analysis, repository unavailable");
      record.scores.insert(self.id.to_string(), SENTINEL_SCORE);
      record.push_issue(
        format!("Skipping {} analysis due to invalid repo", self.label),
        Severity::Warning,
      );
      return record;
    }

    match self.analyzer.analyze(&record).await {
      Ok(report) => {
        record
          .tool_outputs
          .insert(self.analyzer.name().to_string(), report.output);
        record.scores.insert(self.id.to_string(), report.score);
        record.issues.extend(report.issues);
      }
      Err(e) => {
        error!(category = self.id, error = %e, "analysis failed");
        record.scores.insert(self.id.to_string(), SENTINEL_SCORE);
        record.push_issue(
          format!("{} analysis failed: {}", self.capitalized_label(), e),
          Severity::Error,
        );
      }
    }
    record
  }
}
