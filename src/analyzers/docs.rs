//! Documentation analyzer: README presence and inline comment density.

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, instrument, warn};

use super::{Analyzer, AnalyzerError, AnalyzerReport};
use crate::types::{AnalysisRecord, Issue, RepoStructure, Severity};

/// Base score with/without a README.
const README_SCORE: f64 = 8.0;
const NO_README_SCORE: f64 = 4.0;
/// Score credit per comment line, capped.
const COMMENT_CREDIT: f64 = 0.1;
const COMMENT_CREDIT_CAP: f64 = 2.0;
/// Comment lines below this count as low inline documentation.
const LOW_COMMENT_THRESHOLD: usize = 5;

/// README/comment-density documentation analyzer.
#[derive(Debug, Default)]
pub struct DocsAnalyzer;

impl DocsAnalyzer {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl Analyzer for DocsAnalyzer {
  fn name(&self) -> &'static str {
    "docs"
  }

  #[instrument(level = "trace", skip(self, record), fields(run_id = %record.run_id))]
  async fn analyze(&self, record: &AnalysisRecord) -> Result<AnalyzerReport, AnalyzerError> {
    let working_path = record
      .working_path
      .as_ref()
      .ok_or(AnalyzerError::MissingWorkingPath)?;
    let structure = record
      .repo_structure()
      .ok_or(AnalyzerError::MissingStructure)?;

    let mut issues: Vec<Issue> = Vec::new();
    let mut comment_count = 0usize;

    for file in &structure.files {
      let prefix = RepoStructure::comment_prefix(file);
      match std::fs::read_to_string(working_path.join(file)) {
        Ok(contents) => {
          comment_count += contents
            .lines()
            .filter(|line| line.trim_start().starts_with(prefix))
            .count();
        }
        Err(e) => {
          // Partial-validity failure: the repo stays usable.
          warn!(file = %file, error = %e, "failed to read file");
          issues.push(Issue::new(
            format!("Failed to read file {}: {}", file, e),
            Severity::Minor,
          ));
        }
      }
    }

    let base = if structure.readme {
      README_SCORE
    } else {
      NO_README_SCORE
    };
    let score = base + (COMMENT_CREDIT * comment_count as f64).min(COMMENT_CREDIT_CAP);

    if !structure.readme {
      issues.push(Issue::new("Missing README.md", Severity::Warning));
    }
    if comment_count < LOW_COMMENT_THRESHOLD {
      issues.push(Issue::new("Low inline documentation", Severity::Minor));
    }

    info!(
      readme = structure.readme,
      comment_lines = comment_count,
      score,
      "documentation scan done"
    );

    Ok(AnalyzerReport {
      output: json!({
        "readme": structure.readme,
        "comment_lines": comment_count,
        "files_scanned": structure.files.len(),
      }),
      issues,
      score,
    })
  }
}
