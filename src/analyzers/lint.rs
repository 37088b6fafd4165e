//! Code-quality analyzer: line-level lint rules over the structural file
//! list.

use std::collections::BTreeMap;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use tracing::{info, instrument};

use super::{Analyzer, AnalyzerError, AnalyzerReport};
use crate::types::{AnalysisRecord, Issue, Severity};

/// Score penalty per lint finding.
const PENALTY_PER_ISSUE: f64 = 0.5;
const MAX_LINE_LENGTH: usize = 120;

/// One lint rule with its pylint-style native kind.
struct LintRule {
  id: &'static str,
  kind: &'static str,
  pattern: Lazy<Regex>,
  message: &'static str,
}

static RULES: [LintRule; 3] = [
  LintRule {
    id: "fixme_marker",
    kind: "warning",
    pattern: Lazy::new(|| Regex::new(r"\b(TODO|FIXME|XXX)\b").expect("static pattern")),
    message: "Unresolved TODO/FIXME marker",
  },
  LintRule {
    id: "debug_print",
    kind: "warning",
    pattern: Lazy::new(|| {
      Regex::new(r"console\.log\(|\bdbg!\(|\bprintln!\(").expect("static pattern")
    }),
    message: "Leftover debug print statement",
  },
  LintRule {
    id: "trailing_whitespace",
    kind: "convention",
    pattern: Lazy::new(|| Regex::new(r"[ \t]+$").expect("static pattern")),
    message: "Trailing whitespace",
  },
];

/// Maps a pylint-style kind onto the unified severity scale.
fn map_native_kind(kind: &str) -> Severity {
  match kind {
    "error" => Severity::Error,
    "warning" => Severity::Warning,
    "refactor" => Severity::Minor,
    _ => Severity::Info,
  }
}

/// Lint-based code-quality analyzer.
#[derive(Debug, Default)]
pub struct LintAnalyzer;

impl LintAnalyzer {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl Analyzer for LintAnalyzer {
  fn name(&self) -> &'static str {
    "lint"
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
    let mut rule_hits: BTreeMap<&'static str, usize> = BTreeMap::new();

    for file in &structure.files {
      let contents = std::fs::read_to_string(working_path.join(file))?;
      for (line_no, line) in contents.lines().enumerate() {
        if line.len() > MAX_LINE_LENGTH {
          *rule_hits.entry("line_too_long").or_default() += 1;
          issues.push(Issue::new(
            format!("{}:{}: Line exceeds {} characters", file, line_no + 1, MAX_LINE_LENGTH),
            map_native_kind("convention"),
          ));
        }
        for rule in &RULES {
          if rule.pattern.is_match(line) {
            *rule_hits.entry(rule.id).or_default() += 1;
            issues.push(Issue::new(
              format!("{}:{}: {}", file, line_no + 1, rule.message),
              map_native_kind(rule.kind),
            ));
          }
        }
      }
    }

    let score = (10.0 - PENALTY_PER_ISSUE * issues.len() as f64).max(0.0);
    info!(files = structure.files.len(), findings = issues.len(), score, "lint scan done");

    Ok(AnalyzerReport {
      output: json!({
        "files_scanned": structure.files.len(),
        "rule_hits": rule_hits,
      }),
      issues,
      score,
    })
  }
}
