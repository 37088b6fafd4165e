//! Security analyzer: pattern rules with a HIGH/MEDIUM/LOW native
//! vocabulary mapped onto the unified severity scale.

use std::collections::BTreeMap;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use tracing::{info, instrument};

use super::{Analyzer, AnalyzerError, AnalyzerReport};
use crate::types::{AnalysisRecord, Issue, Severity};

/// Score penalty per security finding.
const PENALTY_PER_ISSUE: f64 = 1.0;

struct SecurityRule {
  id: &'static str,
  /// Native severity vocabulary: HIGH, MEDIUM or LOW.
  level: &'static str,
  pattern: Lazy<Regex>,
  message: &'static str,
}

static RULES: [SecurityRule; 4] = [
  SecurityRule {
    id: "hardcoded_credential",
    level: "HIGH",
    pattern: Lazy::new(|| {
      Regex::new(r#"(?i)\b(api[_-]?key|secret|password|token)\b\s*[:=]\s*["'][^"']+["']"#)
        .expect("static pattern")
    }),
    message: "Hardcoded credential",
  },
  SecurityRule {
    id: "dynamic_execution",
    level: "MEDIUM",
    pattern: Lazy::new(|| Regex::new(r"\b(eval|exec)\s*\(").expect("static pattern")),
    message: "Dynamic code execution",
  },
  SecurityRule {
    id: "unsafe_deserialization",
    level: "MEDIUM",
    pattern: Lazy::new(|| {
      Regex::new(r"pickle\.loads?\(|yaml\.load\(").expect("static pattern")
    }),
    message: "Unsafe deserialization",
  },
  SecurityRule {
    id: "plain_http_url",
    level: "LOW",
    pattern: Lazy::new(|| Regex::new(r#"["']http://[^"']+["']"#).expect("static pattern")),
    message: "Insecure plain-HTTP URL",
  },
];

/// Maps the native HIGH/MEDIUM/LOW vocabulary onto unified severities.
fn map_native_level(level: &str) -> Severity {
  match level {
    "HIGH" => Severity::Error,
    "MEDIUM" => Severity::Warning,
    "LOW" => Severity::Minor,
    _ => Severity::Info,
  }
}

/// Pattern-based security analyzer.
#[derive(Debug, Default)]
pub struct SecurityScanAnalyzer;

impl SecurityScanAnalyzer {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl Analyzer for SecurityScanAnalyzer {
  fn name(&self) -> &'static str {
    "security_scan"
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
        for rule in &RULES {
          if rule.pattern.is_match(line) {
            *rule_hits.entry(rule.id).or_default() += 1;
            issues.push(Issue::new(
              format!("{}:{}: {}", file, line_no + 1, rule.message),
              map_native_level(rule.level),
            ));
          }
        }
      }
    }

    let score = (10.0 - PENALTY_PER_ISSUE * issues.len() as f64).max(0.0);
    info!(files = structure.files.len(), findings = issues.len(), score, "security scan done");

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
