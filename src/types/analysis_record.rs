//! The single state object threaded through every pipeline step.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;

use uuid::Uuid;

use super::{Issue, ModelConfig, RepoStructure, ScratchDir, Severity};

/// Tool-output key holding the [RepoStructure] summary.
pub const REPO_STRUCTURE_KEY: &str = "repo_structure";

/// Identity of the repository to audit: remote URL or local path.
///
/// Exactly one variant drives fetch behavior; construction enforces that at
/// least one identity was supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoSource {
  Remote { url: String },
  Local { path: PathBuf },
}

impl RepoSource {
  /// Builds a source from optional URL and path, URL taking precedence.
  /// Returns `None` when both are absent or empty; callers must treat that
  /// as a precondition failure before any record is created.
  pub fn from_parts(url: Option<&str>, path: Option<&str>) -> Option<Self> {
    match url {
      Some(u) if !u.trim().is_empty() => Some(RepoSource::Remote {
        url: u.trim().to_string(),
      }),
      _ => match path {
        Some(p) if !p.trim().is_empty() => Some(RepoSource::Local {
          path: PathBuf::from(p.trim()),
        }),
        _ => None,
      },
    }
  }
}

impl fmt::Display for RepoSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RepoSource::Remote { url } => write!(f, "{}", url),
      RepoSource::Local { path } => write!(f, "{}", path.display()),
    }
  }
}

/// Analysis state for one audit run.
///
/// Created once per run, rewritten by each visited step in sequence, and
/// projected into an [AuditReport](super::AuditReport) at the end. Not
/// `Clone`: the scratch handle is uniquely owned by the run.
#[derive(Debug)]
pub struct AnalysisRecord {
  /// Run correlation id for logs.
  pub run_id: Uuid,
  pub source: RepoSource,
  pub access_token: Option<String>,
  /// Filesystem location of the materialized repository; set by fetch.
  pub working_path: Option<PathBuf>,
  /// Free-form structured output per analyzer, keyed by tool name.
  pub tool_outputs: HashMap<String, serde_json::Value>,
  /// Category scores; each key is written once by its owning step.
  pub scores: BTreeMap<String, f64>,
  /// Append-only findings in discovery order.
  pub issues: Vec<Issue>,
  pub recommendations: Vec<String>,
  pub model_config: ModelConfig,
  pub use_cache: bool,
  /// Temporary clone directory; released exactly once by cleanup.
  pub scratch: Option<ScratchDir>,
  /// False until fetch succeeds; never returns to true within a run.
  pub is_valid: bool,
}

impl AnalysisRecord {
  pub fn new(
    source: RepoSource,
    access_token: Option<String>,
    model_config: ModelConfig,
    use_cache: bool,
  ) -> Self {
    Self {
      run_id: Uuid::new_v4(),
      source,
      access_token,
      working_path: None,
      tool_outputs: HashMap::new(),
      scores: BTreeMap::new(),
      issues: Vec::new(),
      recommendations: Vec::new(),
      model_config,
      use_cache,
      scratch: None,
      is_valid: false,
    }
  }

  /// Appends one finding; issues are never removed within a run.
  pub fn push_issue(&mut self, message: impl Into<String>, severity: Severity) {
    self.issues.push(Issue::new(message, severity));
  }

  /// Marks the repository unusable; remaining analyzer steps become no-ops.
  pub fn invalidate(&mut self) {
    self.is_valid = false;
  }

  /// All issue messages in discovery order, severities dropped.
  pub fn issue_messages(&self) -> Vec<String> {
    self.issues.iter().map(|i| i.message.clone()).collect()
  }

  /// Deserializes the structural summary recorded by the fetch step.
  pub fn repo_structure(&self) -> Option<RepoStructure> {
    self
      .tool_outputs
      .get(REPO_STRUCTURE_KEY)
      .and_then(|v| serde_json::from_value(v.clone()).ok())
  }

  /// Records the structural summary tool output.
  pub fn set_repo_structure(&mut self, structure: &RepoStructure) {
    if let Ok(value) = serde_json::to_value(structure) {
      self.tool_outputs.insert(REPO_STRUCTURE_KEY.to_string(), value);
    }
  }
}
