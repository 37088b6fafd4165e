//! Lightweight structural summary of a materialized repository.

use serde::{Deserialize, Serialize};

/// Extensions treated as source files by the structural scan and analyzers.
pub const SOURCE_EXTENSIONS: &[&str] = &["py", "js", "ts", "rs", "go"];

/// Top-level source files and README flag, recorded by the fetch step under
/// the `repo_structure` tool output and consumed by the analyzers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoStructure {
  /// Source file names relative to the working path, sorted.
  pub files: Vec<String>,
  /// Whether a README.md exists at the repository root.
  pub readme: bool,
}

impl RepoStructure {
  /// Comment prefix for a file name, by extension (`#` for Python, `//`
  /// otherwise).
  pub fn comment_prefix(file: &str) -> &'static str {
    if file.ends_with(".py") { "#" } else { "//" }
  }
}
