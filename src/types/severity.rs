//! Unified issue severity scale shared by all analyzers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Issue severity on the unified 0–3 scale.
///
/// Analyzer-native vocabularies (pylint-style kinds, HIGH/MEDIUM/LOW) are
/// mapped onto this scale at the analyzer boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
  Info,
  Minor,
  Warning,
  Error,
}

impl Severity {
  /// Numeric level (0=info, 1=minor, 2=warning, 3=error).
  pub fn as_level(self) -> u8 {
    match self {
      Severity::Info => 0,
      Severity::Minor => 1,
      Severity::Warning => 2,
      Severity::Error => 3,
    }
  }

  /// Severity from a numeric level; levels above 3 clamp to [Severity::Error].
  pub fn from_level(level: u8) -> Self {
    match level {
      0 => Severity::Info,
      1 => Severity::Minor,
      2 => Severity::Warning,
      _ => Severity::Error,
    }
  }
}

impl fmt::Display for Severity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Severity::Info => write!(f, "info"),
      Severity::Minor => write!(f, "minor"),
      Severity::Warning => write!(f, "warning"),
      Severity::Error => write!(f, "error"),
    }
  }
}
