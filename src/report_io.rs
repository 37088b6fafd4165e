//! Audit report save/load (JSON).

use std::path::Path;

use tracing::instrument;

use crate::types::AuditReport;

/// Saves a report to `path` as pretty JSON, creating parent directories.
#[instrument(level = "trace", skip(path, report))]
pub fn save_report(path: &Path, report: &AuditReport) -> Result<(), std::io::Error> {
  let json = serde_json::to_string_pretty(report)
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(path, json)
}

/// Loads a report from `path`. Returns an error if the file is missing or
/// not valid JSON.
#[instrument(level = "trace", skip(path))]
pub fn load_report(path: &Path) -> Result<AuditReport, std::io::Error> {
  let bytes = std::fs::read(path)?;
  serde_json::from_slice(&bytes)
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
