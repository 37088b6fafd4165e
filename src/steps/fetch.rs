//! Fetch step: materialize the repository and record its structure.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};

use super::FETCH;
use crate::engine::Step;
use crate::fetcher::{FetchError, RepoFetcher};
use crate::types::{AnalysisRecord, RepoStructure, SOURCE_EXTENSIONS, Severity};

/// Entry step: resolves the repository source into a working path, marks the
/// record valid and records a structural summary. Every failure becomes a
/// severity-3 issue and leaves the record invalid, which routes the pipeline
/// straight to cleanup.
pub struct FetchStep {
  fetcher: Arc<dyn RepoFetcher>,
}

impl FetchStep {
  pub fn new(fetcher: Arc<dyn RepoFetcher>) -> Self {
    Self { fetcher }
  }
}

/// Lists top-level source files (sorted) and the README flag.
pub(crate) fn scan_structure(path: &Path) -> io::Result<RepoStructure> {
  let mut files: Vec<String> = Vec::new();
  for entry in std::fs::read_dir(path)? {
    let entry = entry?;
    if !entry.file_type()?.is_file() {
      continue;
    }
    let name = entry.file_name().to_string_lossy().to_string();
    let is_source = name
      .rsplit_once('.')
      .is_some_and(|(_, ext)| SOURCE_EXTENSIONS.contains(&ext));
    if is_source {
      files.push(name);
    }
  }
  files.sort();
  Ok(RepoStructure {
    files,
    readme: path.join("README.md").exists(),
  })
}

#[async_trait]
impl Step for FetchStep {
  fn id(&self) -> &str {
    FETCH
  }

  #[instrument(level = "trace", skip(self, record), fields(run_id = %record.run_id, source = %record.source))]
  async fn apply(&self, mut record: AnalysisRecord) -> AnalysisRecord {
    record.set_repo_structure(&RepoStructure::default());

    let token = record.access_token.clone();
    match self.fetcher.fetch(&record.source, token.as_deref()).await {
      Ok(fetched) => {
        record.working_path = Some(fetched.working_path.clone());
        record.scratch = fetched.scratch;
        record.is_valid = true;

        match scan_structure(&fetched.working_path) {
          Ok(structure) => {
            info!(files = structure.files.len(), readme = structure.readme, "repository fetched");
            record.set_repo_structure(&structure);
          }
          Err(e) => {
            error!(error = %e, "repository structure scan failed");
            record.push_issue(
              format!("Failed to analyze repo structure: {}", e),
              Severity::Error,
            );
            record.invalidate();
          }
        }
      }
      Err(e) => {
        error!(error = %e, "repository fetch failed");
        let message = e.to_string();
        // A failed clone may have created the scratch directory already;
        // keep the handle so cleanup can release it.
        if let FetchError::CloneFailed { scratch, .. } = e {
          record.scratch = scratch;
        }
        record.push_issue(message, Severity::Error);
        record.invalidate();
      }
    }
    record
  }
}
