//! Cleanup step: release the scratch directory on every pipeline path.

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use super::CLEANUP;
use crate::engine::Step;
use crate::types::AnalysisRecord;

/// Terminal step. Releases the scratch directory when one was acquired and
/// clears the handle. A release failure is logged and otherwise ignored; the
/// result of the run is unaffected.
#[derive(Debug, Default)]
pub struct CleanupStep;

impl CleanupStep {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl Step for CleanupStep {
  fn id(&self) -> &str {
    CLEANUP
  }

  #[instrument(level = "trace", skip(self, record), fields(run_id = %record.run_id))]
  async fn apply(&self, mut record: AnalysisRecord) -> AnalysisRecord {
    if let Some(mut scratch) = record.scratch.take() {
      match scratch.release() {
        Ok(()) => info!(path = %scratch.path().display(), "scratch directory released"),
        Err(e) => {
          warn!(path = %scratch.path().display(), error = %e, "failed to release scratch directory");
        }
      }
    }
    record
  }
}
