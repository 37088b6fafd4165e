//! The uniform contract every pipeline step satisfies.

use async_trait::async_trait;

use crate::types::AnalysisRecord;

/// One named unit of work in the audit pipeline.
///
/// A step receives the analysis record, rewrites it, and returns it. Steps
/// are total: internal failures are recorded as issues on the record, never
/// surfaced to the engine. A step invoked with `is_valid == false` must set
/// its score (if it owns one) to the sentinel 0, append one explanatory
/// warning issue, and do no real work.
#[async_trait]
pub trait Step: Send + Sync {
  /// Stable step id used for wiring and routing.
  fn id(&self) -> &str;

  /// Executes the step against the record.
  async fn apply(&self, record: AnalysisRecord) -> AnalysisRecord;
}
