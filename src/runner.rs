//! Audit runner: precondition check, record construction, pipeline run and
//! result projection.

use thiserror::Error;
use tracing::{info, instrument};

use crate::engine::{GraphError, PipelineError};
use crate::graph::{Collaborators, audit_pipeline};
use crate::recommend::RecommendationCache;
use crate::types::{AnalysisRecord, AuditReport, OptimizationLevel, RepoSource};

/// One audit request as supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct AuditRequest {
  /// Remote repository URL; takes precedence over `path`.
  pub url: Option<String>,
  /// Local repository path.
  pub path: Option<String>,
  /// Access token for authenticated remote fetch.
  pub token: Option<String>,
  pub optimization: Option<OptimizationLevel>,
}

/// Top-level audit failure. Everything here is a caller or wiring error;
/// analysis failures are contained inside the pipeline and reported as
/// issues on the [AuditReport].
#[derive(Debug, Error)]
pub enum AuditError {
  #[error("either a repository URL or a local path must be provided")]
  MissingSource,
  #[error(transparent)]
  Graph(#[from] GraphError),
  #[error(transparent)]
  Pipeline(#[from] PipelineError),
}

/// Runs one audit end to end and projects the final record into a report.
///
/// The request precondition (some repository identity) is checked before any
/// record is created. The cache is shared across calls by handing the same
/// [RecommendationCache] clone to each one.
#[instrument(level = "trace", skip(request, collaborators, cache))]
pub async fn run_audit(
  request: AuditRequest,
  collaborators: Collaborators,
  cache: RecommendationCache,
) -> Result<AuditReport, AuditError> {
  let source = RepoSource::from_parts(request.url.as_deref(), request.path.as_deref())
    .ok_or(AuditError::MissingSource)?;
  let optimization = request.optimization.unwrap_or(OptimizationLevel::Balanced);
  let (model_config, use_cache) = optimization.settings();

  info!(source = %source, ?optimization, "starting audit");
  let record = AnalysisRecord::new(source, request.token, model_config, use_cache);

  let pipeline = audit_pipeline(collaborators, cache)?;
  let run = pipeline.run(record).await?;

  info!(completed_steps = ?run.completed_steps, "audit complete");
  Ok(AuditReport::from_record(&run.record))
}
