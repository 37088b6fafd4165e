//! Build the audit pipeline: the fixed step topology for one repository
//! analysis run.

use std::sync::Arc;

use crate::analyzers::{Analyzer, DocsAnalyzer, LintAnalyzer, SecurityScanAnalyzer};
use crate::engine::{GraphError, Pipeline};
use crate::fetcher::{GitFetcher, RepoFetcher};
use crate::recommend::{ChatRecommender, RecommendationCache, Recommender};
use crate::steps::{
  AnalyzerStep, CLEANUP, CODE_QUALITY, CleanupStep, DOCUMENTATION, FETCH, FetchStep, SECURITY,
  SUMMARIZE, SummarizeStep,
};
use crate::types::AnalysisRecord;

/// The collaborator set behind the pipeline steps. Swappable for tests.
pub struct Collaborators {
  pub fetcher: Arc<dyn RepoFetcher>,
  pub code_quality: Arc<dyn Analyzer>,
  pub security: Arc<dyn Analyzer>,
  pub documentation: Arc<dyn Analyzer>,
  pub recommender: Arc<dyn Recommender>,
}

impl Collaborators {
  /// Production collaborators: git fetch, the built-in analyzers and the
  /// chat recommender configured from the environment.
  pub fn production() -> Self {
    Self {
      fetcher: Arc::new(GitFetcher::new()),
      code_quality: Arc::new(LintAnalyzer::new()),
      security: Arc::new(SecurityScanAnalyzer::new()),
      documentation: Arc::new(DocsAnalyzer::new()),
      recommender: Arc::new(ChatRecommender::from_env()),
    }
  }
}

/// Routing predicate for the fetch branch, evaluated on the post-fetch
/// record.
pub fn repo_is_valid(record: &AnalysisRecord) -> bool {
  record.is_valid
}

/// Wires the audit pipeline:
///
/// ```text
/// fetch --(valid)--> code_quality -> security -> documentation -> summarize -> cleanup
/// fetch --(invalid)-------------------------------------------------------^
/// ```
///
/// Cleanup is the terminal step and runs on both branches.
pub fn audit_pipeline(
  collaborators: Collaborators,
  cache: RecommendationCache,
) -> Result<Pipeline, GraphError> {
  Pipeline::builder()
    .step(FetchStep::new(collaborators.fetcher))
    .step(AnalyzerStep::code_quality(collaborators.code_quality))
    .step(AnalyzerStep::security(collaborators.security))
    .step(AnalyzerStep::documentation(collaborators.documentation))
    .step(SummarizeStep::new(cache, collaborators.recommender))
    .step(CleanupStep::new())
    .entry(FETCH)
    .conditional_edge(FETCH, repo_is_valid, CODE_QUALITY, CLEANUP)
    .edge(CODE_QUALITY, SECURITY)
    .edge(SECURITY, DOCUMENTATION)
    .edge(DOCUMENTATION, SUMMARIZE)
    .edge(SUMMARIZE, CLEANUP)
    .terminal(CLEANUP)
    .build()
}
