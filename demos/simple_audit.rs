//! Run a simple audit over the current directory with a canned
//! recommendation backend (no API key needed).

use std::sync::Arc;

use async_trait::async_trait;
use repoaudit::recommend::{RecommendError, RecommendationCache, Recommender};
use repoaudit::types::ModelConfig;
use repoaudit::{AuditRequest, Collaborators, run_audit};

struct CannedRecommender;

#[async_trait]
impl Recommender for CannedRecommender {
  async fn recommend(
    &self,
    top_issues: &[String],
    _config: &ModelConfig,
  ) -> Result<Vec<String>, RecommendError> {
    Ok(
      top_issues
        .iter()
        .map(|issue| format!("Address: {}", issue))
        .collect(),
    )
  }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  let mut collaborators = Collaborators::production();
  collaborators.recommender = Arc::new(CannedRecommender);

  let request = AuditRequest {
    path: Some(".".to_string()),
    ..AuditRequest::default()
  };

  let report = run_audit(request, collaborators, RecommendationCache::new()).await?;

  println!("Audit completed.");
  println!("  Overall score: {:.1}", report.overall_score);
  for (category, score) in &report.categories {
    println!("  {}: {:.1}", category, score);
  }
  println!("  Issues: {}", report.issues.len());
  for recommendation in &report.recommendations {
    println!("  -> {}", recommendation);
  }
  Ok(())
}
