//! Summarize step: top-issue selection, recommendation generation with
//! caching, and the overall score.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument, warn};

use super::SUMMARIZE;
use crate::engine::Step;
use crate::recommend::{RecommendationCache, Recommender};
use crate::types::{AnalysisRecord, Severity, top_issues};

/// How many issues are handed to the recommender, and the bound on the
/// recommendations kept.
const TOP_ISSUE_COUNT: usize = 5;
const MAX_RECOMMENDATIONS: usize = 5;

/// Derives recommendations from the recorded issues and computes the overall
/// score as the mean of the populated category scores.
pub struct SummarizeStep {
  cache: RecommendationCache,
  recommender: Arc<dyn Recommender>,
}

impl SummarizeStep {
  pub fn new(cache: RecommendationCache, recommender: Arc<dyn Recommender>) -> Self {
    Self { cache, recommender }
  }
}

/// Arithmetic mean of the category scores, 0 when none are populated.
fn overall_score(record: &AnalysisRecord) -> f64 {
  let categories: Vec<f64> = record
    .scores
    .iter()
    .filter(|(key, _)| key.as_str() != "overall")
    .map(|(_, score)| *score)
    .collect();
  if categories.is_empty() {
    return 0.0;
  }
  categories.iter().sum::<f64>() / categories.len() as f64
}

#[async_trait]
impl Step for SummarizeStep {
  fn id(&self) -> &str {
    SUMMARIZE
  }

  #[instrument(level = "trace", skip(self, record), fields(run_id = %record.run_id))]
  async fn apply(&self, mut record: AnalysisRecord) -> AnalysisRecord {
    if !record.is_valid {
      warn!("skipping summary, repository unavailable");
      record.push_issue("Skipping summary due to invalid repo", Severity::Warning);
      let overall = overall_score(&record);
      record.scores.insert("overall".to_string(), overall);
      return record;
    }

    let messages = record.issue_messages();

    let cached = if record.use_cache {
      self.cache.get(&messages)
    } else {
      None
    };

    match cached {
      Some(recommendations) => {
        info!("using cached recommendations");
        record.recommendations = recommendations;
      }
      None => {
        let top = top_issues(&record.issues, TOP_ISSUE_COUNT);
        match self.recommender.recommend(&top, &record.model_config).await {
          Ok(mut recommendations) => {
            recommendations.truncate(MAX_RECOMMENDATIONS);
            if record.use_cache {
              self.cache.insert(&messages, recommendations.clone());
            }
            record.recommendations = recommendations;
          }
          Err(e) => {
            error!(error = %e, "recommendation generation failed");
            record.push_issue(
              format!("Failed to generate recommendations: {}", e),
              Severity::Error,
            );
          }
        }
      }
    }

    let overall = overall_score(&record);
    record.scores.insert("overall".to_string(), overall);
    info!(overall, "summary complete");
    record
  }
}
