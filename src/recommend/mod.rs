//! Recommendation generation: the text-generation collaborator and the
//! process-wide cache in front of it.

use async_trait::async_trait;

use crate::types::ModelConfig;

mod cache;
#[cfg(test)]
mod cache_test;
mod chat;

pub use cache::RecommendationCache;
pub use chat::{ChatRecommender, RecommendError};

/// Text-generation collaborator consumed by the summarize step.
#[async_trait]
pub trait Recommender: Send + Sync {
  /// Produces short recommendation strings for the given top issues.
  async fn recommend(
    &self,
    top_issues: &[String],
    config: &ModelConfig,
  ) -> Result<Vec<String>, RecommendError>;
}
