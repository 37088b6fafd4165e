//! Tests for [SummarizeStep].

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{SUMMARIZE, SummarizeStep};
use crate::engine::Step;
use crate::recommend::{RecommendError, RecommendationCache, Recommender};
use crate::types::{AnalysisRecord, ModelConfig, RepoSource, Severity};

/// Recommender returning fixed lines and counting its invocations.
struct CountingRecommender {
  calls: AtomicUsize,
  lines: Vec<String>,
}

impl CountingRecommender {
  fn new(lines: &[&str]) -> Self {
    Self {
      calls: AtomicUsize::new(0),
      lines: lines.iter().map(|s| s.to_string()).collect(),
    }
  }

  fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl Recommender for CountingRecommender {
  async fn recommend(
    &self,
    _top_issues: &[String],
    _config: &ModelConfig,
  ) -> Result<Vec<String>, RecommendError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Ok(self.lines.clone())
  }
}

/// Recommender that always fails.
struct BrokenRecommender;

#[async_trait]
impl Recommender for BrokenRecommender {
  async fn recommend(
    &self,
    _top_issues: &[String],
    _config: &ModelConfig,
  ) -> Result<Vec<String>, RecommendError> {
    Err(RecommendError::MalformedResponse)
  }
}

fn record(use_cache: bool) -> AnalysisRecord {
  let mut record = AnalysisRecord::new(
    RepoSource::Local {
      path: PathBuf::from("/tmp/repo"),
    },
    None,
    ModelConfig::default(),
    use_cache,
  );
  record.is_valid = true;
  record
}

fn scored_record(use_cache: bool) -> AnalysisRecord {
  let mut record = record(use_cache);
  record.scores.insert("code_quality".to_string(), 8.0);
  record.scores.insert("security".to_string(), 6.0);
  record.scores.insert("documentation".to_string(), 7.0);
  record
}

#[tokio::test]
async fn overall_is_the_mean_of_category_scores() {
  let recommender = Arc::new(CountingRecommender::new(&["r1"]));
  let step = SummarizeStep::new(RecommendationCache::new(), recommender);
  let record = step.apply(scored_record(true)).await;
  assert_eq!(record.scores.get("overall"), Some(&7.0));
}

#[tokio::test]
async fn overall_is_zero_without_category_scores() {
  let recommender = Arc::new(CountingRecommender::new(&["r1"]));
  let step = SummarizeStep::new(RecommendationCache::new(), recommender);
  let record = step.apply(record(true)).await;
  assert_eq!(record.scores.get("overall"), Some(&0.0));
}

#[tokio::test]
async fn fresh_run_calls_the_recommender_and_populates_the_cache() {
  let cache = RecommendationCache::new();
  let recommender = Arc::new(CountingRecommender::new(&["add tests", "add docs"]));
  let step = SummarizeStep::new(cache.clone(), recommender.clone());

  let mut input = scored_record(true);
  input.push_issue("an issue", Severity::Warning);
  let record = step.apply(input).await;

  assert_eq!(recommender.calls(), 1);
  assert_eq!(record.recommendations, vec!["add tests", "add docs"]);
  assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn cache_hit_skips_the_recommender_and_still_sets_overall() {
  let cache = RecommendationCache::new();
  let recommender = Arc::new(CountingRecommender::new(&["fresh"]));
  let step = SummarizeStep::new(cache.clone(), recommender.clone());

  // Same issue multiset, different order across the two runs.
  let mut first = scored_record(true);
  first.push_issue("b", Severity::Minor);
  first.push_issue("a", Severity::Minor);
  let first = step.apply(first).await;

  let mut second = scored_record(true);
  second.push_issue("a", Severity::Minor);
  second.push_issue("b", Severity::Minor);
  let second = step.apply(second).await;

  assert_eq!(recommender.calls(), 1);
  assert_eq!(first.recommendations, second.recommendations);
  assert_eq!(second.scores.get("overall"), Some(&7.0));
}

#[tokio::test]
async fn cache_is_bypassed_when_disabled() {
  let cache = RecommendationCache::new();
  let recommender = Arc::new(CountingRecommender::new(&["fresh"]));
  let step = SummarizeStep::new(cache.clone(), recommender.clone());

  let first = step.apply(scored_record(false)).await;
  let second = step.apply(scored_record(false)).await;

  assert_eq!(recommender.calls(), 2);
  assert!(cache.is_empty());
  assert_eq!(first.recommendations, second.recommendations);
}

#[tokio::test]
async fn recommendations_are_bounded_to_five() {
  let recommender = Arc::new(CountingRecommender::new(&[
    "1", "2", "3", "4", "5", "6", "7",
  ]));
  let step = SummarizeStep::new(RecommendationCache::new(), recommender);
  let record = step.apply(scored_record(true)).await;
  assert_eq!(record.recommendations.len(), 5);
}

#[tokio::test]
async fn recommender_failure_becomes_a_severity_three_issue() {
  let cache = RecommendationCache::new();
  let step = SummarizeStep::new(cache.clone(), Arc::new(BrokenRecommender));
  let record = step.apply(scored_record(true)).await;

  assert!(record.recommendations.is_empty());
  assert!(cache.is_empty());
  let last = record.issues.last().unwrap();
  assert_eq!(last.severity, Severity::Error);
  assert!(last.message.starts_with("Failed to generate recommendations:"));
  // Overall is still computed on the failure path.
  assert_eq!(record.scores.get("overall"), Some(&7.0));
}

#[tokio::test]
async fn invalid_record_skips_generation_entirely() {
  let recommender = Arc::new(CountingRecommender::new(&["nope"]));
  let step = SummarizeStep::new(RecommendationCache::new(), recommender.clone());
  let mut input = scored_record(true);
  input.invalidate();
  let record = step.apply(input).await;

  assert_eq!(recommender.calls(), 0);
  assert!(record.recommendations.is_empty());
  assert_eq!(
    record.issues.last().unwrap().message,
    "Skipping summary due to invalid repo"
  );
}

#[tokio::test]
async fn step_id_matches_the_wiring_constant() {
  let step = SummarizeStep::new(
    RecommendationCache::new(),
    Arc::new(CountingRecommender::new(&[])),
  );
  assert_eq!(step.id(), SUMMARIZE);
}
