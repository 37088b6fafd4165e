//! Process-wide cache of computed recommendation lists.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::instrument;

/// Shared recommendation cache, keyed by the multiset of issue messages.
///
/// The key is the lexicographically sorted message list: order-insensitive,
/// duplicate-sensitive. Cloning shares the underlying map; concurrent runs
/// may read and insert freely, and a race to populate the same key is
/// last-writer-wins (values for one key are expected to be equivalent).
/// There is no eviction; entries live for the hosting process.
#[derive(Clone, Default)]
pub struct RecommendationCache {
  inner: Arc<Mutex<HashMap<Vec<String>, Vec<String>>>>,
}

/// Sorted copy of the messages, the canonical cache key.
fn cache_key(messages: &[String]) -> Vec<String> {
  let mut key = messages.to_vec();
  key.sort();
  key
}

impl RecommendationCache {
  pub fn new() -> Self {
    Self::default()
  }

  fn lock(&self) -> MutexGuard<'_, HashMap<Vec<String>, Vec<String>>> {
    // A poisoned lock only means another run panicked mid-insert; the map
    // itself is still usable.
    match self.inner.lock() {
      Ok(guard) => guard,
      Err(poisoned) => poisoned.into_inner(),
    }
  }

  #[instrument(level = "trace", skip(self, messages))]
  pub fn get(&self, messages: &[String]) -> Option<Vec<String>> {
    self.lock().get(&cache_key(messages)).cloned()
  }

  #[instrument(level = "trace", skip(self, messages, recommendations))]
  pub fn insert(&self, messages: &[String], recommendations: Vec<String>) {
    self.lock().insert(cache_key(messages), recommendations);
  }

  pub fn len(&self) -> usize {
    self.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.lock().is_empty()
  }
}
