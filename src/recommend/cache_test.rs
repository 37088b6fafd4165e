//! Tests for [RecommendationCache].

use super::RecommendationCache;

fn messages(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn round_trips_a_recommendation_list() {
  let cache = RecommendationCache::new();
  let key = messages(&["a", "b"]);
  cache.insert(&key, vec!["do something".to_string()]);
  assert_eq!(cache.get(&key), Some(vec!["do something".to_string()]));
}

#[test]
fn key_is_order_insensitive() {
  let cache = RecommendationCache::new();
  cache.insert(&messages(&["b", "a", "c"]), vec!["r".to_string()]);
  assert!(cache.get(&messages(&["c", "b", "a"])).is_some());
  assert!(cache.get(&messages(&["a", "b", "c"])).is_some());
  assert_eq!(cache.len(), 1);
}

#[test]
fn key_is_duplicate_sensitive() {
  let cache = RecommendationCache::new();
  cache.insert(&messages(&["a", "a"]), vec!["r".to_string()]);
  assert!(cache.get(&messages(&["a"])).is_none());
  assert!(cache.get(&messages(&["a", "a"])).is_some());
}

#[test]
fn differing_multisets_miss() {
  let cache = RecommendationCache::new();
  cache.insert(&messages(&["a"]), vec!["r".to_string()]);
  assert!(cache.get(&messages(&["b"])).is_none());
}

#[test]
fn clones_share_the_underlying_map() {
  let cache = RecommendationCache::new();
  let alias = cache.clone();
  alias.insert(&messages(&["a"]), vec!["r".to_string()]);
  assert_eq!(cache.len(), 1);
  assert!(!cache.is_empty());
}

#[test]
fn concurrent_inserts_do_not_corrupt_the_map() {
  let cache = RecommendationCache::new();
  let handles: Vec<_> = (0..8)
    .map(|i| {
      let cache = cache.clone();
      std::thread::spawn(move || {
        cache.insert(
          &[format!("issue-{}", i)],
          vec![format!("recommendation-{}", i)],
        );
      })
    })
    .collect();
  for handle in handles {
    handle.join().unwrap();
  }
  assert_eq!(cache.len(), 8);
}
