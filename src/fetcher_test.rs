//! Tests for [GitFetcher].

use std::path::PathBuf;

use super::fetcher::{FetchError, GitFetcher, RepoFetcher};
use crate::types::RepoSource;

#[tokio::test]
async fn local_path_resolves_in_place_without_scratch() {
  let dir = tempfile::tempdir().unwrap();
  let source = RepoSource::Local {
    path: dir.path().to_path_buf(),
  };
  let fetched = GitFetcher::new().fetch(&source, None).await.unwrap();
  assert_eq!(fetched.working_path, dir.path());
  assert!(fetched.scratch.is_none());
}

#[tokio::test]
async fn missing_local_path_is_an_input_error() {
  let source = RepoSource::Local {
    path: PathBuf::from("/definitely/not/here"),
  };
  let err = GitFetcher::new().fetch(&source, None).await.unwrap_err();
  assert!(matches!(err, FetchError::MissingPath(_)));
  assert!(err.to_string().contains("/definitely/not/here"));
}

#[tokio::test]
async fn malformed_url_is_rejected_before_any_clone() {
  let source = RepoSource::Remote {
    url: "ftp://example.com/repo".to_string(),
  };
  let err = GitFetcher::new()
    .fetch(&source, Some("token"))
    .await
    .unwrap_err();
  assert!(matches!(err, FetchError::InvalidUrl));
}

#[tokio::test]
async fn remote_url_without_token_is_rejected() {
  let source = RepoSource::Remote {
    url: "https://github.com/owner/repo".to_string(),
  };
  let err = GitFetcher::new().fetch(&source, None).await.unwrap_err();
  assert!(matches!(err, FetchError::MissingToken));
  assert_eq!(err.to_string(), "GitHub token not provided");

  let err = GitFetcher::new().fetch(&source, Some("")).await.unwrap_err();
  assert!(matches!(err, FetchError::MissingToken));
}

#[test]
fn url_pattern_accepts_common_github_shapes() {
  let fetch = |url: &str| RepoSource::Remote {
    url: url.to_string(),
  };
  // Only the validation branch is relevant; a clone of these would fail.
  for url in [
    "https://github.com/owner/repo",
    "https://github.com/owner/repo.git",
    "http://github.com/some-owner/some.repo",
  ] {
    let source = fetch(url);
    let err = tokio_test::block_on(GitFetcher::new().fetch(&source, None)).unwrap_err();
    // Token check comes after URL validation, so a valid URL fails on the token.
    assert!(matches!(err, FetchError::MissingToken), "url: {}", url);
  }
}
