//! Repository fetch collaborator: clone a remote repository or validate a
//! local path.

use std::path::PathBuf;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{info, instrument};

use crate::types::{RepoSource, ScratchDir};

/// Prefix for temporary clone directories.
const SCRATCH_PREFIX: &str = "repoaudit_repo_";

static GITHUB_URL_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^https?://github\.com/[\w.-]+/[\w.-]+(\.git)?/?$").expect("static pattern")
});

/// Successful fetch: where the repository lives, plus the scratch directory
/// when one was created for a clone.
#[derive(Debug)]
pub struct Fetched {
  pub working_path: PathBuf,
  pub scratch: Option<ScratchDir>,
}

/// Fetch failure. `CloneFailed` surrenders the scratch handle so the caller
/// can attach it to the record for the cleanup step to release.
#[derive(Debug, Error)]
pub enum FetchError {
  #[error("Invalid GitHub repository URL")]
  InvalidUrl,
  #[error("GitHub token not provided")]
  MissingToken,
  #[error("Repository path {0} does not exist")]
  MissingPath(String),
  #[error("Failed to clone repository: {stderr}")]
  CloneFailed {
    stderr: String,
    scratch: Option<ScratchDir>,
  },
  #[error(transparent)]
  Io(#[from] std::io::Error),
}

/// Fetch collaborator consumed by the fetch step.
#[async_trait]
pub trait RepoFetcher: Send + Sync {
  async fn fetch(&self, source: &RepoSource, token: Option<&str>) -> Result<Fetched, FetchError>;
}

/// Production fetcher: shallow `git clone` for remote URLs, existence check
/// for local paths.
#[derive(Debug, Default)]
pub struct GitFetcher;

impl GitFetcher {
  pub fn new() -> Self {
    Self
  }

  #[instrument(level = "trace", skip(self, token))]
  async fn clone_remote(&self, url: &str, token: Option<&str>) -> Result<Fetched, FetchError> {
    if !GITHUB_URL_RE.is_match(url) {
      return Err(FetchError::InvalidUrl);
    }
    let token = match token {
      Some(t) if !t.is_empty() => t,
      _ => return Err(FetchError::MissingToken),
    };

    let scratch = ScratchDir::create(SCRATCH_PREFIX)?;
    let auth_url = url.replacen("https://", &format!("https://{}@", token), 1);

    let output = tokio::process::Command::new("git")
      .args(["clone", "--depth", "1", auth_url.as_str()])
      .arg(scratch.path())
      .output()
      .await;

    match output {
      Ok(out) if out.status.success() => {
        info!(url = %url, path = %scratch.path().display(), "repository cloned");
        Ok(Fetched {
          working_path: scratch.path().to_path_buf(),
          scratch: Some(scratch),
        })
      }
      Ok(out) => Err(FetchError::CloneFailed {
        stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        scratch: Some(scratch),
      }),
      Err(e) => Err(FetchError::CloneFailed {
        stderr: e.to_string(),
        scratch: Some(scratch),
      }),
    }
  }
}

#[async_trait]
impl RepoFetcher for GitFetcher {
  #[instrument(level = "trace", skip(self, token), fields(source = %source))]
  async fn fetch(&self, source: &RepoSource, token: Option<&str>) -> Result<Fetched, FetchError> {
    match source {
      RepoSource::Remote { url } => self.clone_remote(url, token).await,
      RepoSource::Local { path } => {
        if !path.exists() {
          return Err(FetchError::MissingPath(path.display().to_string()));
        }
        Ok(Fetched {
          working_path: path.clone(),
          scratch: None,
        })
      }
    }
  }
}
