//! Chat-completion recommender: turns top issues into short recommendations
//! via an OpenAI-style API.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument};

use super::Recommender;
use crate::types::ModelConfig;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const SYSTEM_PROMPT: &str = "You are a tech debt analysis agent. Given the top issues of a \
repository, provide a list of short, actionable recommendations to improve it, one per line.";

/// Recommender failure; the summarize step downgrades this to an issue.
#[derive(Debug, Error)]
pub enum RecommendError {
  #[error("request failed: {0}")]
  Network(#[from] reqwest::Error),
  #[error("API error (status {status}): {body}")]
  Api { status: u16, body: String },
  #[error("malformed completion response")]
  MalformedResponse,
}

#[derive(Serialize)]
struct ChatMessage {
  role: &'static str,
  content: String,
}

#[derive(Serialize)]
struct ChatRequest {
  model: String,
  messages: Vec<ChatMessage>,
  temperature: f32,
}

/// Production recommender over an OpenAI-compatible chat-completions API.
pub struct ChatRecommender {
  client: reqwest::Client,
  base_url: String,
  api_key: String,
}

impl ChatRecommender {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      client: reqwest::Client::new(),
      base_url: DEFAULT_BASE_URL.to_string(),
      api_key: api_key.into(),
    }
  }

  /// Overrides the API base URL (e.g. for a proxy or a test server).
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  /// Builds a recommender from `OPENAI_API_KEY` and optional
  /// `OPENAI_BASE_URL`.
  pub fn from_env() -> Self {
    let recommender = Self::new(std::env::var("OPENAI_API_KEY").unwrap_or_default());
    match std::env::var("OPENAI_BASE_URL") {
      Ok(base) if !base.is_empty() => recommender.with_base_url(base),
      _ => recommender,
    }
  }

  fn request_body(&self, top_issues: &[String], config: &ModelConfig) -> ChatRequest {
    let listing = top_issues
      .iter()
      .map(|m| format!("- {}", m))
      .collect::<Vec<_>>()
      .join("\n");
    ChatRequest {
      model: config.model.clone(),
      messages: vec![
        ChatMessage {
          role: "system",
          content: SYSTEM_PROMPT.to_string(),
        },
        ChatMessage {
          role: "user",
          content: format!("Top issues:\n{}", listing),
        },
      ],
      temperature: config.temperature,
    }
  }
}

/// Splits completion text into trimmed recommendation lines, stripping list
/// markers.
pub(crate) fn parse_recommendations(content: &str) -> Vec<String> {
  content
    .lines()
    .map(|line| {
      line
        .trim()
        .trim_start_matches(['-', '*', '•'])
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .trim_start_matches(['.', ')'])
        .trim()
        .to_string()
    })
    .filter(|line| !line.is_empty())
    .collect()
}

#[async_trait]
impl Recommender for ChatRecommender {
  #[instrument(level = "trace", skip(self, top_issues, config), fields(model = %config.model))]
  async fn recommend(
    &self,
    top_issues: &[String],
    config: &ModelConfig,
  ) -> Result<Vec<String>, RecommendError> {
    let url = format!("{}/chat/completions", self.base_url);
    let response = self
      .client
      .post(&url)
      .bearer_auth(&self.api_key)
      .json(&self.request_body(top_issues, config))
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(RecommendError::Api {
        status: status.as_u16(),
        body,
      });
    }

    let json: serde_json::Value = response.json().await?;
    let content = json
      .get("choices")
      .and_then(|c| c.as_array())
      .and_then(|c| c.first())
      .and_then(|choice| choice.get("message"))
      .and_then(|message| message.get("content"))
      .and_then(|content| content.as_str())
      .ok_or(RecommendError::MalformedResponse)?;

    let recommendations = parse_recommendations(content);
    info!(count = recommendations.len(), "recommendations generated");
    Ok(recommendations)
  }
}
