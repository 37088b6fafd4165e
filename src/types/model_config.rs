//! Model selection for the recommendation backend.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Parameters for the external chat-completion backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
  pub model: String,
  pub temperature: f32,
}

impl ModelConfig {
  pub fn new(model: impl Into<String>) -> Self {
    Self {
      model: model.into(),
      temperature: 0.0,
    }
  }
}

impl Default for ModelConfig {
  fn default() -> Self {
    Self::new("gpt-3.5-turbo")
  }
}

/// Audit optimization level: trades recommendation quality against cache use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptimizationLevel {
  /// Cheapest model, cached recommendations.
  Fast,
  /// Default model, cached recommendations.
  Balanced,
  /// Strongest model, cache bypassed for fresh recommendations.
  Detailed,
}

impl OptimizationLevel {
  /// Resolves to a model configuration and a cache toggle.
  pub fn settings(self) -> (ModelConfig, bool) {
    match self {
      OptimizationLevel::Fast => (ModelConfig::new("gpt-3.5-turbo"), true),
      OptimizationLevel::Balanced => (ModelConfig::new("gpt-3.5-turbo"), true),
      OptimizationLevel::Detailed => (ModelConfig::new("gpt-4o"), false),
    }
  }
}
