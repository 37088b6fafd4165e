//! Concrete pipeline steps wired by the audit pipeline definition.

mod analyzer_step;
mod cleanup;
mod fetch;
mod summarize;
#[cfg(test)]
mod summarize_test;

pub use analyzer_step::AnalyzerStep;
pub use cleanup::CleanupStep;
pub use fetch::FetchStep;
pub use summarize::SummarizeStep;

/// Step ids, also the category keys for the analyzer steps.
pub const FETCH: &str = "fetch";
pub const CODE_QUALITY: &str = "code_quality";
pub const SECURITY: &str = "security";
pub const DOCUMENTATION: &str = "documentation";
pub const SUMMARIZE: &str = "summarize";
pub const CLEANUP: &str = "cleanup";
