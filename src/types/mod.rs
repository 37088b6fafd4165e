//! Core data types threaded through the audit pipeline.

mod analysis_record;
mod issue;
mod model_config;
mod report;
mod repo_structure;
mod scratch_dir;
#[cfg(test)]
mod scratch_dir_test;
mod severity;

pub use analysis_record::{AnalysisRecord, REPO_STRUCTURE_KEY, RepoSource};
pub use issue::{Issue, top_issues};
pub use model_config::{ModelConfig, OptimizationLevel};
pub use repo_structure::{RepoStructure, SOURCE_EXTENSIONS};
pub use report::AuditReport;
pub use scratch_dir::ScratchDir;
pub use severity::Severity;
