//! CLI: Run a tech-debt audit over a repository.
//!
//! Usage: `run_audit [OPTIONS] --url <URL> | --path <PATH>`
//! Example: run_audit --path . --optimization fast
//!
//! The report is printed to stdout as JSON and optionally written to a file
//! with --output.
//!
//! Set RUST_LOG=repoaudit=trace for TRACE-level span enter/exit and events.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use repoaudit::recommend::RecommendationCache;
use repoaudit::types::OptimizationLevel;
use repoaudit::{AuditRequest, Collaborators, report_io, run_audit};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Run a tech-debt audit over a repository.
///
/// Environment variables (see --help for GITHUB_TOKEN and OPENAI_API_KEY).
#[derive(Parser, Debug)]
#[command(name = "run_audit")]
#[command(
  after_help = r#"Environment variables:
  GITHUB_TOKEN     Access token for cloning remote repositories (fallback for --token).
  OPENAI_API_KEY   API key for the recommendation backend.
  OPENAI_BASE_URL  Override the recommendation API base URL.

Examples:
  run_audit --url https://github.com/owner/repo
  run_audit --path . --optimization detailed --output audit-report.json"#
)]
struct Args {
  /// Remote repository URL (takes precedence over --path)
  #[arg(long, value_name = "URL")]
  url: Option<String>,

  /// Local repository path
  #[arg(long, value_name = "PATH")]
  path: Option<String>,

  /// Access token for authenticated remote fetch. Falls back to GITHUB_TOKEN.
  #[arg(long, env = "GITHUB_TOKEN", value_name = "TOKEN", hide_env_values = true)]
  token: Option<String>,

  /// Optimization level for recommendation generation
  #[arg(long, value_enum, default_value = "balanced")]
  optimization: OptimizationLevel,

  /// Also write the JSON report to this file
  #[arg(long, value_name = "FILE")]
  output: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
    .init();

  info!("run_audit starting");
  let args = Args::parse();

  let request = AuditRequest {
    url: args.url,
    path: args.path,
    token: args.token,
    optimization: Some(args.optimization),
  };

  let report = match run_audit(
    request,
    Collaborators::production(),
    RecommendationCache::new(),
  )
  .await
  {
    Ok(report) => report,
    Err(e) => {
      eprintln!("Audit error: {}", e);
      process::exit(1);
    }
  };

  let json = match serde_json::to_string_pretty(&report) {
    Ok(json) => json,
    Err(e) => {
      eprintln!("Error serializing report: {}", e);
      process::exit(1);
    }
  };
  println!("{}", json);

  if let Some(output) = args.output {
    if let Err(e) = report_io::save_report(&output, &report) {
      eprintln!("Error writing {}: {}", output.display(), e);
      process::exit(1);
    }
    info!(path = %output.display(), "report written");
  }
}
