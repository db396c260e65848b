pub mod handlers;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::PartialConfig;

#[derive(Debug, Parser)]
#[command(name = "bookcheck")]
#[command(version, about = "Add, fetch and delete generated books against the Library API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one create -> retrieve -> delete session
    Run(RunArgs),
    /// Print generated records without calling the API
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Config file (defaults to ./bookcheck.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Library API base URL
    #[arg(long)]
    pub base_url: Option<String>,
    /// Number of books to create
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
    /// Creates in flight at once
    #[arg(long)]
    pub concurrency: Option<usize>,
    /// Per-request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
    /// Print the session report as JSON
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    #[must_use]
    pub fn overrides(&self) -> PartialConfig {
        PartialConfig {
            base_url: self.base_url.clone(),
            record_count: self.count,
            create_concurrency: self.concurrency,
            timeout_ms: self.timeout_ms,
        }
    }
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Config file (defaults to ./bookcheck.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Number of records
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}

/// Initialize tracing subscriber for logging
///
/// Configures the tracing subscriber with:
/// - Environment filter (defaults to INFO level)
/// - Stderr output (to avoid mixing with stdout)
///
/// # Errors
/// Returns an error if the subscriber initialization fails
pub fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_flags_become_overrides() -> Result<()> {
        let cli = Cli::try_parse_from([
            "bookcheck",
            "run",
            "--base-url",
            "http://localhost:3000",
            "-n",
            "4",
            "--concurrency",
            "2",
        ])?;
        let Commands::Run(args) = cli.command else {
            anyhow::bail!("expected run subcommand");
        };
        assert_eq!(
            args.overrides(),
            PartialConfig {
                base_url: Some("http://localhost:3000".to_string()),
                record_count: Some(4),
                create_concurrency: Some(2),
                timeout_ms: None,
            }
        );
        Ok(())
    }
}
