use std::process::ExitCode;

use anyhow::Result;
use bookcheck::cli::{handlers::dispatch, init_tracing, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing()?;
    let cli = Cli::parse();
    dispatch(cli).await
}
