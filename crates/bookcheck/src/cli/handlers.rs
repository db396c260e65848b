use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use bookcheck_core::generate;

use super::{Cli, Commands, GenerateArgs, RunArgs};
use crate::{
    config::{load_config, PartialConfig},
    executors::ExecutionContext,
    report::SessionReport,
    reporter::TracingReporter,
    session::Session,
    transport::HttpTransport,
};

pub async fn dispatch(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Run(args) => handle_run(&args).await,
        Commands::Generate(args) => handle_generate(&args).await,
    }
}

async fn handle_run(args: &RunArgs) -> Result<ExitCode> {
    let config = load_config(args.config.as_deref(), args.overrides())
        .await
        .context("Failed to load configuration")?;
    let transport = HttpTransport::new(&config.base_url, config.timeout())
        .context("Failed to create HTTP transport")?;
    tracing::info!(
        base_url = %transport.base_url(),
        records = config.record_count,
        "starting session"
    );

    let ctx = ExecutionContext::new(Arc::new(transport), Arc::new(TracingReporter));
    let session = Session::new(ctx, config.session_options());
    let report = session.run().await.context("Failed to generate records")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn handle_generate(args: &GenerateArgs) -> Result<ExitCode> {
    let overrides = PartialConfig {
        record_count: args.count,
        ..PartialConfig::default()
    };
    let config = load_config(args.config.as_deref(), overrides)
        .await
        .context("Failed to load configuration")?;
    let books = generate(config.record_count).context("Failed to generate records")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&books)?);
    } else {
        for book in &books {
            println!(
                "{}  {:<20}  {:<28}  {}",
                book.code, book.category, book.title, book.author
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_summary(report: &SessionReport) {
    println!(
        "Session: {} records, {} identifiers captured",
        report.records,
        report.identifiers.len()
    );
    for phase in report.phases() {
        println!(
            "  {:<9} {:>3} passed  {:>3} failed",
            phase.phase.to_string(),
            phase.passed(),
            phase.failed()
        );
        for outcome in phase.outcomes.iter().filter(|o| !o.passed) {
            let error = outcome.error.as_deref().unwrap_or("failed");
            println!("    ✗ {}: {error}", outcome.subject);
        }
    }
}
