use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use twins::{spawn, LibraryState};

#[derive(Parser)]
#[command(name = "library-twin")]
#[command(about = "Serve an in-memory Library API for local bookcheck runs")]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (addr, handle) = spawn(cli.addr, LibraryState::new()).await?;
    tracing::info!(%addr, "library twin listening");

    tokio::select! {
        _ = handle => {}
        _ = tokio::signal::ctrl_c() => tracing::info!("shutting down"),
    }
    Ok(())
}
