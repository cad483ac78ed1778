//! HTTP server for the Timesheet Payroll Engine.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use timesheet_payroll::api::{AppState, create_router};
use timesheet_payroll::config::ConfigLoader;

/// Serves monthly timesheet and overtime payroll reports over HTTP.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory containing payroll.yaml
    #[arg(long, env = "PAYROLL_CONFIG", default_value = "./config")]
    config: PathBuf,

    /// Address to listen on
    #[arg(long, env = "PAYROLL_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_line_number(true)
        .init();

    let args = Args::parse();

    let config = ConfigLoader::load(&args.config)?;
    let router = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!(address = %args.bind, config = %args.config.display(), "Listening");

    axum::serve(listener, router).await?;
    Ok(())
}
