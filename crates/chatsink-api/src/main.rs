//! Chatsink REST API entry point.
//!
//! Binary name: `chatsink`
//!
//! Parses CLI arguments, initializes the database and ingestion service,
//! then serves the REST API.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use chatsink_api::http::router::build_router;
use chatsink_api::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "chatsink", about = "Batch chat-message ingestion service")]
struct Cli {
    /// Address to bind the HTTP server to.
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: SocketAddr,

    /// Data directory (database + config.toml). Defaults to
    /// $CHATSINK_DATA_DIR, then ~/.chatsink.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Export spans via OpenTelemetry (stdout exporter).
    #[arg(long)]
    otel: bool,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,chatsink=debug",
        _ => "trace",
    };
    chatsink_observe::tracing_setup::init_tracing(cli.otel, filter)
        .map_err(|e| anyhow::anyhow!("tracing init: {e}"))?;

    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| PathBuf::from(chatsink_infra::sqlite::pool::default_data_dir()));

    let state = AppState::init(&data_dir).await?;
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(cli.listen).await?;
    tracing::info!(addr = %cli.listen, "chatsink listening");

    axum::serve(listener, router).await?;

    chatsink_observe::tracing_setup::shutdown_tracing();
    Ok(())
}
