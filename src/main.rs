//! `rag-gateway` server binary.

use clap::Parser;
use std::path::PathBuf;

use rag_gateway::lifecycle::{signals, startup, Shutdown};
use rag_gateway::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "rag-gateway")]
#[command(about = "Query gateway in front of a RAG backend", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = startup::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability.log_level);
    tracing::info!("rag-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        forward_ms = config.timeouts.forward_ms,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    let server = startup::build_server(config)?;
    let listener = startup::bind(server.config()).await?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
