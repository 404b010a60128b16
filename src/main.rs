//! Endpoint relay.
//!
//! A small HTTP relay for browser dashboards, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                ENDPOINT RELAY                 │
//!   Browser           │                                              │
//!   ─────────────────▶│  CORS ─▶ POST /check ─▶ target::reconcile ───┼──HEAD──▶ endpoint
//!                     │       └▶ GET /get-icon ─▶ target::favicon ───┼──GET───▶ site/favicon.ico
//!   ◀─────────────────│  JSON status  /  streamed image bytes        │
//!                     │                                              │
//!                     │  config · observability · lifecycle          │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use endpoint_relay::config::{load_config, validation::validate_config, RelayConfig};
use endpoint_relay::lifecycle::{shutdown_signal, Shutdown};
use endpoint_relay::observability::{logging, metrics};
use endpoint_relay::HttpServer;

#[derive(Parser)]
#[command(name = "endpoint-relay", version)]
#[command(about = "Relay endpoint status checks and favicon fetches for browser clients")]
struct Args {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overriding the configuration.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(endpoint_relay::config::ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability);

    tracing::info!("endpoint-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        check_timeout_secs = config.timeouts.check_secs,
        icon_timeout_secs = config.timeouts.icon_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
