//! HTTP-to-gRPC gateway edge.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request     ┌──────────────────────────────────────────────┐
//!     ───────────────────┼─▶ prefix guard ─▶ CORS ─▶ header matcher ───┼──▶ gRPC metadata
//!                        │                                              │
//!     Client Response    │                                              │
//!     ◀──────────────────┼── CORS headers ◀─ metadata → headers ◀──────┼─── gRPC metadata
//!                        └──────────────────────────────────────────────┘
//! ```
//!
//! Without an upstream attached, the binary serves the metadata echo
//! service so the header mapping can be inspected with plain HTTP.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use grpc_http_gateway::config::{load_config, validate_config, ConfigError, GatewayConfig};
use grpc_http_gateway::http::server::{metadata_echo_service, shutdown_signal};
use grpc_http_gateway::http::HttpServer;
use grpc_http_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "grpc-http-gateway")]
#[command(about = "HTTP to gRPC gateway edge", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability.log_level);

    tracing::info!("grpc-http-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        allow_origin = %config.proxy.allow_origin,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let server = HttpServer::new(config, metadata_echo_service())?;
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
