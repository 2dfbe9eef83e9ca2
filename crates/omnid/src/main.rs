//! omnid - OmniChain Gateway Daemon
//!
//! Serves a unified store view assembled from the partner marketplace
//! (REST), the procurement service (SOAP) and warehouse automation (gRPC).
//!
//! Usage:
//!   omnid [OPTIONS] [config.toml]
//!
//! If no config file is provided, the built-in two-store demo directory is
//! served against the localhost demo backends.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use omni_api::{create_router, AppState};
use omni_connectors::{InventoryConnector, OrdersConnector, TelemetryConnector};
use omni_gateway::{Aggregator, QueryService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::DaemonConfig;

const DEFAULT_LOG_FILTER: &str = "omnid=info,omni_gateway=info,omni_connectors=info,omni_api=info";

/// Parsed command-line arguments
struct Args {
    /// Daemon config file (TOML)
    config_path: Option<String>,
    /// Overrides `[server] port`
    port: Option<u16>,
    /// Emit logs as JSON lines
    log_json: bool,
    /// Arguments that were not understood, reported once logging is up
    unknown: Vec<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut result = Args {
        config_path: None,
        port: None,
        log_json: false,
        unknown: Vec::new(),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                let value = args
                    .get(i + 1)
                    .context("Missing argument for --port")?;
                result.port = Some(
                    value
                        .parse()
                        .with_context(|| format!("Invalid port: {}", value))?,
                );
                i += 2;
            }
            "--log-json" => {
                result.log_json = true;
                i += 1;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            arg if !arg.starts_with('-') => {
                // Positional argument = config file
                result.config_path = Some(arg.to_string());
                i += 1;
            }
            _ => {
                result.unknown.push(args[i].clone());
                i += 1;
            }
        }
    }

    Ok(result)
}

fn print_help() {
    eprintln!(
        r#"omnid - OmniChain Gateway Daemon

Usage: omnid [OPTIONS] [config.toml]

Options:
  -p, --port <port>   Listen port (overrides [server] port, default 8003)
      --log-json      Write logs as JSON lines
  -h, --help          Print this help message

Environment:
  RUST_LOG            Log filter (default: {filter})

Examples:
  # Demo directory against localhost backends
  omnid

  # Run with config file
  omnid config/omnid.toml

  # Override the port
  omnid --port 9000 config/omnid.toml
"#,
        filter = DEFAULT_LOG_FILTER
    );
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = parse_args()?;
    init_tracing(args.log_json);

    tracing::info!("Starting omnid (OmniChain Gateway Daemon)");
    for arg in &args.unknown {
        tracing::warn!("Unknown argument: {}", arg);
    }

    let config = if let Some(ref path) = args.config_path {
        tracing::info!("Loading config from: {}", path);
        DaemonConfig::load(path)?
    } else {
        tracing::info!("No config file provided, using demo store directory");
        DaemonConfig::demo()
    };

    let directory = config.directory()?;
    if directory.is_empty() {
        tracing::warn!("Store directory is empty, every listing will be empty");
    }

    // Connectors
    let inventory = InventoryConnector::new(&config.connectors.inventory)?;
    let orders = OrdersConnector::new(&config.connectors.orders)?;
    let telemetry = TelemetryConnector::new(&config.connectors.telemetry, directory.robot_roster())?;
    tracing::info!(
        inventory = %config.connectors.inventory.base_url,
        orders = %config.connectors.orders.endpoint,
        telemetry = %config.connectors.telemetry.endpoint,
        "Backends configured"
    );

    let aggregator = Aggregator::new(
        directory,
        Arc::new(inventory),
        Arc::new(orders),
        Arc::new(telemetry),
        config.gateway.clone(),
    );
    let state = AppState::new(QueryService::new(Arc::new(aggregator)));

    // Create the router
    let app = create_router(state);

    // Bind to address
    let port = args.port.unwrap_or(config.server.port);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    // Run the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
