//! goear-rs: JSON search API over paginated music providers
//!
//! This is the main entry point for the server.

use anyhow::{Context, Result};
use clap::Parser;
use goear_rs::{
    config,
    network::HttpClient,
    providers::ProviderLoader,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const ENV_HELP: &str = "\
Environment variables:
  GOEAR_SETTINGS_PATH     Path to settings.yml
  GOEAR_DEBUG             Enable debug logging (true/false)
  GOEAR_PORT              Server port
  GOEAR_BIND_ADDRESS      Bind address
  GOEAR_DEFAULT_PROVIDER  Provider used when a request names none
  GOEAR_SEARCH_TIMEOUT    Default pagination budget in seconds
  RUST_LOG                Log filter (overrides GOEAR_DEBUG)

Endpoints:
  GET  /search?q=<term>&offset=&results_count=&min_quality=&extended_info=&timeout=
  GET  /lookup?id=<id>[,<id>...]
  POST /lookup            JSON body: id, track, or an array of either
  GET  /stats
  GET  /health";

/// Quality-filtered, windowed search over paginated music providers
#[derive(Debug, Parser)]
#[command(name = "goear-rs", version, about, after_help = ENV_HELP)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration before logging so `general.debug` can pick the level
    let settings = config::load(cli.config.as_deref())?;

    let default_level = if settings.general.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    info!("Starting goear-rs v{}", goear_rs::VERSION);
    info!("Loaded configuration for instance: {}", settings.general.instance_name);

    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized");

    let registry = ProviderLoader::load(&settings, &client)?;
    info!("Loaded {} providers", registry.len());

    let addr = SocketAddr::new(
        settings
            .server
            .bind_address
            .parse()
            .context("invalid server.bind_address")?,
        settings.server.port,
    );

    let state = AppState::new(settings, registry);
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
