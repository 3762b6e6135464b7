//! egreenbin server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) and `EGREENBIN_*`
//! environment variables, connects to MongoDB, and serves the JSON API until
//! SIGINT or SIGTERM.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use egreenbin_server::{ServerConfig, app, shutdown_signal};
use egreenbin_store_mongo::MongoStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "eGreenBin REST API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// MongoDB connection string; overrides the file and environment.
  #[arg(long)]
  mongo_uri: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config, cli.mongo_uri)
    .context("failed to load configuration")?;

  // A failed connect or ping is fatal; nothing is served without a store.
  let store = MongoStore::connect(
    &server_cfg.mongo_uri,
    &server_cfg.database,
    server_cfg.connect_timeout(),
  )
  .await
  .with_context(|| {
    format!("failed to connect to database {:?}", server_cfg.database)
  })?;
  let store = Arc::new(store);

  let app = app(store.clone(), server_cfg.request_timeout());
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  let served = axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error");

  store.shutdown().await;
  served
}
