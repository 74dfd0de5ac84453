//! records-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! record store, seeding it on first run, and serves the records API over
//! HTTP.

mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use records_core::RecordStore;
use records_store_sqlite::SqliteStorage;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::{ServerConfig, expand_tilde};

#[derive(Parser)]
#[command(author, version, about = "Academic records server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg =
    ServerConfig::load(&cli.config).context("failed to load configuration")?;
  let store_path = expand_tilde(&server_cfg.store_path);

  let storage = SqliteStorage::open(&store_path)
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let store = RecordStore::open(storage).context("failed to load records")?;

  let app = records_api::api_router(records_api::shared(store))
    .layer(TraceLayer::new_for_http());
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
