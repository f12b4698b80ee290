//! people-server binary.
//!
//! Reads `people.toml` (or the path given with `--config`), opens the SQLite
//! store, and serves the `/people` JSON API over HTTP.
//!
//! Every key can also be set from the environment, e.g.
//!
//! ```text
//! PEOPLE_PORT=8080 PEOPLE_STORE_PATH=:memory: people-server
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use people_server::ServerConfig;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "People resource server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "people.toml")]
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
  let server_cfg = ServerConfig::load(&cli.config)?;

  let store = people_server::open_store(&server_cfg).await?;
  tracing::info!(store = ?server_cfg.store_path, "store opened");

  let app = people_server::app(Arc::new(store), &server_cfg);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
