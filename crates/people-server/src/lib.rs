//! Server wiring for the people service.
//!
//! Loads [`ServerConfig`], opens the SQLite store it names, and wraps the
//! `people-api` router with transport layers. The binary in `main.rs` and the
//! end-to-end tests share this code.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::{Router, extract::DefaultBodyLimit};
use people_core::store::PeopleStore;
use people_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// `store_path` value that selects a throwaway in-memory database.
pub const IN_MEMORY: &str = ":memory:";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `people.toml` and
/// `PEOPLE_*` environment variables. Missing keys take their default.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Largest accepted request body, in bytes.
  pub body_limit: usize,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       3000,
      store_path: PathBuf::from("people.db"),
      body_limit: 64 * 1024,
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` and then the environment over the
  /// defaults.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("PEOPLE").try_parsing(true))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Wiring ───────────────────────────────────────────────────────────────────

/// Open the store named by `config.store_path`.
pub async fn open_store(config: &ServerConfig) -> anyhow::Result<SqliteStore> {
  if config.store_path == Path::new(IN_MEMORY) {
    return SqliteStore::open_in_memory()
      .await
      .context("failed to open in-memory store");
  }

  let path = expand_tilde(&config.store_path);
  SqliteStore::open(&path)
    .await
    .with_context(|| format!("failed to open store at {path:?}"))
}

/// The API router with request tracing and the configured body limit.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: PeopleStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  people_api::api_router(store)
    .layer(DefaultBodyLimit::max(config.body_limit))
    .layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
