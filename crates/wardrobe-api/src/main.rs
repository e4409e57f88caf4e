//! wardrobe-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) overlaid by
//! `WARDROBE_*` environment variables, opens the SQLite store and serves the
//! JSON API over HTTP.
//!
//! # Maintenance modes
//!
//! ```
//! cargo run -p wardrobe-api --bin wardrobe-server -- --hash-password
//! cargo run -p wardrobe-api --bin wardrobe-server -- --reconcile
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wardrobe_api::{AppState, ServerConfig, auth::hash_password};
use wardrobe_core::reconcile::Reconciler;
use wardrobe_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "OurWardrobe API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,

  /// Repair every item flagged for reconciliation and exit.
  #[arg(long)]
  reconcile: bool,
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

  if cli.hash_password {
    let password = read_password()?;
    println!("{}", hash_password(&password)?);
    return Ok(());
  }

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("WARDROBE"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if cli.reconcile {
    let report = Reconciler::new(&store)
      .reconcile_flagged()
      .await
      .context("reconciliation failed")?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    return Ok(());
  }

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  if server_cfg.allow_unregistered_recipients {
    tracing::info!("donations to unregistered emails are allowed");
  }

  let app = wardrobe_api::router(AppState::new(store, server_cfg));

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Read a password from stdin.
fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches(['\n', '\r']).to_string())
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
