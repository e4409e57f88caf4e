//! JSON REST API for OurWardrobe.
//!
//! Exposes an axum [`Router`] backed by any [`WardrobeStore`]. Every response
//! uses the envelope in [`response`]; callers authenticate with HTTP Basic
//! credentials (see [`auth`]).

pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, patch, post, put},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use wardrobe_core::{
  store::WardrobeStore,
  workflow::{DonationWorkflow, RecipientPolicy},
};

use handlers::{accounts, donations, items, notifications};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `WARDROBE_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                          String,
  pub port:                          u16,
  pub store_path:                    PathBuf,
  /// Accept donations addressed to emails with no account yet.
  pub allow_unregistered_recipients: bool,
  /// Maximum notifications returned by one listing.
  pub notification_limit:            usize,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                          "127.0.0.1".to_string(),
      port:                          5000,
      store_path:                    PathBuf::from("wardrobe.db"),
      allow_unregistered_recipients: false,
      notification_limit:            50,
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: WardrobeStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

impl<S: WardrobeStore> AppState<S> {
  pub fn new(store: S, config: ServerConfig) -> Self {
    Self { store: Arc::new(store), config: Arc::new(config) }
  }

  pub(crate) fn workflow(&self) -> DonationWorkflow<'_, S> {
    let policy = RecipientPolicy::from_flag(self.config.allow_unregistered_recipients);
    DonationWorkflow::new(&*self.store, policy)
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: WardrobeStore + Clone + 'static,
{
  Router::new()
    // Accounts
    .route("/auth/register", post(accounts::register::<S>))
    .route("/auth/me", get(accounts::me))
    .route("/auth/profile", get(accounts::me).put(accounts::update_profile::<S>))
    .route("/auth/change-password", put(accounts::change_password::<S>))
    // Wardrobe
    .route("/wardrobe/items", get(items::list::<S>).post(items::create::<S>))
    .route(
      "/wardrobe/items/{id}",
      get(items::get_one::<S>).put(items::update::<S>).delete(items::delete::<S>),
    )
    .route("/wardrobe/items/{id}/status", patch(items::set_status::<S>))
    .route("/wardrobe/dashboard-stats", get(items::dashboard::<S>))
    // Donations
    .route("/donations", get(donations::list::<S>))
    .route("/donations/send", post(donations::send::<S>))
    .route("/donations/pending", get(donations::pending::<S>))
    .route("/donations/{id}", get(donations::get_one::<S>))
    .route(
      "/donations/{id}/accept",
      post(donations::accept::<S>).put(donations::accept::<S>),
    )
    .route(
      "/donations/{id}/reject",
      post(donations::reject::<S>).put(donations::reject::<S>),
    )
    .route(
      "/donations/{id}/cancel",
      post(donations::cancel::<S>).put(donations::cancel::<S>),
    )
    // Notifications
    .route(
      "/notifications",
      get(notifications::list::<S>).post(notifications::create::<S>),
    )
    .route("/notifications/read-all", put(notifications::mark_all_read::<S>))
    .route("/notifications/clear", axum::routing::delete(notifications::clear::<S>))
    .route("/notifications/{id}/read", put(notifications::mark_read::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

#[cfg(test)]
mod tests;
