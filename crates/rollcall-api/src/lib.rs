//! JSON REST API for the rollcall attendance roster.
//!
//! Exposes an axum [`Router`] backed by any [`RosterStore`]. Participant
//! endpoints are open; administrator endpoints check HTTP Basic credentials
//! against an argon2 hash. The daily reset task is spawned by the server
//! binary, not by the router.

pub mod admin;
pub mod auth;
pub mod error;
pub mod responses;
pub mod roster;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json, Router,
  routing::{get, post},
};
use chrono::NaiveTime;
use rollcall_core::{admin::AdminOverride, gate::ResponseGate, store::RosterStore};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

use auth::AdminAuthConfig;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  pub store_path:          PathBuf,
  /// Local wall-clock time of the daily reset, e.g. `"22:01:20"`.
  pub reset_at:            NaiveTime,
  pub admin_username:      String,
  pub admin_password_hash: String,
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: RosterStore> {
  pub store: Arc<S>,
  pub gate:  Arc<ResponseGate<S>>,
  pub admin: Arc<AdminOverride<S>>,
  pub auth:  Arc<AdminAuthConfig>,
}

impl<S: RosterStore> AppState<S> {
  /// Wire the domain services around one shared store.
  pub fn new(store: Arc<S>, auth: AdminAuthConfig) -> Self {
    Self {
      gate:  Arc::new(ResponseGate::new(store.clone())),
      admin: Arc::new(AdminOverride::new(store.clone())),
      auth:  Arc::new(auth),
      store,
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the full application router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: RosterStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/health", get(health))
    // Roster
    .route(
      "/participants",
      get(roster::list::<S>).post(roster::create::<S>),
    )
    .route(
      "/participants/{id}",
      get(roster::get_one::<S>).delete(roster::delete_one::<S>),
    )
    .route("/login", post(roster::login::<S>))
    // Responses
    .route(
      "/participants/{id}/response",
      get(responses::get_one::<S>).post(responses::submit::<S>),
    )
    .route("/responses", post(responses::submit_by_phone::<S>))
    // Admin overrides
    .route("/admin/reset/{id}", post(admin::reset_one::<S>))
    .route("/admin/reset-all", post(admin::reset_all::<S>))
    .route("/admin/set-all", post(admin::set_all::<S>))
    .route("/admin/summary", get(admin::summary::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// `GET /health` — liveness probe, no auth.
async fn health() -> Json<serde_json::Value> {
  Json(json!({ "status": "ok" }))
}

// ─── Integration tests ───────────────────────────────────────────────────────
