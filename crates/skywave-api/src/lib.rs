//! JSON HTTP surface for Skywave.
//!
//! Exposes an axum [`Router`] backed by any
//! [`MonitorStore`](skywave_core::store::MonitorStore): the `POST /sync`
//! ingest endpoint plus the read-side listing, report, and health endpoints.

pub mod auth;
pub mod cors;
pub mod error;
pub mod handlers;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::DefaultBodyLimit,
  middleware,
  routing::{get, post},
};
use serde::Deserialize;
use skywave_core::store::MonitorStore;
use tower_http::trace::TraceLayer;

/// Request bodies above this are rejected before any handler runs.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SKYWAVE_*` environment overrides.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:    String,
  pub port:    u16,
  pub db_path: PathBuf,
  /// Shared secret the transcriber presents in `X-API-Key`.
  pub api_key: String,
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S: MonitorStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

impl<S: MonitorStore> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), config: self.config.clone() }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the Skywave API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: MonitorStore + 'static,
{
  Router::new()
    .route("/sync",              post(handlers::sync::handler::<S>))
    .route("/callsigns",         get(handlers::callsigns::handler::<S>))
    .route("/transcriptions",    get(handlers::transcriptions::handler::<S>))
    .route("/callsign-mentions", get(handlers::mentions::callsign_mentions::<S>))
    .route("/mentions",          get(handlers::mentions::mention_log::<S>))
    .route("/report",            get(handlers::report::handler::<S>))
    .route("/stats",             get(handlers::telemetry::system_stats::<S>))
    .route("/temperatures",      get(handlers::telemetry::temperatures::<S>))
    .route("/health",            get(handlers::health::handler))
    .layer(middleware::from_fn(cors::permissive))
    .layer(TraceLayer::new_for_http())
    .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────
