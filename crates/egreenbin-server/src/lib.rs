//! Process wiring for the eGreenBin API server.
//!
//! Configuration loading, the middleware stack around
//! [`egreenbin_api::api_router`], and the shutdown signal. The binary in
//! `main.rs` owns the MongoDB connection lifecycle.

use std::{any::Any, path::Path, sync::Arc, time::Duration};

use axum::{
  Json, Router,
  http::{StatusCode, Uri},
  response::{IntoResponse, Response},
};
use egreenbin_api::{ApiError, Envelope};
use egreenbin_core::store::DocumentStore;
use serde::Deserialize;
use tokio::signal;
use tower_http::{
  catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered from built-in defaults, an optional TOML file, and `EGREENBIN_*`
/// environment variables, in increasing precedence.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  pub mongo_uri:            String,
  pub database:             String,
  /// Upper bound on the handling of any single request.
  pub request_timeout_secs: u64,
  /// How long to wait for a usable MongoDB server, at startup and per
  /// operation.
  pub connect_timeout_secs: u64,
}

impl ServerConfig {
  /// Load configuration from `path` (if it exists) and the environment.
  /// `mongo_uri`, when given, overrides every other source.
  pub fn load(
    path: &Path,
    mongo_uri: Option<String>,
  ) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 8080)?
      .set_default("mongo_uri", "mongodb://localhost:27017")?
      .set_default("database", "egreenbin")?
      .set_default("request_timeout_secs", 30)?
      .set_default("connect_timeout_secs", 10)?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("EGREENBIN").try_parsing(true))
      .set_override_option("mongo_uri", mongo_uri)?
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }

  pub fn connect_timeout(&self) -> Duration {
    Duration::from_secs(self.connect_timeout_secs)
  }
}

// ─── Application ──────────────────────────────────────────────────────────────

/// The complete HTTP application: every resource under `/api`, wrapped in
/// the middleware stack.
pub fn app<S>(store: Arc<S>, request_timeout: Duration) -> Router
where
  S: DocumentStore + 'static,
{
  let routes = Router::new()
    .nest("/api", egreenbin_api::api_router(store))
    .fallback(fallback);
  with_middleware(routes, request_timeout)
}

/// Panic recovery (innermost), request timeout, then request tracing.
pub fn with_middleware(routes: Router, request_timeout: Duration) -> Router {
  routes
    .layer(CatchPanicLayer::custom(panic_response))
    .layer(TimeoutLayer::with_status_code(
      StatusCode::REQUEST_TIMEOUT,
      request_timeout,
    ))
    .layer(TraceLayer::new_for_http())
}

async fn fallback(uri: Uri) -> ApiError {
  ApiError::NotFound(format!("no route for {uri}"))
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
  let detail = if let Some(s) = panic.downcast_ref::<String>() {
    s.as_str()
  } else if let Some(s) = panic.downcast_ref::<&str>() {
    s
  } else {
    "unknown panic payload"
  };
  tracing::error!(panic = detail, "request handler panicked");

  (
    StatusCode::INTERNAL_SERVER_ERROR,
    Json(Envelope::error("internal server error")),
  )
    .into_response()
}

// ─── Shutdown ─────────────────────────────────────────────────────────────────

/// Resolves on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to install Ctrl+C handler");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut sigterm) => {
        sigterm.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to install SIGTERM handler");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    () = ctrl_c => tracing::info!("received SIGINT, shutting down"),
    () = terminate => tracing::info!("received SIGTERM, shutting down"),
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
