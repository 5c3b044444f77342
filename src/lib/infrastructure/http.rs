//! HTTP Server

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::{extract::Request, http::HeaderValue, Router};
use axum_server::Handle;
use clap::Parser;
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info_span};

use crate::domain::communication::emails::EmailSenderService;

use handlers::{api, panic_handler};
use state::AppState;

mod errors;
mod handlers;
mod open_api;
pub mod servers;
pub mod state;

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct HttpServerConfig {
    /// The port to listen on
    #[arg(short, long, env = "HTTP_PORT", default_value = "5000")]
    pub port: u16,

    /// The single browser origin allowed to call the API
    #[arg(long, env = "CORS_ALLOWED_ORIGIN", default_value = "http://localhost:3000")]
    pub cors_origin: String,

    /// Path to the TLS certificate (PEM); enables HTTPS together with `key_path`
    #[arg(long, env = "TLS_CERT_PATH", requires = "key_path")]
    pub cert_path: Option<String>,

    /// Path to the TLS private key (PEM)
    #[arg(long, env = "TLS_KEY_PATH", requires = "cert_path")]
    pub key_path: Option<String>,
}

impl HttpServerConfig {
    /// The allowed CORS origin as a header value
    pub fn allowed_origin(&self) -> Result<HeaderValue> {
        self.cors_origin
            .parse()
            .with_context(|| format!("invalid CORS origin \"{}\"", self.cors_origin))
    }
}

/// A server that runs until it is told to shut down
#[async_trait]
pub trait Server: Send + Sized {
    /// Serves requests until a shutdown signal is received.
    async fn run(self) -> Result<()>;
}

/// Create the application's router
pub fn router<S: EmailSenderService>(state: AppState<S>, allowed_origin: HeaderValue) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        let uri = request.uri().to_string();
        info_span!("http_request", method = ?request.method(), uri)
    });

    let cors_layer = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router())
        .with_state(state)
        .layer(cors_layer)
        .layer(trace_layer)
        .layer(CatchPanicLayer::custom(panic_handler))
}

#[mutants::skip]
async fn shutdown_signal(handle: Option<Handle>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    if let Some(handle) = handle {
        debug!("shutting down gracefully");
        handle.graceful_shutdown(Some(Duration::from_secs(10)));
    }
}
