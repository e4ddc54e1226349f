//! Web server adapter.
//!
//! Axum JSON API over a single [`Simulation`], plus an Askama-rendered landing
//! page that polls the API.

mod error;
mod handlers;
mod models;
mod templates;

pub use error::WebError;
pub use handlers::*;
pub use models::*;
pub use templates::*;

use axum::{
    Router,
    http::{HeaderMap, header},
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::domain::error::SimError;
use crate::domain::simulation::Simulation;

pub struct AppState {
    pub simulation: Simulation,
}

impl AppState {
    pub fn new(simulation: Simulation) -> Arc<Self> {
        Arc::new(Self { simulation })
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/market", get(handlers::market))
        .route("/stock-history/{name}", get(handlers::stock_history))
        .route("/buy", post(handlers::buy))
        .route("/sell", post(handlers::sell))
        .route("/portfolio", get(handlers::portfolio))
        .route("/toggle-simulation", post(handlers::toggle_simulation))
        .route("/start-simulation", post(handlers::start_simulation))
        .route("/stop-simulation", post(handlers::stop_simulation))
        .route("/reset", post(handlers::reset))
        .route("/status", get(handlers::status))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until ctrl-c. The scheduler is cancelled when the state is dropped.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> Result<(), SimError> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| SimError::Server {
            reason: format!("failed to bind {addr}: {e}"),
        })?;

    tracing::info!("listening on http://{}", addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SimError::Server {
            reason: e.to_string(),
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("text/html"))
}
