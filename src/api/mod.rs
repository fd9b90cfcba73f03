//! HTTP surface for the bridge engine.
//!
//! One router, JSON in and out, with every piece of mutable state behind a
//! single `RwLock` so each payment is atomic with respect to the next.

mod handlers;
mod responses;

pub use responses::*;

use crate::engine::processor::EngineError;
use crate::engine::state::BridgeState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    pub bridge: Arc<RwLock<BridgeState>>,
    /// Hardened deployments refuse the reset endpoint.
    pub locked: bool,
}

impl AppState {
    pub fn new(bridge: BridgeState, locked: bool) -> Self {
        Self {
            bridge: Arc::new(RwLock::new(bridge)),
            locked,
        }
    }
}

/// Client-visible API failures.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("User not found")]
    UserNotFound,
    #[error("Forbidden")]
    ResetDisabled,
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::UserNotFound(_) => ApiError::UserNotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::ResetDisabled => StatusCode::FORBIDDEN,
        };
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/pools", get(handlers::get_pools))
        .route("/users", get(handlers::get_users))
        .route("/transactions", get(handlers::get_transactions))
        .route("/pay", post(handlers::post_pay))
        .route("/reset", get(handlers::get_reset))
        .route("/demo-trigger", post(handlers::post_demo_trigger))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Bind and serve until the process exits.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = TcpListener::bind(addr).await?;
    log::info!("listening on {addr}");
    axum::serve(listener, app).await
}
