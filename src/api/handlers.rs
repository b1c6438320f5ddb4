//! REST API handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::types::{ErrorResponse, GuessResponse, InitParams, InitResponse, TryParams};
use crate::error::GuessError;
use crate::game::GuessService;
use crate::session::SessionStore;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: GuessService,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_store(Arc::new(SessionStore::new()))
    }

    /// State backed by a default store with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_store(Arc::new(SessionStore::with_ttl(ttl)))
    }

    pub fn with_store(store: Arc<SessionStore>) -> Self {
        Self {
            service: GuessService::new(store),
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        self.service.store()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoResponse for GuessError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            GuessError::InvalidInput(details) => {
                tracing::debug!("rejected request: {}", details);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse::invalid_input(details.clone()),
                )
            }
            GuessError::UnknownOrExpiredToken => (
                StatusCode::NOT_FOUND,
                ErrorResponse::unknown_or_expired_token(),
            ),
            GuessError::Io(e) => {
                tracing::error!("internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error(self.to_string()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

fn query_rejected(rejection: QueryRejection) -> GuessError {
    GuessError::InvalidInput(rejection.body_text())
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// Service information endpoint.
pub async fn service_info(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "number-guess",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "live_sessions": state.store().len(),
        "ttl_seconds": state.store().ttl().as_secs()
    }))
}

/// Start a session: `GET /init?quad=NAME`.
pub async fn init(
    State(state): State<AppState>,
    query: Result<Query<InitParams>, QueryRejection>,
) -> Result<InitResponse, GuessError> {
    let Query(params) = query.map_err(query_rejected)?;
    let init = state.service.init(&params.quad)?;
    Ok(InitResponse::from(init))
}

/// Submit a guess: `GET /try?token=...&guess=...`.
pub async fn try_guess(
    State(state): State<AppState>,
    query: Result<Query<TryParams>, QueryRejection>,
) -> Result<Json<GuessResponse>, GuessError> {
    let Query(params) = query.map_err(query_rejected)?;
    let outcome = state.service.try_guess(&params.token, params.guess)?;
    Ok(Json(GuessResponse::from(outcome)))
}
