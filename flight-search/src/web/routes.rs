//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::app::{GENERIC_ERROR_MESSAGE, SubmitError, SubmitOutcome};
use crate::present::{SortCriterion, ViewSnapshot};
use crate::search::SearchErrorKind;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/search", post(search_flights))
        .route("/api/results", get(current_results))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Run a search and return its results.
async fn search_flights(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ViewSnapshot>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let form: SearchForm = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, body = %String::from_utf8_lossy(&body), "invalid search form");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;
    let request = form.into_request().map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    match state.search.submit(&request).await? {
        SubmitOutcome::Published { generation, .. } => {
            let snapshot = state.search.view().snapshot().await;
            // A newer search may have published in the meantime
            if snapshot.generation == generation {
                Ok(Json(snapshot))
            } else {
                Err(AppError::superseded())
            }
        }
        SubmitOutcome::Superseded => Err(AppError::superseded()),
    }
}

/// The results currently on display, optionally re-sorted.
async fn current_results(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<ViewSnapshot>, AppError> {
    let view = state.search.view();
    let snapshot = match query.sort.as_deref() {
        Some(sort) => {
            let criterion = sort
                .parse::<SortCriterion>()
                .map_err(|e| AppError::BadRequest {
                    message: e.to_string(),
                })?;
            view.resort(criterion).await
        }
        None => view.snapshot().await,
    };
    Ok(Json(snapshot))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unprocessable { message: String },
    Conflict { message: String },
    BadGateway { message: String },
    GatewayTimeout { message: String },
    Internal { message: String },
}

impl AppError {
    fn superseded() -> Self {
        AppError::Conflict {
            message: "search was superseded by a newer search".to_string(),
        }
    }
}

impl From<SubmitError> for AppError {
    fn from(e: SubmitError) -> Self {
        let message = e.to_string();
        match e {
            SubmitError::Search(e) => match e.kind() {
                SearchErrorKind::InvalidRequest => AppError::BadRequest { message },
                SearchErrorKind::UnresolvedLocation => AppError::Unprocessable { message },
                SearchErrorKind::SessionCreateFailed | SearchErrorKind::Transport => {
                    AppError::BadGateway { message }
                }
                SearchErrorKind::Timeout => AppError::GatewayTimeout { message },
                SearchErrorKind::Cancelled => AppError::Conflict { message },
            },
            SubmitError::Render(_) => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::GatewayTimeout { message } => (StatusCode::GATEWAY_TIMEOUT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        // Server-side details stay in the log
        let message = if status.is_server_error() {
            warn!(%status, detail = %message, "request failed");
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            debug!(%status, reason = %message, "request rejected");
            message
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
