//! HTTP routes for the trending-post search

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::core::{SearchRequest, SearchResponse};
use crate::error::Error;
use crate::trending::TrendingService;

/// Shared state for the routes
#[derive(Clone)]
pub struct AppState {
    pub service: TrendingService,
}

impl AppState {
    pub fn new(service: TrendingService) -> Self {
        AppState { service }
    }
}

// ---- Error Handling ----

/// Error response carrying the search error shape
pub struct ApiError(Error);

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            err if err.is_client_error() => StatusCode::BAD_REQUEST,
            // Upstream quota, not the caller's; still a server-side failure
            Error::RateLimit(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Trending search failed");
        } else {
            warn!(error = %self.0, status = status.as_u16(), "Trending search rejected");
        }

        let body = Json(serde_json::json!({
            "error": self.0.to_string(),
            "posts": [],
            "totalResults": 0,
        }));
        (status, body).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(Error::InvalidInput(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(Error::InvalidInput(rejection.body_text()))
    }
}

// ---- Handlers ----

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    store: String,
    version: &'static str,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let healthy = state.service.store_healthy().await;
    Json(HealthResponse {
        status: if healthy { "ok" } else { "degraded" },
        store: state.service.store_id().to_string(),
        version: crate::VERSION,
    })
}

async fn search_post(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(state.service.search(&request).await?))
}

async fn search_get(
    State(state): State<AppState>,
    params: Result<Query<SearchRequest>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(request) = params?;
    Ok(Json(state.service.search(&request).await?))
}

// ---- Router ----

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let api = Router::new().route("/trending-posts", get(search_get).post(search_post));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
}
