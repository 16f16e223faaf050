mod search;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use ecostay_core::ProviderSettings;
use ecostay_search::{CertificationRegistry, SearchError};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::middleware::{enforce_rate_limit, request_id_of, RateLimitState, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub providers: Arc<ProviderSettings>,
    pub http: reqwest::Client,
    pub registry: Arc<dyn CertificationRegistry>,
}

/// Body of every error response: `{"error": "<message>"}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    registry: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

pub(super) fn map_search_error(request_id: &str, error: &SearchError) -> ApiError {
    let status = match error {
        SearchError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        SearchError::NotFound { .. } => StatusCode::NOT_FOUND,
        SearchError::ConfigurationMissing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        SearchError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        SearchError::Registry(_) => StatusCode::SERVICE_UNAVAILABLE,
    };

    if status.is_server_error() {
        tracing::error!(request_id, kind = error.kind(), error = %error, "search failed");
    } else {
        tracing::warn!(request_id, kind = error.kind(), error = %error, "search rejected");
    }

    ApiError::new(status, error.to_string())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

fn search_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/search",
            post(search::search_hotels).options(preflight),
        )
        .route(
            "/functions/v1/search-hotels",
            post(search::search_hotels).options(preflight),
        )
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    // Outermost first. The id must exist before CORS answers a pre-flight.
    Router::new()
        .merge(public_routes)
        .merge(search_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    request_id_header.clone(),
                    MakeRequestUuid,
                ))
                .layer(PropagateRequestIdLayer::new(request_id_header))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(build_cors()),
        )
        .with_state(state)
}

fn request_span(req: &Request) -> tracing::Span {
    tracing::info_span!(
        "http_request",
        method = %req.method(),
        uri = %req.uri(),
        request_id = request_id_of(req)
    )
}

/// Answers a bare `OPTIONS` that is not a CORS pre-flight.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.registry.check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                registry: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: registry unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    registry: "unavailable",
                }),
            )
        }
    }
}
