use std::sync::Arc;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use ecostay_core::SearchRequest;
use ecostay_search::{ndjson_stream, stream_hotels, SearchError, SearchPipeline};
use tower_http::request_id::RequestId;

use super::{map_search_error, ApiError, AppState};

const NDJSON: &str = "application/x-ndjson";

/// `POST /api/v1/search`
///
/// Validates the body, runs the whole pipeline, and only then starts the
/// NDJSON stream. A failing stage yields a single JSON error response and no
/// frames.
pub(super) async fn search_hotels(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request_id = req_id.header_value().to_str().unwrap_or("-");

    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(request_id, error = %rejection.body_text(), "malformed search body");
        ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text())
    })?;

    let query = request
        .into_query(Utc::now().date_naive())
        .map_err(|e| map_search_error(request_id, &SearchError::from(e)))?;

    tracing::info!(
        request_id,
        destination = %query.destination,
        check_in = %query.check_in,
        check_out = %query.check_out,
        "search started"
    );

    let pipeline =
        SearchPipeline::from_settings(&state.providers, &state.http, Arc::clone(&state.registry))
            .map_err(|e| map_search_error(request_id, &e))?;

    let hotels = pipeline
        .run(&query)
        .await
        .map_err(|e| map_search_error(request_id, &e))?;

    let body = Body::from_stream(ndjson_stream(stream_hotels(hotels)));

    Ok((
        [
            (header::CONTENT_TYPE, NDJSON),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
        .into_response())
}
