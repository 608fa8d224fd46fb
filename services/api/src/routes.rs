use crate::batch::{evaluate_outcome, BatchReport};
use crate::infra::{ensure_batch_size, ApiError, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use school_match::intake::StudentRecord;
use school_match::{match_summary, MatchResult, ProfileOptions};
use serde::Serialize;
use serde_json::json;
use std::io::Cursor;
use tracing::info;

#[derive(Debug, Serialize)]
pub(crate) struct MatchResponse {
    pub(crate) result: MatchResult,
    pub(crate) summary: String,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/match", post(match_endpoint))
        .route("/api/v1/match/records", post(records_endpoint))
        .route("/api/v1/match/csv", post(csv_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn match_endpoint(
    Extension(state): Extension<AppState>,
    Json(options): Json<ProfileOptions>,
) -> Json<MatchResponse> {
    let result = state.engine.match_options(&options);
    let summary = match_summary(&result);
    Json(MatchResponse { result, summary })
}

pub(crate) async fn records_endpoint(
    Extension(state): Extension<AppState>,
    Json(records): Json<Vec<StudentRecord>>,
) -> Result<Json<BatchReport>, ApiError> {
    ensure_batch_size(records.len(), state.max_batch_size)?;

    let outcome = state.importer.from_records(&records);
    let report = evaluate_outcome(state.engine.as_ref(), outcome);
    info!(
        matched = report.matches.len(),
        rejected = report.rejected.len(),
        "record batch evaluated"
    );
    Ok(Json(report))
}

/// CSV export in the request body, one student per row.
pub(crate) async fn csv_endpoint(
    Extension(state): Extension<AppState>,
    body: String,
) -> Result<Json<BatchReport>, ApiError> {
    let outcome = state
        .importer
        .from_reader_limited(Cursor::new(body.into_bytes()), state.max_batch_size)?;

    let report = evaluate_outcome(state.engine.as_ref(), outcome);
    info!(
        matched = report.matches.len(),
        rejected = report.rejected.len(),
        "CSV batch evaluated"
    );
    Ok(Json(report))
}
