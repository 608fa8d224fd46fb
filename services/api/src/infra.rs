use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use school_match::intake::{IntakeError, ProfileImporter};
use school_match::MatchEngine;
use serde_json::json;
use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<MatchEngine>,
    pub(crate) importer: Arc<ProfileImporter>,
    pub(crate) max_batch_size: usize,
}

#[derive(Debug)]
pub(crate) enum ApiError {
    BatchTooLarge { size: usize, limit: usize },
    Intake(IntakeError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BatchTooLarge { size, limit } => write!(
                f,
                "batch of {} records exceeds the limit of {}",
                size, limit
            ),
            ApiError::Intake(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::BatchTooLarge { .. } => None,
            ApiError::Intake(err) => Some(err),
        }
    }
}

impl From<IntakeError> for ApiError {
    fn from(value: IntakeError) -> Self {
        Self::Intake(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BatchTooLarge { .. }
            | ApiError::Intake(IntakeError::TooManyRecords { .. }) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            ApiError::Intake(IntakeError::Csv(_) | IntakeError::Json(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Intake(
                IntakeError::MissingRequiredField { .. } | IntakeError::UnknownTrack { .. },
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Intake(IntakeError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

pub(crate) fn ensure_batch_size(size: usize, limit: usize) -> Result<(), ApiError> {
    if size > limit {
        return Err(ApiError::BatchTooLarge { size, limit });
    }
    Ok(())
}
