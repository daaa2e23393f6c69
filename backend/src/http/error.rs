//! HTTP error handling and response types.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::VizError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (validation error)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Error raised while shaping the payload
    Viz(VizError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Viz(e) if e.is_client_error() => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Viz(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            AppError::BadRequest(msg) => ApiError::new("BAD_REQUEST", msg),
            AppError::Internal(msg) => ApiError::new("INTERNAL_ERROR", msg),
            AppError::Viz(e) => {
                let code = match &e {
                    VizError::MismatchedSeriesLength { .. } => "MISMATCHED_SERIES_LENGTH",
                    VizError::InvalidTimeRange(_) => "INVALID_TIME_RANGE",
                    VizError::InvalidBaselineOffset(_) => "INVALID_BASELINE_OFFSET",
                    VizError::Configuration(_) => "CONFIGURATION_ERROR",
                };
                ApiError::new(code, e.to_string())
            }
        };

        if status.is_server_error() {
            tracing::error!(code = %error.code, "{}", error.message);
        }

        (status, Json(error)).into_response()
    }
}

impl From<VizError> for AppError {
    fn from(err: VizError) -> Self {
        AppError::Viz(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Viz(VizError::InvalidBaselineOffset("P".into())).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Viz(VizError::configuration("bad")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_error_skips_empty_details() {
        let json = serde_json::to_value(ApiError::new("BAD_REQUEST", "nope")).unwrap();
        assert!(json.get("details").is_none());

        let json =
            serde_json::to_value(ApiError::new("BAD_REQUEST", "nope").with_details("more")).unwrap();
        assert_eq!(json["details"], "more");
    }
}
