use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};

use crate::error::ReportError;

/// Error envelope returned by the HTTP surface.
///
/// Carries only a safe message; upstream bodies and internal details are
/// logged, never returned to the caller.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": true,
            "message": self.message,
        }));
        (self.status, body).into_response()
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match &err {
            ReportError::Config(msg) => {
                error!("Configuration error: {}", msg);
                Self::internal(format!("configuration error: {msg}"))
            }
            ReportError::InvalidInput(msg) => Self::bad_request(msg.clone()),
            ReportError::Upstream { service, detail } => {
                warn!("{} failure: {}", service, detail);
                Self::bad_gateway(format!("{service} request failed"))
            }
            ReportError::Io(e) => {
                error!("Unexpected io failure: {}", e);
                Self::internal("internal error")
            }
            ReportError::Json(e) => {
                error!("Unexpected serialization failure: {}", e);
                Self::internal("internal error")
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
