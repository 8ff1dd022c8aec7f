//! Error handling for the BookShop HTTP layer

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tower_http::request_id::RequestId;
use uuid::Uuid;

tokio::task_local! {
    static REQUEST_ID: String;
}

/// Middleware making the request's `x-request-id` the trace id of any
/// error envelope produced while handling it.
///
/// Must run inside the layer that sets the request id.
pub async fn scope_request_id(request: Request, next: Next) -> Response {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(RequestId::header_value)
        .or_else(|| request.headers().get("x-request-id"))
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    match request_id {
        Some(id) => REQUEST_ID.scope(id, next.run(request)).await,
        None => next.run(request).await,
    }
}

/// Trace id of the request being handled, or a fresh one outside a request.
fn current_trace_id() -> String {
    REQUEST_ID
        .try_with(String::clone)
        .unwrap_or_else(|_| Uuid::new_v4().to_string())
}

/// Standard error response format for all HTTP errors
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Vec<serde_json::Value>,
    pub trace_id: String,
    pub timestamp: String,
}

/// Wire envelope: `{"error": {...}}`
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {message}")]
    Validation {
        details: Vec<serde_json::Value>,
        code: String,
        message: String,
    },

    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    #[error("bad request: {message}")]
    BadRequest { message: String, code: String },

    #[error("service unavailable: {message}")]
    Unavailable { message: String, code: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(details: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::Validation {
            details,
            code: "validation_error".to_string(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: "bad_request".to_string(),
        }
    }

    /// Create an error for a backing service that cannot be reached
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            code: "service_unavailable".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_body(self, trace_id: String) -> ErrorBody {
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();

        let (code, message, details) = match self {
            AppError::Validation {
                details,
                code,
                message,
            } => (code, message, details),
            AppError::NotFound { message, code }
            | AppError::BadRequest { message, code }
            | AppError::Unavailable { message, code } => (code, message, Vec::new()),
            AppError::Internal(e) => {
                // Internal details stay out of release builds
                let message = if cfg!(debug_assertions) {
                    e.to_string()
                } else {
                    "An internal server error occurred".to_string()
                };
                ("internal_error".to_string(), message, Vec::new())
            }
        };

        ErrorBody {
            code,
            message,
            details,
            trace_id,
            timestamp,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let trace_id = current_trace_id();
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(
                trace_id = %trace_id,
                status_code = %status.as_u16(),
                error = %self,
                "request failed"
            );
        } else {
            tracing::warn!(
                trace_id = %trace_id,
                status_code = %status.as_u16(),
                error = %self,
                "request rejected"
            );
        }

        let envelope = ErrorEnvelope {
            error: self.into_body(trace_id),
        };

        (status, Json(envelope)).into_response()
    }
}
