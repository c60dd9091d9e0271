//! Application error type and its HTTP mapping.
//!
//! Every handler returns `Result<_, AppError>`. The status code decides how the
//! error is rendered:
//!
//! | Constructor | Status | Meaning |
//! |-------------|--------|---------|
//! | [`AppError::bad_request`] | 400 | Missing or invalid input |
//! | [`AppError::unauthorized`] | 401 | Missing/malformed token or bad credentials |
//! | [`AppError::forbidden`] | 403 | Valid identity lacking role, tenant or plan |
//! | [`AppError::not_found`] | 404 | Unknown resource, or one invisible to the caller's tenant |
//! | [`AppError::internal`] | 500 | Store or runtime failure |
//!
//! Server errors are logged with the raw cause and rendered with a generic
//! message so nothing internal leaks to the client.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Machine-readable error codes clients can branch on.
pub mod codes {
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const PLAN_LIMIT_REACHED: &str = "PLAN_LIMIT_REACHED";
    pub const TENANT_EXISTS: &str = "TENANT_EXISTS";
}

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub code: Option<&'static str>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            code: None,
        }
    }

    /// Attach a machine-readable code to the error body.
    #[must_use]
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, anyhow::anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message))
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
            INTERNAL_MESSAGE.to_string()
        } else {
            self.error.to_string()
        };

        let body = match self.code {
            Some(code) => json!({ "error": message, "code": code }),
            None => json!({ "error": message }),
        };

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
