use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use showcase_core::error::CoreError;
use showcase_db::StoreError;
use showcase_remote::github::GithubError;
use showcase_remote::membership::LookupError;

/// Message shown when the membership service cannot be reached.
pub const MSG_MEMBERSHIP_UNAVAILABLE: &str =
    "Could not reach the membership service. Please try again.";

/// Message shown when GitHub cannot be reached.
pub const MSG_GITHUB_UNAVAILABLE: &str = "Could not reach GitHub. Please try again.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `showcase_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persistence error from the key/value store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A remote service failed; the caller may retry.
    #[error("Upstream unavailable: {0}")]
    Upstream(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        tracing::warn!(error = %err, "Membership lookup failed");
        AppError::Upstream(MSG_MEMBERSHIP_UNAVAILABLE.into())
    }
}

impl From<GithubError> for AppError {
    fn from(err: GithubError) -> Self {
        match err {
            GithubError::Rejected(msg) => AppError::Core(CoreError::Unauthorized(format!(
                "GitHub authentication failed: {msg}"
            ))),
            GithubError::ApiError { status: 401, .. } => AppError::Core(CoreError::Unauthorized(
                "GitHub rejected the access token. Sign in again.".into(),
            )),
            other => {
                tracing::warn!(error = %other, "GitHub request failed");
                AppError::Upstream(MSG_GITHUB_UNAVAILABLE.into())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            },

            // --- Store errors ---
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Upstream(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "UPSTREAM_UNAVAILABLE",
                msg.clone(),
            ),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
