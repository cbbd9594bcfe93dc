//! Route definitions for the submission `/form`.
//!
//! The default body limit is lifted on `/submit`; the multipart reader
//! enforces its own per-field caps.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::form;
use crate::state::AppState;

/// Routes mounted at `/form`.
///
/// ```text
/// GET    /          -> state
/// POST   /submit    -> submit (multipart)
/// POST   /reset     -> reset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(form::state))
        .route(
            "/submit",
            post(form::submit).layer(DefaultBodyLimit::disable()),
        )
        .route("/reset", post(form::reset))
}
