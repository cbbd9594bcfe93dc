//! Route definitions for GitHub repository import.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::github;
use crate::state::AppState;

/// Routes mounted at `/github`.
///
/// ```text
/// GET    /session                      -> session
/// POST   /session                      -> sign_in
/// DELETE /session                      -> sign_out
/// GET    /repositories                 -> repositories
/// POST   /repositories/fetch           -> fetch
/// POST   /repositories/{id}/select     -> select
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/session",
            get(github::session)
                .post(github::sign_in)
                .delete(github::sign_out),
        )
        .route("/repositories", get(github::repositories))
        .route("/repositories/fetch", post(github::fetch))
        .route("/repositories/{id}/select", post(github::select))
}
