//! Route definitions for the member `/portal`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::portal;
use crate::state::AppState;

/// Routes mounted at `/portal`.
///
/// ```text
/// GET    /                       -> view
/// DELETE /projects/{id}          -> delete
/// POST   /projects/{id}/edit     -> begin_edit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(portal::view))
        .route("/projects/{id}", delete(portal::delete))
        .route("/projects/{id}/edit", post(portal::begin_edit))
}
