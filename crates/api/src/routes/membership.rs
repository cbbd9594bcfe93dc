//! Route definitions for the `/membership` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::membership;
use crate::state::AppState;

/// Routes mounted at `/membership`.
///
/// ```text
/// GET    /          -> current
/// DELETE /          -> sign_out
/// POST   /verify    -> verify
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(membership::current).delete(membership::sign_out))
        .route("/verify", post(membership::verify))
}
