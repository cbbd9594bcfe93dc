pub mod form;
pub mod github;
pub mod health;
pub mod membership;
pub mod portal;
pub mod preferences;
pub mod projects;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /membership                                      current member, sign out (GET, DELETE)
/// /membership/verify                               remote lookup (POST)
///
/// /projects                                        gallery view (GET)
/// /projects/{id}                                   single record (GET)
///
/// /portal                                          portal view for current member (GET)
/// /portal/projects/{id}                            delete own project (DELETE)
/// /portal/projects/{id}/edit                       enter edit mode (POST)
///
/// /form                                            form mode and editing target (GET)
/// /form/submit                                     multipart create or edit (POST)
/// /form/reset                                      back to create mode (POST)
///
/// /preferences                                     language and theme (GET, PUT)
///
/// /github/session                                  GitHub sign-in (GET, POST, DELETE)
/// /github/repositories                             cached importable repos (GET)
/// /github/repositories/fetch                       refresh from GitHub (POST)
/// /github/repositories/{id}/select                 prefill form fields (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/membership", membership::router())
        .nest("/projects", projects::router())
        .nest("/portal", portal::router())
        .nest("/form", form::router())
        .nest("/preferences", preferences::router())
        .nest("/github", github::router())
}
