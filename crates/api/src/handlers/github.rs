//! Handlers for GitHub repository import.
//!
//! The access token never leaves the server; responses carry the user
//! profile only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use showcase_core::error::CoreError;
use showcase_core::github::{importable_repos, prefill_from_repo, GithubRepo, GithubUser};
use showcase_core::submission::FormFields;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY_GITHUB_REPO: &str = "GithubRepository";

/// Body of a sign-in request: the OAuth authorization code.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub code: String,
}

/// Body of a repository selection: the creator currently in the form.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    #[serde(default)]
    pub creator: Option<String>,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// GET /api/v1/github/session
pub async fn session(State(state): State<AppState>) -> Json<DataResponse<Option<GithubUser>>> {
    let user = state
        .session
        .lock()
        .await
        .github
        .as_ref()
        .map(|s| s.user.clone());
    Json(DataResponse { data: user })
}

/// POST /api/v1/github/session
pub async fn sign_in(
    State(state): State<AppState>,
    Json(input): Json<SignInRequest>,
) -> AppResult<Json<DataResponse<GithubUser>>> {
    let code = input.code.trim();
    if code.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Authorization code is required".into(),
        )));
    }

    let github_session = state.github.exchange_code(code).await?;
    let user = github_session.user.clone();

    state
        .session
        .lock()
        .await
        .set_github(state.store.as_ref(), Some(github_session))
        .await?;

    Ok(Json(DataResponse { data: user }))
}

/// DELETE /api/v1/github/session
pub async fn sign_out(State(state): State<AppState>) -> AppResult<StatusCode> {
    state
        .session
        .lock()
        .await
        .set_github(state.store.as_ref(), None)
        .await?;
    tracing::info!("GitHub session cleared");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Repositories
// ---------------------------------------------------------------------------

/// GET /api/v1/github/repositories
pub async fn repositories(State(state): State<AppState>) -> Json<DataResponse<Vec<GithubRepo>>> {
    let repos = state.session.lock().await.repos.clone();
    Json(DataResponse { data: repos })
}

/// POST /api/v1/github/repositories/fetch
///
/// Refresh the listing from GitHub. Forks are dropped and the rest ranked
/// by stars.
pub async fn fetch(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<GithubRepo>>>> {
    let token = state
        .session
        .lock()
        .await
        .github
        .as_ref()
        .map(|s| s.access_token.clone())
        .ok_or_else(|| CoreError::Unauthorized("Sign in with GitHub first".into()))?;

    let repos = importable_repos(state.github.list_repositories(&token).await?);

    let mut session = state.session.lock().await;
    if session.github.as_ref().map(|s| s.access_token.as_str()) != Some(token.as_str()) {
        return Err(AppError::Core(CoreError::Conflict(
            "GitHub session changed while fetching repositories".into(),
        )));
    }
    session
        .set_repos(state.store.as_ref(), repos.clone())
        .await?;

    tracing::info!(count = repos.len(), "Cached importable repositories");
    Ok(Json(DataResponse { data: repos }))
}

/// POST /api/v1/github/repositories/{id}/select
///
/// Returns form fields prefilled from a cached repository. The creator is
/// taken from the GitHub profile only when `creator` is blank.
pub async fn select(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<SelectRequest>,
) -> AppResult<Json<DataResponse<FormFields>>> {
    let session = state.session.lock().await;

    let repo = session
        .repos
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| CoreError::NotFound {
            entity: ENTITY_GITHUB_REPO,
            id: id.to_string(),
        })?;

    let current = FormFields {
        creator_name: input.creator.unwrap_or_default(),
        ..FormFields::default()
    };
    let user = session.github.as_ref().map(|s| &s.user);

    Ok(Json(DataResponse {
        data: prefill_from_repo(&current, repo, user),
    }))
}
