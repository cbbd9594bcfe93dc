//! Handlers for the submission `/form`.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use showcase_core::submission::FormState;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::submission::{self, SubmitOutcome};
use crate::upload;

/// GET /api/v1/form
pub async fn state(State(state): State<AppState>) -> Json<DataResponse<FormState>> {
    let form = state.session.lock().await.form.state();
    Json(DataResponse { data: form })
}

/// POST /api/v1/form/submit
///
/// Multipart body with `projectName`, `creatorName`, `projectLink`,
/// `projectDescription` and an optional `projectImage`. Returns 201 when a
/// project was created and 200 otherwise.
pub async fn submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<SubmitOutcome>>)> {
    let upload = upload::read_submission(multipart, state.config.max_image_bytes).await?;
    let outcome = submission::submit(&state, upload).await?;

    let status = match outcome {
        SubmitOutcome::Created(_) => StatusCode::CREATED,
        _ => StatusCode::OK,
    };
    Ok((status, Json(DataResponse { data: outcome })))
}

/// POST /api/v1/form/reset
pub async fn reset(State(state): State<AppState>) -> Json<DataResponse<FormState>> {
    submission::reset(&state).await;
    let form = state.session.lock().await.form.state();
    Json(DataResponse { data: form })
}
