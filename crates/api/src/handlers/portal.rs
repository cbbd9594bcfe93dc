//! Handlers for the member `/portal`.
//!
//! Every mutation here requires a verified member and a record that member
//! owns.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use showcase_core::presenter::{render_portal, PortalView};
use showcase_core::submission::FormFields;
use showcase_core::types::ProjectId;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::submission;

/// Response to entering edit mode.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditStarted {
    pub editing_project_id: ProjectId,
    pub fields: FormFields,
}

/// GET /api/v1/portal
pub async fn view(State(state): State<AppState>) -> Json<DataResponse<PortalView>> {
    let projects = state.projects.lock().await;
    let session = state.session.lock().await;
    Json(DataResponse {
        data: render_portal(
            projects.list_all(),
            session.member.as_ref(),
            session.preferences.language,
        ),
    })
}

/// DELETE /api/v1/portal/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    submission::delete(&state, &ProjectId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/portal/projects/{id}/edit
pub async fn begin_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<EditStarted>>> {
    let id = ProjectId::from(id);
    let fields = submission::begin_edit(&state, id.clone()).await?;
    Ok(Json(DataResponse {
        data: EditStarted {
            editing_project_id: id,
            fields,
        },
    }))
}
