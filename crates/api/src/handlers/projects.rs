//! Handlers for the public `/projects` gallery.

use axum::extract::{Path, State};
use axum::Json;
use showcase_core::error::CoreError;
use showcase_core::presenter::{render_gallery, GalleryView};
use showcase_core::project::{ProjectRecord, ENTITY_PROJECT};
use showcase_core::types::ProjectId;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects
pub async fn gallery(State(state): State<AppState>) -> Json<DataResponse<GalleryView>> {
    let projects = state.projects.lock().await;
    let language = state.session.lock().await.preferences.language;
    Json(DataResponse {
        data: render_gallery(projects.list_all(), language),
    })
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<ProjectRecord>>> {
    let id = ProjectId::from(id);
    let projects = state.projects.lock().await;
    let record = projects
        .get(&id)
        .cloned()
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: ENTITY_PROJECT,
            id: id.to_string(),
        }))?;
    Ok(Json(DataResponse { data: record }))
}
