//! Handlers for display `/preferences`.

use axum::extract::State;
use axum::Json;
use showcase_core::preferences::{Preferences, UpdatePreferences};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/preferences
pub async fn get(State(state): State<AppState>) -> Json<DataResponse<Preferences>> {
    let preferences = state.session.lock().await.preferences;
    Json(DataResponse { data: preferences })
}

/// PUT /api/v1/preferences
///
/// Unknown language or theme names are rejected and nothing is changed.
pub async fn update(
    State(state): State<AppState>,
    Json(input): Json<UpdatePreferences>,
) -> AppResult<Json<DataResponse<Preferences>>> {
    let mut session = state.session.lock().await;
    let mut preferences = session.preferences;
    preferences.apply(&input)?;
    session
        .set_preferences(state.store.as_ref(), preferences)
        .await?;

    tracing::info!(
        language = preferences.language.as_str(),
        theme = preferences.theme.as_str(),
        "Preferences updated",
    );

    Ok(Json(DataResponse { data: preferences }))
}
