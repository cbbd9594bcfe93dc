//! Submission form controller.
//!
//! Drives the create/edit state machine held in the [`Session`] against the
//! project repository. A failed submit leaves the form mode untouched so the
//! user can correct the input and retry.
//!
//! [`Session`]: crate::session::Session

use serde::Serialize;
use showcase_core::error::CoreError;
use showcase_core::project::{ProjectRecord, ENTITY_PROJECT};
use showcase_core::submission::{require_member, FormFields, FormMode, MSG_DUPLICATE_SUBMISSION};
use showcase_core::types::ProjectId;
use showcase_db::repositories::AddOutcome;

use crate::error::AppResult;
use crate::state::AppState;
use crate::upload::SubmissionUpload;

/// What a submit did.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", content = "project", rename_all = "camelCase")]
pub enum SubmitOutcome {
    Created(ProjectRecord),
    Updated(ProjectRecord),
    /// The record being edited no longer exists; nothing was written.
    Ignored(ProjectId),
}

/// Submit the form in its current mode.
pub async fn submit(state: &AppState, upload: SubmissionUpload) -> AppResult<SubmitOutcome> {
    let mut projects = state.projects.lock().await;
    let mut session = state.session.lock().await;
    let fields = upload.fields.trimmed();

    let outcome = match session.form.clone() {
        FormMode::Create => {
            let member = require_member(session.member.as_ref())?.clone();
            fields.validate_required()?;

            match projects
                .add(fields.into_new_project(&member, upload.image))
                .await?
            {
                AddOutcome::Added(record) => SubmitOutcome::Created(record),
                AddOutcome::Duplicate(_) => {
                    return Err(CoreError::Conflict(MSG_DUPLICATE_SUBMISSION.into()).into())
                }
            }
        }
        FormMode::Edit(id) => {
            fields.validate_required()?;

            let owner = projects.get(&id).map(|p| p.member_email.clone());
            match owner {
                None => {
                    tracing::info!(%id, "Edit target vanished, nothing to update");
                    SubmitOutcome::Ignored(id)
                }
                Some(owner) => {
                    let key = fields.duplicate_key(&owner);
                    if projects.find_duplicate(&key, Some(&id)).is_some() {
                        return Err(CoreError::Conflict(MSG_DUPLICATE_SUBMISSION.into()).into());
                    }
                    match projects.update(&id, fields.into_update(upload.image)).await? {
                        Some(record) => SubmitOutcome::Updated(record),
                        None => SubmitOutcome::Ignored(id),
                    }
                }
            }
        }
    };

    session.reset_form();
    Ok(outcome)
}

/// Enter edit mode for a record owned by the verified member.
pub async fn begin_edit(state: &AppState, id: ProjectId) -> AppResult<FormFields> {
    let projects = state.projects.lock().await;
    let mut session = state.session.lock().await;

    let member = require_member(session.member.as_ref())?;
    let record = projects.get(&id).ok_or_else(|| CoreError::NotFound {
        entity: ENTITY_PROJECT,
        id: id.to_string(),
    })?;
    if !record.is_owned_by(member.id()) {
        return Err(CoreError::Forbidden("You can only edit your own projects".into()).into());
    }

    let fields = FormFields::from_record(record);
    session.begin_edit(id);
    Ok(fields)
}

/// Delete a record owned by the verified member. Deleting an absent id is a
/// no-op. Deleting the record being edited returns the form to create mode.
pub async fn delete(state: &AppState, id: &ProjectId) -> AppResult<bool> {
    let mut projects = state.projects.lock().await;
    let mut session = state.session.lock().await;

    let member = require_member(session.member.as_ref())?;
    if let Some(record) = projects.get(id) {
        if !record.is_owned_by(member.id()) {
            return Err(
                CoreError::Forbidden("You can only delete your own projects".into()).into(),
            );
        }
    }

    let deleted = projects.delete(id).await?;
    if session.form.editing_id() == Some(id) {
        session.reset_form();
    }
    Ok(deleted)
}

/// Leave edit mode without saving.
pub async fn reset(state: &AppState) {
    state.session.lock().await.reset_form();
}
