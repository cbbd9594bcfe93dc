//! Handlers for the `/membership` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use showcase_core::error::CoreError;
use showcase_core::member::{Member, MembershipQuery};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Verification state of the local user.
#[derive(Debug, Serialize)]
pub struct MembershipStatus {
    pub verified: bool,
    pub member: Option<Member>,
}

impl MembershipStatus {
    fn from_member(member: Option<Member>) -> Self {
        Self {
            verified: member.is_some(),
            member,
        }
    }
}

/// Body of a verify request. Either field may be omitted.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// GET /api/v1/membership
pub async fn current(State(state): State<AppState>) -> Json<DataResponse<MembershipStatus>> {
    let member = state.session.lock().await.member.clone();
    Json(DataResponse {
        data: MembershipStatus::from_member(member),
    })
}

/// POST /api/v1/membership/verify
///
/// Look the member up remotely. A match is cached; no match clears the
/// cache. A failed lookup keeps whatever was cached and reports 503.
pub async fn verify(
    State(state): State<AppState>,
    Json(input): Json<VerifyRequest>,
) -> AppResult<Json<DataResponse<MembershipStatus>>> {
    let query = MembershipQuery::new(input.email.as_deref(), input.phone.as_deref()).normalized()?;

    let _permit = state.verification.try_acquire().ok_or_else(|| {
        CoreError::Conflict("Membership verification is already in progress".into())
    })?;

    let found = state.membership.find_member(&query).await?;

    let mut session = state.session.lock().await;
    session
        .set_member(state.store.as_ref(), found.clone())
        .await?;

    match &found {
        Some(member) => tracing::info!(member = %member.id(), "Membership verified"),
        None => tracing::info!("No paid membership found"),
    }

    Ok(Json(DataResponse {
        data: MembershipStatus::from_member(found),
    }))
}

/// DELETE /api/v1/membership
pub async fn sign_out(State(state): State<AppState>) -> AppResult<StatusCode> {
    let mut session = state.session.lock().await;
    session.set_member(state.store.as_ref(), None).await?;
    tracing::info!("Member signed out");
    Ok(StatusCode::NO_CONTENT)
}
