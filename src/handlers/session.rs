use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{NewSession, Session};
use crate::routes::AppState;
use crate::validate::{self, SessionPayload};

const NOT_FOUND_MSG: &str = "Session - Unauthorized or not found";

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: Uuid,
}

/// GET /session - all sessions owned by the caller
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<Session>> {
    let sessions = state.store.list_sessions(user.id).await?;
    Ok(ApiResponse::success(sessions))
}

/// GET /session/:id - one owned session
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Session> {
    let session = state
        .store
        .get_session(id, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND_MSG))?;
    Ok(ApiResponse::success(session))
}

/// POST /session - create with defaults date=now, is_done=false
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<SessionPayload>,
) -> ApiResult<Created> {
    let changes = validate::validate_session(&payload)?;
    let id = state
        .store
        .create_session(NewSession {
            session_type: changes.session_type,
            body_weight: changes.body_weight,
            comment: changes.comment,
            owner_id: user.id,
        })
        .await?;
    tracing::debug!("created session {} for {}", id, user.name);
    Ok(ApiResponse::created(Created { id }))
}

/// PUT /session/:id - validated update of type/body_weight/comment/is_done
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<SessionPayload>,
) -> ApiResult<Session> {
    let changes = validate::validate_session(&payload)?;
    let session = state
        .store
        .update_session(id, user.id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND_MSG))?;
    Ok(ApiResponse::accepted(session))
}

/// DELETE /session/:id - remove an owned session
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<()> {
    state
        .store
        .delete_session(id, user.id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Trying to delete Session - Unauthorized or not found"))?;
    Ok(ApiResponse::no_content())
}

/// POST /session/:id/exercise-user/:record_id - attach an owned exercise
/// record to an owned session's list
pub async fn attach(
    State(state): State<AppState>,
    Path((id, record_id)): Path<(Uuid, Uuid)>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Session> {
    let session = state
        .store
        .attach_exercise(id, record_id, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND_MSG))?;
    Ok(ApiResponse::success(session))
}
