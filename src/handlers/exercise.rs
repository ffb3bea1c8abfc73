use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{ExerciseRecord, NewExerciseRecord, PopulatedExerciseRecord};
use crate::routes::AppState;
use crate::validate::{self, ExercisePayload};

const NOT_FOUND_MSG: &str = "User Exercise - Unauthorized or not found";

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: Uuid,
}

/// Create payload. Any caller-supplied owner field is ignored; the owner
/// always comes from the authenticated identity.
#[derive(Debug, Deserialize)]
pub struct CreateExercise {
    #[serde(rename = "type")]
    pub type_id: Uuid,
    pub weight: Vec<f64>,
    pub rep: Vec<f64>,
}

/// GET /exercise-user - all records owned by the caller, type resolved
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<PopulatedExerciseRecord>> {
    let records = state.store.list_exercises(user.id).await?;
    Ok(ApiResponse::success(records))
}

/// GET /exercise-user/:id - one owned record
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<ExerciseRecord> {
    let record = state
        .store
        .get_exercise(id, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND_MSG))?;
    Ok(ApiResponse::success(record))
}

/// POST /exercise-user - create a record, stamping date and owner
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateExercise>,
) -> ApiResult<Created> {
    let id = state
        .store
        .create_exercise(NewExerciseRecord {
            type_id: payload.type_id,
            weight: payload.weight,
            rep: payload.rep,
            owner_id: user.id,
        })
        .await?;
    tracing::debug!("created exercise record {} for {}", id, user.name);
    Ok(ApiResponse::created(Created { id }))
}

/// PUT /exercise-user/:id - validated full replace of type/weight/rep
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ExercisePayload>,
) -> ApiResult<ExerciseRecord> {
    let changes = validate::validate_exercise_update(&payload)?;
    let record = state
        .store
        .update_exercise(id, user.id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND_MSG))?;
    Ok(ApiResponse::accepted(record))
}

/// DELETE /exercise-user/:id - remove an owned record
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<()> {
    state
        .store
        .delete_exercise(id, user.id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Trying to delete Exercise User - Unauthorized or not found"))?;
    Ok(ApiResponse::no_content())
}
