use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::ExerciseType;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateExerciseType {
    pub name: String,
    #[serde(default)]
    pub category: String,
}

/// GET /exercise-type - the shared movement catalog
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ExerciseType>> {
    let types = state.store.list_exercise_types().await?;
    Ok(ApiResponse::success(types))
}

/// POST /exercise-type - add a catalog entry
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateExerciseType>,
) -> ApiResult<Created> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }
    let id = state
        .store
        .create_exercise_type(payload.name.trim(), &payload.category)
        .await?;
    Ok(ApiResponse::created(Created { id }))
}
