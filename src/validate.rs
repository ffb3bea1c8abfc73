//! Structural validation of mutation payloads.
//!
//! Pure functions: a raw payload either normalizes into a typed change-set
//! or fails with a specific [`ValidationError`]. Validation always completes
//! before any store call, so a mutation is never partially applied.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::exercise::SETS_PER_RECORD;
use crate::models::{ExerciseChanges, SessionChanges, SessionType, MAX_COMMENT_CHARS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("trying to update - missing fields")]
    MissingFields,
    #[error("trying to update - weight and rep not matching")]
    LengthMismatch,
    #[error("trying to update - weight and rep not a number")]
    NotNumeric,
    #[error("trying to update - weight and rep should have 3 values each")]
    WrongArity,
    #[error("type is not a valid exercise type reference")]
    InvalidTypeRef,
    #[error("type must be one of: Upper A, Lower, Upper B, Other")]
    InvalidSessionType,
    #[error("comment must be at most 30 characters")]
    CommentTooLong,
}

/// Raw exercise-record update payload. Fields stay untyped JSON so every
/// malformed shape reaches the validation rules instead of a serde reject.
#[derive(Debug, Default, Deserialize)]
pub struct ExercisePayload {
    #[serde(rename = "type")]
    pub exercise_type: Option<Value>,
    pub weight: Option<Value>,
    pub rep: Option<Value>,
}

/// Raw session create/update payload.
#[derive(Debug, Default, Deserialize)]
pub struct SessionPayload {
    #[serde(rename = "type")]
    pub session_type: Option<String>,
    pub body_weight: Option<Value>,
    pub comment: Option<String>,
    pub is_done: Option<bool>,
}

/// Exercise-record update rules, first failure wins:
/// 1. `type`, `weight`, `rep` present and non-empty
/// 2. `weight` and `rep` lengths match
/// 3. every element numeric
/// 4. exactly three sets
pub fn validate_exercise_update(payload: &ExercisePayload) -> Result<ExerciseChanges, ValidationError> {
    let type_value = present(&payload.exercise_type).ok_or(ValidationError::MissingFields)?;
    let weight_value = present(&payload.weight).ok_or(ValidationError::MissingFields)?;
    let rep_value = present(&payload.rep).ok_or(ValidationError::MissingFields)?;

    // Scalars have no length to compare, so they fail as non-numeric
    let weight_items = weight_value.as_array().ok_or(ValidationError::NotNumeric)?;
    let rep_items = rep_value.as_array().ok_or(ValidationError::NotNumeric)?;

    if weight_items.len() != rep_items.len() {
        return Err(ValidationError::LengthMismatch);
    }

    let weight = numeric_elements(weight_items)?;
    let rep = numeric_elements(rep_items)?;

    if weight.len() != SETS_PER_RECORD {
        return Err(ValidationError::WrongArity);
    }

    let type_id = type_value
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or(ValidationError::InvalidTypeRef)?;

    Ok(ExerciseChanges { type_id, weight, rep })
}

/// Session rules: `type` within the enumeration, `body_weight` numeric and
/// present, `comment` bounded. Applied to both create and update.
pub fn validate_session(payload: &SessionPayload) -> Result<SessionChanges, ValidationError> {
    let session_type = payload
        .session_type
        .as_deref()
        .ok_or(ValidationError::MissingFields)
        .and_then(|s| SessionType::parse(s).ok_or(ValidationError::InvalidSessionType))?;

    let body_weight = present(&payload.body_weight)
        .ok_or(ValidationError::MissingFields)?
        .as_f64()
        .ok_or(ValidationError::NotNumeric)?;

    if let Some(comment) = &payload.comment {
        if comment.chars().count() > MAX_COMMENT_CHARS {
            return Err(ValidationError::CommentTooLong);
        }
    }

    Ok(SessionChanges {
        session_type,
        body_weight,
        comment: payload.comment.clone(),
        is_done: payload.is_done,
    })
}

/// A field counts as present when it is provided, non-null, and non-empty.
fn present(field: &Option<Value>) -> Option<&Value> {
    match field {
        Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::Array(a)) if a.is_empty() => None,
        Some(v) => Some(v),
        None => None,
    }
}

fn numeric_elements(items: &[Value]) -> Result<Vec<f64>, ValidationError> {
    items
        .iter()
        .map(|v| v.as_f64().ok_or(ValidationError::NotNumeric))
        .collect()
}
