use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Number of sets a persisted exercise record must carry.
pub const SETS_PER_RECORD: usize = 3;

/// Catalog entry describing a movement (name/category). Shared across
/// callers, referenced by exercise records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ExerciseType {
    pub id: Uuid,
    pub name: String,
    pub category: String,
}

/// A logged set of weight/rep measurements for one exercise type on one
/// occasion. `weight` and `rep` run in parallel, one entry per set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ExerciseRecord {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub type_id: Uuid,
    pub weight: Vec<f64>,
    pub rep: Vec<f64>,
    pub owner_id: Uuid,
}

/// Exercise record with the type reference resolved on read, as returned
/// by the list endpoint. A dangling reference resolves to `None`.
#[derive(Debug, Clone, Serialize)]
pub struct PopulatedExerciseRecord {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub exercise_type: Option<ExerciseType>,
    pub weight: Vec<f64>,
    pub rep: Vec<f64>,
    pub owner_id: Uuid,
}

/// Fields for a new record. `owner_id` always comes from the authenticated
/// caller and `date` is stamped at creation, never taken from the payload.
#[derive(Debug, Clone)]
pub struct NewExerciseRecord {
    pub type_id: Uuid,
    pub weight: Vec<f64>,
    pub rep: Vec<f64>,
    pub owner_id: Uuid,
}

/// Validated update change-set: full replace of type/weight/rep.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseChanges {
    pub type_id: Uuid,
    pub weight: Vec<f64>,
    pub rep: Vec<f64>,
}
