//! Resource store abstraction.
//!
//! Every read-one, update, and delete method takes the caller's id and the
//! implementation MUST apply `id AND owner` in the single store query, not
//! as a post-fetch check. A record belonging to another caller therefore
//! yields the same `None` as a non-existent identifier, so existence never
//! leaks across owners. List methods filter by owner only; create methods
//! receive the owner already stamped from the authenticated identity.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    ExerciseChanges, ExerciseRecord, ExerciseType, NewExerciseRecord, NewSession,
    PopulatedExerciseRecord, Session, SessionChanges,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors from store drivers
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("query error: {0}")]
    Query(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn health_check(&self) -> Result<(), StoreError>;

    // Exercise type catalog (shared, not owner-scoped)
    async fn list_exercise_types(&self) -> Result<Vec<ExerciseType>, StoreError>;
    async fn create_exercise_type(&self, name: &str, category: &str) -> Result<Uuid, StoreError>;

    // Exercise records
    async fn list_exercises(&self, owner: Uuid) -> Result<Vec<PopulatedExerciseRecord>, StoreError>;
    async fn get_exercise(&self, id: Uuid, owner: Uuid) -> Result<Option<ExerciseRecord>, StoreError>;
    async fn create_exercise(&self, new: NewExerciseRecord) -> Result<Uuid, StoreError>;
    async fn update_exercise(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: ExerciseChanges,
    ) -> Result<Option<ExerciseRecord>, StoreError>;
    async fn delete_exercise(&self, id: Uuid, owner: Uuid) -> Result<Option<ExerciseRecord>, StoreError>;

    // Sessions
    async fn list_sessions(&self, owner: Uuid) -> Result<Vec<Session>, StoreError>;
    async fn get_session(&self, id: Uuid, owner: Uuid) -> Result<Option<Session>, StoreError>;
    async fn create_session(&self, new: NewSession) -> Result<Uuid, StoreError>;
    async fn update_session(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: SessionChanges,
    ) -> Result<Option<Session>, StoreError>;
    async fn delete_session(&self, id: Uuid, owner: Uuid) -> Result<Option<Session>, StoreError>;

    /// Append an exercise record to a session's list. Both documents must
    /// belong to `owner`; otherwise `None`, indistinguishable from absent.
    async fn attach_exercise(
        &self,
        session_id: Uuid,
        record_id: Uuid,
        owner: Uuid,
    ) -> Result<Option<Session>, StoreError>;
}
