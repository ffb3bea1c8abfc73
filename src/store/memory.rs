use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    ExerciseChanges, ExerciseRecord, ExerciseType, NewExerciseRecord, NewSession,
    PopulatedExerciseRecord, Session, SessionChanges,
};
use crate::store::{Store, StoreError};

/// In-memory store for development and tests. Owner scoping follows the
/// same contract as the Postgres driver: the id and owner match happen in
/// one lookup, so a foreign record reads as absent.
#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<Documents>,
}

#[derive(Default)]
struct Documents {
    exercise_types: HashMap<Uuid, ExerciseType>,
    exercises: HashMap<Uuid, ExerciseRecord>,
    sessions: HashMap<Uuid, Session>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn owned<'a, T>(map: &'a HashMap<Uuid, T>, id: Uuid, owner: Uuid, owner_of: impl Fn(&T) -> Uuid) -> Option<&'a T> {
    map.get(&id).filter(|doc| owner_of(doc) == owner)
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_exercise_types(&self) -> Result<Vec<ExerciseType>, StoreError> {
        let docs = self.docs.read().await;
        let mut types: Vec<_> = docs.exercise_types.values().cloned().collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }

    async fn create_exercise_type(&self, name: &str, category: &str) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let mut docs = self.docs.write().await;
        docs.exercise_types.insert(
            id,
            ExerciseType {
                id,
                name: name.to_string(),
                category: category.to_string(),
            },
        );
        Ok(id)
    }

    async fn list_exercises(&self, owner: Uuid) -> Result<Vec<PopulatedExerciseRecord>, StoreError> {
        let docs = self.docs.read().await;
        let mut records: Vec<_> = docs
            .exercises
            .values()
            .filter(|r| r.owner_id == owner)
            .map(|r| PopulatedExerciseRecord {
                id: r.id,
                date: r.date,
                exercise_type: docs.exercise_types.get(&r.type_id).cloned(),
                weight: r.weight.clone(),
                rep: r.rep.clone(),
                owner_id: r.owner_id,
            })
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    async fn get_exercise(&self, id: Uuid, owner: Uuid) -> Result<Option<ExerciseRecord>, StoreError> {
        let docs = self.docs.read().await;
        Ok(owned(&docs.exercises, id, owner, |r| r.owner_id).cloned())
    }

    async fn create_exercise(&self, new: NewExerciseRecord) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let mut docs = self.docs.write().await;
        docs.exercises.insert(
            id,
            ExerciseRecord {
                id,
                date: Utc::now(),
                type_id: new.type_id,
                weight: new.weight,
                rep: new.rep,
                owner_id: new.owner_id,
            },
        );
        Ok(id)
    }

    async fn update_exercise(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: ExerciseChanges,
    ) -> Result<Option<ExerciseRecord>, StoreError> {
        let mut docs = self.docs.write().await;
        let record = docs
            .exercises
            .get_mut(&id)
            .filter(|r| r.owner_id == owner)
            .map(|r| {
                r.type_id = changes.type_id;
                r.weight = changes.weight;
                r.rep = changes.rep;
                r.clone()
            });
        Ok(record)
    }

    async fn delete_exercise(&self, id: Uuid, owner: Uuid) -> Result<Option<ExerciseRecord>, StoreError> {
        let mut docs = self.docs.write().await;
        if owned(&docs.exercises, id, owner, |r| r.owner_id).is_none() {
            return Ok(None);
        }
        Ok(docs.exercises.remove(&id))
    }

    async fn list_sessions(&self, owner: Uuid) -> Result<Vec<Session>, StoreError> {
        let docs = self.docs.read().await;
        let mut sessions: Vec<_> = docs
            .sessions
            .values()
            .filter(|s| s.owner_id == owner)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.date);
        Ok(sessions)
    }

    async fn get_session(&self, id: Uuid, owner: Uuid) -> Result<Option<Session>, StoreError> {
        let docs = self.docs.read().await;
        Ok(owned(&docs.sessions, id, owner, |s| s.owner_id).cloned())
    }

    async fn create_session(&self, new: NewSession) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let mut docs = self.docs.write().await;
        docs.sessions.insert(
            id,
            Session {
                id,
                date: Utc::now(),
                session_type: new.session_type,
                body_weight: new.body_weight,
                exercise_records: Vec::new(),
                is_done: false,
                owner_id: new.owner_id,
                comment: new.comment,
            },
        );
        Ok(id)
    }

    async fn update_session(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: SessionChanges,
    ) -> Result<Option<Session>, StoreError> {
        let mut docs = self.docs.write().await;
        let session = docs
            .sessions
            .get_mut(&id)
            .filter(|s| s.owner_id == owner)
            .map(|s| {
                s.session_type = changes.session_type;
                s.body_weight = changes.body_weight;
                s.comment = changes.comment;
                if let Some(is_done) = changes.is_done {
                    s.is_done = is_done;
                }
                s.clone()
            });
        Ok(session)
    }

    async fn delete_session(&self, id: Uuid, owner: Uuid) -> Result<Option<Session>, StoreError> {
        let mut docs = self.docs.write().await;
        if owned(&docs.sessions, id, owner, |s| s.owner_id).is_none() {
            return Ok(None);
        }
        Ok(docs.sessions.remove(&id))
    }

    async fn attach_exercise(
        &self,
        session_id: Uuid,
        record_id: Uuid,
        owner: Uuid,
    ) -> Result<Option<Session>, StoreError> {
        let mut docs = self.docs.write().await;
        if owned(&docs.exercises, record_id, owner, |r| r.owner_id).is_none() {
            return Ok(None);
        }
        let session = docs
            .sessions
            .get_mut(&session_id)
            .filter(|s| s.owner_id == owner)
            .map(|s| {
                s.exercise_records.push(record_id);
                s.clone()
            });
        Ok(session)
    }
}
