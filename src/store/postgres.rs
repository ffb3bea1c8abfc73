use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{
    ExerciseChanges, ExerciseRecord, ExerciseType, NewExerciseRecord, NewSession,
    PopulatedExerciseRecord, Session, SessionChanges, SessionType,
};
use crate::store::{Store, StoreError};

/// Postgres-backed store. One pool for the whole service; every
/// owner-scoped query carries `owner_id` next to the id match.
pub struct PgStore {
    pool: PgPool,
}

const SCHEMA_SQL: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS exercise_types (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name TEXT NOT NULL,
        category TEXT NOT NULL DEFAULT ''
    )"#,
    r#"CREATE TABLE IF NOT EXISTS exercise_records (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        date TIMESTAMPTZ NOT NULL DEFAULT now(),
        type_id UUID NOT NULL,
        weight FLOAT8[] NOT NULL,
        rep FLOAT8[] NOT NULL,
        owner_id UUID NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS sessions (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        date TIMESTAMPTZ NOT NULL DEFAULT now(),
        "type" TEXT NOT NULL,
        body_weight FLOAT8 NOT NULL,
        exercise_records UUID[] NOT NULL DEFAULT '{}',
        is_done BOOLEAN NOT NULL DEFAULT FALSE,
        owner_id UUID NOT NULL,
        comment TEXT
    )"#,
];

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let store = Self { pool };
        store.ensure_schema().await?;
        tracing::info!("connected to postgres store");
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA_SQL {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

fn session_from_row(row: &PgRow) -> Result<Session, StoreError> {
    let type_label: String = row.try_get("type")?;
    let session_type = SessionType::parse(&type_label)
        .ok_or_else(|| StoreError::Query(format!("unknown session type in store: {}", type_label)))?;

    Ok(Session {
        id: row.try_get("id")?,
        date: row.try_get("date")?,
        session_type,
        body_weight: row.try_get("body_weight")?,
        exercise_records: row.try_get("exercise_records")?,
        is_done: row.try_get("is_done")?,
        owner_id: row.try_get("owner_id")?,
        comment: row.try_get("comment")?,
    })
}

const SESSION_COLUMNS: &str = r#"id, date, "type", body_weight, exercise_records, is_done, owner_id, comment"#;

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_exercise_types(&self) -> Result<Vec<ExerciseType>, StoreError> {
        let types = sqlx::query_as::<_, ExerciseType>(
            "SELECT id, name, category FROM exercise_types ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(types)
    }

    async fn create_exercise_type(&self, name: &str, category: &str) -> Result<Uuid, StoreError> {
        let row = sqlx::query("INSERT INTO exercise_types (name, category) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(category)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("id")?)
    }

    async fn list_exercises(&self, owner: Uuid) -> Result<Vec<PopulatedExerciseRecord>, StoreError> {
        // LEFT JOIN keeps records whose type reference no longer resolves
        let rows = sqlx::query(
            "SELECT r.id, r.date, r.weight, r.rep, r.owner_id, \
                    t.id AS type_id, t.name AS type_name, t.category AS type_category \
             FROM exercise_records r \
             LEFT JOIN exercise_types t ON t.id = r.type_id \
             WHERE r.owner_id = $1 \
             ORDER BY r.date",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let type_id: Option<Uuid> = row.try_get("type_id")?;
                let exercise_type = match type_id {
                    Some(id) => Some(ExerciseType {
                        id,
                        name: row.try_get("type_name")?,
                        category: row.try_get("type_category")?,
                    }),
                    None => None,
                };
                Ok(PopulatedExerciseRecord {
                    id: row.try_get("id")?,
                    date: row.try_get("date")?,
                    exercise_type,
                    weight: row.try_get("weight")?,
                    rep: row.try_get("rep")?,
                    owner_id: row.try_get("owner_id")?,
                })
            })
            .collect()
    }

    async fn get_exercise(&self, id: Uuid, owner: Uuid) -> Result<Option<ExerciseRecord>, StoreError> {
        let record = sqlx::query_as::<_, ExerciseRecord>(
            "SELECT id, date, type_id, weight, rep, owner_id \
             FROM exercise_records WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn create_exercise(&self, new: NewExerciseRecord) -> Result<Uuid, StoreError> {
        let row = sqlx::query(
            "INSERT INTO exercise_records (type_id, weight, rep, owner_id) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(new.type_id)
        .bind(&new.weight)
        .bind(&new.rep)
        .bind(new.owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.try_get("id")?)
    }

    async fn update_exercise(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: ExerciseChanges,
    ) -> Result<Option<ExerciseRecord>, StoreError> {
        let record = sqlx::query_as::<_, ExerciseRecord>(
            "UPDATE exercise_records SET type_id = $3, weight = $4, rep = $5 \
             WHERE id = $1 AND owner_id = $2 \
             RETURNING id, date, type_id, weight, rep, owner_id",
        )
        .bind(id)
        .bind(owner)
        .bind(changes.type_id)
        .bind(&changes.weight)
        .bind(&changes.rep)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn delete_exercise(&self, id: Uuid, owner: Uuid) -> Result<Option<ExerciseRecord>, StoreError> {
        let record = sqlx::query_as::<_, ExerciseRecord>(
            "DELETE FROM exercise_records WHERE id = $1 AND owner_id = $2 \
             RETURNING id, date, type_id, weight, rep, owner_id",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn list_sessions(&self, owner: Uuid) -> Result<Vec<Session>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM sessions WHERE owner_id = $1 ORDER BY date",
            SESSION_COLUMNS
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(session_from_row).collect()
    }

    async fn get_session(&self, id: Uuid, owner: Uuid) -> Result<Option<Session>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM sessions WHERE id = $1 AND owner_id = $2",
            SESSION_COLUMNS
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(session_from_row).transpose()
    }

    async fn create_session(&self, new: NewSession) -> Result<Uuid, StoreError> {
        let row = sqlx::query(
            "INSERT INTO sessions (\"type\", body_weight, comment, owner_id) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(new.session_type.as_str())
        .bind(new.body_weight)
        .bind(&new.comment)
        .bind(new.owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.try_get("id")?)
    }

    async fn update_session(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: SessionChanges,
    ) -> Result<Option<Session>, StoreError> {
        let row = sqlx::query(&format!(
            "UPDATE sessions SET \"type\" = $3, body_weight = $4, comment = $5, \
                    is_done = COALESCE($6, is_done) \
             WHERE id = $1 AND owner_id = $2 RETURNING {}",
            SESSION_COLUMNS
        ))
        .bind(id)
        .bind(owner)
        .bind(changes.session_type.as_str())
        .bind(changes.body_weight)
        .bind(&changes.comment)
        .bind(changes.is_done)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(session_from_row).transpose()
    }

    async fn delete_session(&self, id: Uuid, owner: Uuid) -> Result<Option<Session>, StoreError> {
        let row = sqlx::query(&format!(
            "DELETE FROM sessions WHERE id = $1 AND owner_id = $2 RETURNING {}",
            SESSION_COLUMNS
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(session_from_row).transpose()
    }

    async fn attach_exercise(
        &self,
        session_id: Uuid,
        record_id: Uuid,
        owner: Uuid,
    ) -> Result<Option<Session>, StoreError> {
        // Single statement: both the session and the record must belong to
        // the caller or nothing matches
        let row = sqlx::query(&format!(
            "UPDATE sessions SET exercise_records = array_append(exercise_records, $2) \
             WHERE id = $1 AND owner_id = $3 \
               AND EXISTS (SELECT 1 FROM exercise_records r WHERE r.id = $2 AND r.owner_id = $3) \
             RETURNING {}",
            SESSION_COLUMNS
        ))
        .bind(session_id)
        .bind(record_id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(session_from_row).transpose()
    }
}
