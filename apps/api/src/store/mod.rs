//! Candidate store — persistence boundary for the screening pipeline.
//!
//! All cross-request candidate state goes through `CandidateStore`, keyed by
//! candidate id. The production backend is a single Postgres table with the
//! aggregate's lists held as jsonb:
//!
//! ```sql
//! CREATE TABLE candidates (
//!     id          UUID PRIMARY KEY,
//!     full_name   TEXT NOT NULL,
//!     id_number   TEXT NOT NULL,
//!     email       TEXT NOT NULL,
//!     skills      JSONB NOT NULL DEFAULT '[]',
//!     questions   JSONB NOT NULL DEFAULT '[]',
//!     verdicts    JSONB NOT NULL DEFAULT '[]',
//!     stage       TEXT NOT NULL,
//!     has_passed  BOOLEAN,
//!     created_at  TIMESTAMPTZ NOT NULL
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use uuid::Uuid;

use crate::models::candidate::{
    CandidateRecord, EvaluationVerdict, GeneratedQuestion, SkillDeclaration, Stage,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored record is corrupt: unknown stage '{0}'")]
    UnknownStage(String),
}

/// Insert/find/update over the candidate aggregate, keyed by candidate id.
/// Single writer per key is assumed; there is no cross-candidate state.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn insert(&self, record: &CandidateRecord) -> Result<(), StoreError>;
    async fn find(&self, id: Uuid) -> Result<Option<CandidateRecord>, StoreError>;
    async fn update(&self, record: &CandidateRecord) -> Result<(), StoreError>;
}

#[derive(Debug, FromRow)]
struct CandidateRow {
    id: Uuid,
    full_name: String,
    id_number: String,
    email: String,
    skills: Json<Vec<SkillDeclaration>>,
    questions: Json<Vec<GeneratedQuestion>>,
    verdicts: Json<Vec<EvaluationVerdict>>,
    stage: String,
    has_passed: Option<bool>,
    created_at: DateTime<Utc>,
}

impl CandidateRow {
    fn into_record(self) -> Result<CandidateRecord, StoreError> {
        let stage =
            Stage::parse(&self.stage).ok_or_else(|| StoreError::UnknownStage(self.stage.clone()))?;
        Ok(CandidateRecord {
            id: self.id,
            full_name: self.full_name,
            id_number: self.id_number,
            email: self.email,
            skills: self.skills.0,
            questions: self.questions.0,
            verdicts: self.verdicts.0,
            stage,
            has_passed: self.has_passed,
            created_at: self.created_at,
        })
    }
}

/// Postgres-backed candidate store.
pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn insert(&self, record: &CandidateRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO candidates
                (id, full_name, id_number, email, skills, questions, verdicts,
                 stage, has_passed, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(record.id)
        .bind(&record.full_name)
        .bind(&record.id_number)
        .bind(&record.email)
        .bind(Json(&record.skills))
        .bind(Json(&record.questions))
        .bind(Json(&record.verdicts))
        .bind(record.stage.as_str())
        .bind(record.has_passed)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<CandidateRecord>, StoreError> {
        let row: Option<CandidateRow> = sqlx::query_as(
            r#"
            SELECT id, full_name, id_number, email, skills, questions, verdicts,
                   stage, has_passed, created_at
            FROM candidates
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CandidateRow::into_record).transpose()
    }

    async fn update(&self, record: &CandidateRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE candidates
            SET skills = $2, questions = $3, verdicts = $4, stage = $5, has_passed = $6
            WHERE id = $1
            "#,
        )
        .bind(record.id)
        .bind(Json(&record.skills))
        .bind(Json(&record.questions))
        .bind(Json(&record.verdicts))
        .bind(record.stage.as_str())
        .bind(record.has_passed)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
pub mod memory {
    //! In-memory store for pipeline tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryCandidateStore {
        records: Mutex<HashMap<Uuid, CandidateRecord>>,
    }

    impl MemoryCandidateStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl CandidateStore for MemoryCandidateStore {
        async fn insert(&self, record: &CandidateRecord) -> Result<(), StoreError> {
            self.records
                .lock()
                .unwrap()
                .insert(record.id, record.clone());
            Ok(())
        }

        async fn find(&self, id: Uuid) -> Result<Option<CandidateRecord>, StoreError> {
            Ok(self.records.lock().unwrap().get(&id).cloned())
        }

        async fn update(&self, record: &CandidateRecord) -> Result<(), StoreError> {
            self.records
                .lock()
                .unwrap()
                .insert(record.id, record.clone());
            Ok(())
        }
    }
}
