//! Database repository for the question store.
//!
//! The store is append-only: questions are inserted during a fetch cycle and
//! never updated or deleted. All reads and writes of one request run on a
//! single transaction, so a failed request leaves no partial batch behind.

use chrono::Utc;
use sqlx::{Row, Sqlite, SqliteConnection, SqlitePool, Transaction};
use std::collections::HashSet;

use crate::errors::AppError;
use crate::models::{FetchedCandidate, StoredQuestion};

/// Database repository for all question operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Begin a transaction scoped to one request.
    ///
    /// Dropping the transaction without committing rolls everything back,
    /// so every exit path releases the connection.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, AppError> {
        Ok(self.pool.begin().await?)
    }

    /// Return the question with the highest sequential id, if any.
    pub async fn most_recent(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<Option<StoredQuestion>, AppError> {
        let row = sqlx::query(
            "SELECT id, external_id, question, answer, source_created_at, stored_at
             FROM questions ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(conn)
        .await?;

        Ok(row.as_ref().map(question_from_row))
    }

    /// Exact lookup by the provider-assigned identifier.
    pub async fn find_by_external_id(
        &self,
        conn: &mut SqliteConnection,
        external_id: i64,
    ) -> Result<Option<StoredQuestion>, AppError> {
        let row = sqlx::query(
            "SELECT id, external_id, question, answer, source_created_at, stored_at
             FROM questions WHERE external_id = ?",
        )
        .bind(external_id)
        .fetch_optional(conn)
        .await?;

        Ok(row.as_ref().map(question_from_row))
    }

    /// All provider identifiers currently stored, for bulk membership checks.
    pub async fn list_external_ids(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<HashSet<i64>, AppError> {
        let rows = sqlx::query("SELECT external_id FROM questions")
            .fetch_all(conn)
            .await?;

        Ok(rows.iter().map(|row| row.get("external_id")).collect())
    }

    /// Append a candidate and assign it the next sequential id.
    ///
    /// Returns `None` when a row with the same external id already exists;
    /// the insert is skipped, never rejected.
    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        candidate: &FetchedCandidate,
    ) -> Result<Option<StoredQuestion>, AppError> {
        let stored_at = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO questions (external_id, question, answer, source_created_at, stored_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(external_id) DO NOTHING",
        )
        .bind(candidate.id)
        .bind(&candidate.question)
        .bind(&candidate.answer)
        .bind(&candidate.created_at)
        .bind(&stored_at)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(StoredQuestion {
            id: result.last_insert_rowid(),
            external_id: candidate.id,
            question: candidate.question.clone(),
            answer: candidate.answer.clone(),
            source_created_at: candidate.created_at.clone(),
            stored_at,
        }))
    }
}

// Helper function for row conversion

fn question_from_row(row: &sqlx::sqlite::SqliteRow) -> StoredQuestion {
    StoredQuestion {
        id: row.get("id"),
        external_id: row.get("external_id"),
        question: row.get("question"),
        answer: row.get("answer"),
        source_created_at: row.get("source_created_at"),
        stored_at: row.get("stored_at"),
    }
}
