//! Letter Repository Implementation
//!
//! PostgreSQL implementation of the LetterRepository trait. Folio
//! allocation runs `max(folio) + 1` and the insert in one transaction;
//! the unique index on folio turns a lost race into a retryable conflict
//! instead of a duplicated folio.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use crate::domain::{LetterRepository, LetterRequest};
use crate::shared::error::AppError;

#[derive(FromRow)]
struct LetterRequestRow {
    id: i32,
    folio: i32,
    issued_on: NaiveDate,
    created_at: DateTime<Utc>,
}

impl LetterRequestRow {
    fn into_request(self) -> LetterRequest {
        LetterRequest {
            id: self.id,
            folio: self.folio,
            issued_on: self.issued_on,
            created_at: self.created_at,
        }
    }
}

/// PostgreSQL letter repository implementation.
#[derive(Clone)]
pub struct PgLetterRepository {
    pool: PgPool,
}

impl PgLetterRepository {
    /// Create a new PgLetterRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LetterRepository for PgLetterRepository {
    async fn allocate_folio(&self) -> Result<LetterRequest, AppError> {
        let mut tx = self.pool.begin().await?;

        let folio = sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(folio), 0) + 1 FROM letter_requests",
        )
        .fetch_one(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, LetterRequestRow>(
            r#"
            INSERT INTO letter_requests (folio)
            VALUES ($1)
            RETURNING id, folio, issued_on, created_at
            "#,
        )
        .bind(folio)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Folio already allocated, retry the request".into())
            }
            _ => AppError::Database(e),
        })?;

        tx.commit().await?;
        Ok(row.into_request())
    }
}
