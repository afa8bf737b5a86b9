//! Observation Repository Implementation
//!
//! PostgreSQL implementation of the ObservationRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Observation, ObservationRepository};
use crate::shared::error::AppError;

/// Database row representation matching the observations table schema.
#[derive(Debug, sqlx::FromRow)]
struct ObservationRow {
    id: i32,
    practice_id: i32,
    body: String,
    created_at: DateTime<Utc>,
}

impl ObservationRow {
    fn into_observation(self) -> Observation {
        Observation {
            id: self.id,
            practice_id: self.practice_id,
            body: self.body,
            created_at: self.created_at,
        }
    }
}

/// PostgreSQL observation repository implementation.
#[derive(Clone)]
pub struct PgObservationRepository {
    pool: PgPool,
}

impl PgObservationRepository {
    /// Create a new PgObservationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ObservationRepository for PgObservationRepository {
    async fn create(&self, observation: &Observation) -> Result<Observation, AppError> {
        let row = sqlx::query_as::<_, ObservationRow>(
            r#"
            INSERT INTO observations (practice_id, body)
            VALUES ($1, $2)
            RETURNING id, practice_id, body, created_at
            "#,
        )
        .bind(observation.practice_id)
        .bind(&observation.body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound(format!(
                    "Practice with id {} not found",
                    observation.practice_id
                ))
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into_observation())
    }

    async fn list_by_practice(&self, practice_id: i32) -> Result<Vec<Observation>, AppError> {
        let rows = sqlx::query_as::<_, ObservationRow>(
            r#"
            SELECT id, practice_id, body, created_at
            FROM observations
            WHERE practice_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(practice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ObservationRow::into_observation).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Observation>, AppError> {
        let row = sqlx::query_as::<_, ObservationRow>(
            "SELECT id, practice_id, body, created_at FROM observations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_observation()))
    }

    async fn update(&self, id: i32, body: &str) -> Result<Observation, AppError> {
        let row = sqlx::query_as::<_, ObservationRow>(
            r#"
            UPDATE observations
            SET body = $2
            WHERE id = $1
            RETURNING id, practice_id, body, created_at
            "#,
        )
        .bind(id)
        .bind(body)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Observation with id {} not found", id)))?;

        Ok(row.into_observation())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM observations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Observation with id {} not found",
                id
            )));
        }

        Ok(())
    }
}
