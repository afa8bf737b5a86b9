//! Collaborator Repository Implementation
//!
//! PostgreSQL implementation of the CollaboratorRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Collaborator, CollaboratorRepository};
use crate::shared::error::AppError;
use crate::shared::pagination::{like_pattern, PageQuery};

/// Database row representation matching the collaborators table schema.
#[derive(Debug, sqlx::FromRow)]
struct CollaboratorRow {
    id: i32,
    rut: String,
    full_name: String,
    email: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    position: Option<String>,
    alma_mater: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CollaboratorRow {
    fn into_collaborator(self) -> Collaborator {
        Collaborator {
            id: self.id,
            rut: self.rut,
            full_name: self.full_name,
            email: self.email,
            address: self.address,
            phone: self.phone,
            position: self.position,
            alma_mater: self.alma_mater,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const SORT_COLUMNS: &[&str] = &["full_name", "rut", "position", "created_at"];

const COLLABORATOR_COLUMNS: &str =
    "id, rut, full_name, email, address, phone, position, alma_mater, created_at, updated_at";

/// PostgreSQL collaborator repository implementation.
#[derive(Clone)]
pub struct PgCollaboratorRepository {
    pool: PgPool,
}

impl PgCollaboratorRepository {
    /// Create a new PgCollaboratorRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollaboratorRepository for PgCollaboratorRepository {
    async fn create(&self, collaborator: &Collaborator) -> Result<Collaborator, AppError> {
        let row = sqlx::query_as::<_, CollaboratorRow>(&format!(
            r#"
            INSERT INTO collaborators (rut, full_name, email, address, phone, position, alma_mater)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLLABORATOR_COLUMNS}
            "#,
        ))
        .bind(&collaborator.rut)
        .bind(&collaborator.full_name)
        .bind(&collaborator.email)
        .bind(&collaborator.address)
        .bind(&collaborator.phone)
        .bind(&collaborator.position)
        .bind(&collaborator.alma_mater)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(format!(
                    "Collaborator with rut {} already exists",
                    collaborator.rut
                ))
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into_collaborator())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Collaborator>, AppError> {
        let row = sqlx::query_as::<_, CollaboratorRow>(&format!(
            "SELECT {COLLABORATOR_COLUMNS} FROM collaborators WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_collaborator()))
    }

    async fn list(&self, query: &PageQuery) -> Result<(Vec<Collaborator>, i64), AppError> {
        let column = query.sort_column(SORT_COLUMNS);
        let direction = query.sort_dir();
        let pattern = query.search_term().map(like_pattern).unwrap_or_default();

        let rows = sqlx::query_as::<_, CollaboratorRow>(&format!(
            r#"
            SELECT {COLLABORATOR_COLUMNS}
            FROM collaborators
            WHERE ($1 = '' OR rut ILIKE $1 OR full_name ILIKE $1 OR email ILIKE $1)
            ORDER BY {column} {direction}
            LIMIT $2 OFFSET $3
            "#,
        ))
        .bind(&pattern)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM collaborators
            WHERE ($1 = '' OR rut ILIKE $1 OR full_name ILIKE $1 OR email ILIKE $1)
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok((
            rows.into_iter().map(CollaboratorRow::into_collaborator).collect(),
            total,
        ))
    }

    async fn update(
        &self,
        id: i32,
        collaborator: &Collaborator,
    ) -> Result<Collaborator, AppError> {
        let row = sqlx::query_as::<_, CollaboratorRow>(&format!(
            r#"
            UPDATE collaborators
            SET rut = $2,
                full_name = $3,
                email = $4,
                address = $5,
                phone = $6,
                position = $7,
                alma_mater = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLLABORATOR_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&collaborator.rut)
        .bind(&collaborator.full_name)
        .bind(&collaborator.email)
        .bind(&collaborator.address)
        .bind(&collaborator.phone)
        .bind(&collaborator.position)
        .bind(&collaborator.alma_mater)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(format!(
                    "Collaborator with rut {} already exists",
                    collaborator.rut
                ))
            }
            _ => AppError::Database(e),
        })?
        .ok_or_else(|| AppError::NotFound(format!("Collaborator with id {} not found", id)))?;

        Ok(row.into_collaborator())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM collaborators WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                    AppError::NotFound(format!(
                        "Collaborator with id {} cannot be removed while practices reference it",
                        id
                    ))
                }
                _ => AppError::Database(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Collaborator with id {} not found",
                id
            )));
        }

        Ok(())
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM collaborators WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    async fn catalog(&self) -> Result<Vec<(i32, String)>, AppError> {
        let rows = sqlx::query_as::<_, (i32, String)>(
            "SELECT id, full_name FROM collaborators ORDER BY full_name LIMIT 1000",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
