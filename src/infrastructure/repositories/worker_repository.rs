//! Worker Repository Implementation
//!
//! PostgreSQL implementation of the WorkerRepository trait. Reads join the
//! owning center so responses can carry its name.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Worker, WorkerRepository};
use crate::shared::error::AppError;
use crate::shared::pagination::{like_pattern, PageQuery};

/// Database row representation: workers joined with the center name.
#[derive(Debug, sqlx::FromRow)]
struct WorkerRow {
    id: i32,
    rut: String,
    full_name: String,
    role: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    center_id: i32,
    center_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WorkerRow {
    fn into_worker(self) -> Worker {
        Worker {
            id: self.id,
            rut: self.rut,
            full_name: self.full_name,
            role: self.role,
            email: self.email,
            phone: self.phone,
            center_id: self.center_id,
            center_name: self.center_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const SORT_COLUMNS: &[&str] = &["full_name", "rut", "role", "created_at"];

const WORKER_SELECT: &str = r#"
    SELECT w.id, w.rut, w.full_name, w.role, w.email, w.phone, w.center_id,
           c.name AS center_name, w.created_at, w.updated_at
    FROM workers w
    JOIN centers c ON c.id = w.center_id
"#;

/// PostgreSQL worker repository implementation.
#[derive(Clone)]
pub struct PgWorkerRepository {
    pool: PgPool,
}

impl PgWorkerRepository {
    /// Create a new PgWorkerRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkerRepository for PgWorkerRepository {
    async fn create(&self, worker: &Worker) -> Result<Worker, AppError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO workers (rut, full_name, role, email, phone, center_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&worker.rut)
        .bind(&worker.full_name)
        .bind(&worker.role)
        .bind(&worker.email)
        .bind(&worker.phone)
        .bind(worker.center_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::BadRequest(format!("Center with id {} not found", worker.center_id))
            }
            _ => AppError::Database(e),
        })?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Worker with id {} not found", id)))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Worker>, AppError> {
        let row = sqlx::query_as::<_, WorkerRow>(&format!("{WORKER_SELECT} WHERE w.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_worker()))
    }

    async fn list(&self, query: &PageQuery) -> Result<(Vec<Worker>, i64), AppError> {
        let column = query.sort_column(SORT_COLUMNS);
        let direction = query.sort_dir();
        let pattern = query.search_term().map(like_pattern).unwrap_or_default();

        let rows = sqlx::query_as::<_, WorkerRow>(&format!(
            r#"
            {WORKER_SELECT}
            WHERE ($1 = '' OR w.rut ILIKE $1 OR w.full_name ILIKE $1 OR w.email ILIKE $1)
            ORDER BY w.{column} {direction}
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
            SELECT COUNT(*) FROM workers w
            WHERE ($1 = '' OR w.rut ILIKE $1 OR w.full_name ILIKE $1 OR w.email ILIKE $1)
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows.into_iter().map(WorkerRow::into_worker).collect(), total))
    }

    async fn list_by_center(&self, center_id: i32) -> Result<Vec<Worker>, AppError> {
        let rows = sqlx::query_as::<_, WorkerRow>(&format!(
            "{WORKER_SELECT} WHERE w.center_id = $1 ORDER BY w.full_name",
        ))
        .bind(center_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WorkerRow::into_worker).collect())
    }

    async fn update(&self, id: i32, worker: &Worker) -> Result<Worker, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE workers
            SET rut = $2,
                full_name = $3,
                role = $4,
                email = $5,
                phone = $6,
                center_id = $7,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&worker.rut)
        .bind(&worker.full_name)
        .bind(&worker.role)
        .bind(&worker.email)
        .bind(&worker.phone)
        .bind(worker.center_id)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::BadRequest(format!("Center with id {} not found", worker.center_id))
            }
            _ => AppError::Database(e),
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Worker with id {} not found", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Worker with id {} not found", id)))
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM workers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Worker with id {} not found", id)));
        }

        Ok(())
    }
}
