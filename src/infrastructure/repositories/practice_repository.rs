//! Practice Repository Implementation
//!
//! PostgreSQL implementation of the PracticeRepository trait. Detail reads
//! join the student, center and collaborator so listings can show their
//! names without extra round trips.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::domain::{
    Practice, PracticeDetail, PracticeFilter, PracticeRepository, PracticeStatus,
};
use crate::shared::error::AppError;
use crate::shared::pagination::{like_pattern, PageQuery};

/// Database row representation matching the practices table schema.
#[derive(Debug, sqlx::FromRow)]
struct PracticeRow {
    id: i32,
    student_rut: String,
    center_id: i32,
    collaborator_id: i32,
    status: String,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    kind: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PracticeRow {
    fn into_practice(self) -> Practice {
        Practice {
            id: self.id,
            student_rut: self.student_rut,
            center_id: self.center_id,
            collaborator_id: self.collaborator_id,
            status: PracticeStatus::parse(&self.status).unwrap_or_default(),
            start_date: self.start_date,
            end_date: self.end_date,
            kind: self.kind,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Detail row: practice columns joined with reference summaries.
#[derive(Debug, sqlx::FromRow)]
struct PracticeDetailRow {
    #[sqlx(flatten)]
    practice: PracticeRow,
    student_name: String,
    center_name: String,
    center_commune: Option<String>,
    collaborator_name: String,
}

impl PracticeDetailRow {
    fn into_detail(self) -> PracticeDetail {
        PracticeDetail {
            practice: self.practice.into_practice(),
            student_name: self.student_name,
            center_name: self.center_name,
            center_commune: self.center_commune,
            collaborator_name: self.collaborator_name,
        }
    }
}

const PRACTICE_COLUMNS: &str = "id, student_rut, center_id, collaborator_id, status, \
     start_date, end_date, kind, created_at, updated_at";

const DETAIL_SELECT: &str = r#"
    SELECT p.id, p.student_rut, p.center_id, p.collaborator_id, p.status,
           p.start_date, p.end_date, p.kind, p.created_at, p.updated_at,
           s.full_name AS student_name,
           c.name AS center_name,
           c.commune AS center_commune,
           co.full_name AS collaborator_name
    FROM practices p
    JOIN students s ON s.rut = p.student_rut
    JOIN centers c ON c.id = p.center_id
    JOIN collaborators co ON co.id = p.collaborator_id
"#;

/// PostgreSQL practice repository implementation.
#[derive(Clone)]
pub struct PgPracticeRepository {
    pool: PgPool,
}

impl PgPracticeRepository {
    /// Create a new PgPracticeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PracticeRepository for PgPracticeRepository {
    async fn create(&self, practice: &Practice) -> Result<Practice, AppError> {
        let row = sqlx::query_as::<_, PracticeRow>(&format!(
            r#"
            INSERT INTO practices (student_rut, center_id, collaborator_id, status,
                                   start_date, end_date, kind)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PRACTICE_COLUMNS}
            "#,
        ))
        .bind(&practice.student_rut)
        .bind(practice.center_id)
        .bind(practice.collaborator_id)
        .bind(practice.status.as_str())
        .bind(practice.start_date)
        .bind(practice.end_date)
        .bind(&practice.kind)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::BadRequest("Referenced student, center or collaborator not found".into())
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into_practice())
    }

    async fn find_detail(&self, id: i32) -> Result<Option<PracticeDetail>, AppError> {
        let row = sqlx::query_as::<_, PracticeDetailRow>(&format!(
            "{DETAIL_SELECT} WHERE p.id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_detail()))
    }

    async fn list(
        &self,
        query: &PageQuery,
        filter: &PracticeFilter,
    ) -> Result<(Vec<PracticeDetail>, i64), AppError> {
        let pattern = query.search_term().map(like_pattern).unwrap_or_default();
        let status = filter.status.map(|s| s.as_str());

        let rows = sqlx::query_as::<_, PracticeDetailRow>(&format!(
            r#"
            {DETAIL_SELECT}
            WHERE ($1 = '' OR s.full_name ILIKE $1 OR s.rut ILIKE $1 OR c.name ILIKE $1)
              AND ($2::text IS NULL OR p.status = $2)
              AND ($3::text IS NULL OR p.student_rut = $3)
            ORDER BY p.start_date DESC, p.id DESC
            LIMIT $4 OFFSET $5
            "#,
        ))
        .bind(&pattern)
        .bind(status)
        .bind(&filter.student_rut)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM practices p
            JOIN students s ON s.rut = p.student_rut
            JOIN centers c ON c.id = p.center_id
            WHERE ($1 = '' OR s.full_name ILIKE $1 OR s.rut ILIKE $1 OR c.name ILIKE $1)
              AND ($2::text IS NULL OR p.status = $2)
              AND ($3::text IS NULL OR p.student_rut = $3)
            "#,
        )
        .bind(&pattern)
        .bind(status)
        .bind(&filter.student_rut)
        .fetch_one(&self.pool)
        .await?;

        Ok((
            rows.into_iter().map(PracticeDetailRow::into_detail).collect(),
            total,
        ))
    }

    async fn list_by_center(&self, center_id: i32) -> Result<Vec<PracticeDetail>, AppError> {
        let rows = sqlx::query_as::<_, PracticeDetailRow>(&format!(
            "{DETAIL_SELECT} WHERE p.center_id = $1 ORDER BY p.start_date DESC, p.id DESC",
        ))
        .bind(center_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PracticeDetailRow::into_detail).collect())
    }

    async fn update(&self, id: i32, practice: &Practice) -> Result<Practice, AppError> {
        let row = sqlx::query_as::<_, PracticeRow>(&format!(
            r#"
            UPDATE practices
            SET student_rut = $2,
                center_id = $3,
                collaborator_id = $4,
                status = $5,
                start_date = $6,
                end_date = $7,
                kind = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PRACTICE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&practice.student_rut)
        .bind(practice.center_id)
        .bind(practice.collaborator_id)
        .bind(practice.status.as_str())
        .bind(practice.start_date)
        .bind(practice.end_date)
        .bind(&practice.kind)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::BadRequest("Referenced student, center or collaborator not found".into())
            }
            _ => AppError::Database(e),
        })?
        .ok_or_else(|| AppError::NotFound(format!("Practice with id {} not found", id)))?;

        Ok(row.into_practice())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM practices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Practice with id {} not found", id)));
        }

        Ok(())
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM practices WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }
}
