//! Activity Repository Implementation
//!
//! PostgreSQL implementation of the ActivityRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Activity, ActivityFilter, ActivityRepository, ActivityStatus};
use crate::shared::error::AppError;
use crate::shared::pagination::{like_pattern, PageQuery};

/// Database row representation matching the activities table schema.
#[derive(Debug, sqlx::FromRow)]
struct ActivityRow {
    id: i32,
    title: String,
    description: Option<String>,
    workshop_tutor: Option<String>,
    student_name: Option<String>,
    status: String,
    evidence_url: Option<String>,
    recorded_at: DateTime<Utc>,
}

impl ActivityRow {
    fn into_activity(self) -> Activity {
        Activity {
            id: self.id,
            title: self.title,
            description: self.description,
            workshop_tutor: self.workshop_tutor,
            student_name: self.student_name,
            status: ActivityStatus::parse(&self.status).unwrap_or_default(),
            evidence_url: self.evidence_url,
            recorded_at: self.recorded_at,
        }
    }
}

const ACTIVITY_COLUMNS: &str =
    "id, title, description, workshop_tutor, student_name, status, evidence_url, recorded_at";

/// PostgreSQL activity repository implementation.
#[derive(Clone)]
pub struct PgActivityRepository {
    pool: PgPool,
}

impl PgActivityRepository {
    /// Create a new PgActivityRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PgActivityRepository {
    async fn create(&self, activity: &Activity) -> Result<Activity, AppError> {
        let row = sqlx::query_as::<_, ActivityRow>(&format!(
            r#"
            INSERT INTO activities (title, description, workshop_tutor, student_name,
                                    status, evidence_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ACTIVITY_COLUMNS}
            "#,
        ))
        .bind(&activity.title)
        .bind(&activity.description)
        .bind(&activity.workshop_tutor)
        .bind(&activity.student_name)
        .bind(activity.status.as_str())
        .bind(&activity.evidence_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_activity())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Activity>, AppError> {
        let row = sqlx::query_as::<_, ActivityRow>(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_activity()))
    }

    async fn list(
        &self,
        query: &PageQuery,
        filter: &ActivityFilter,
    ) -> Result<(Vec<Activity>, i64), AppError> {
        let pattern = query.search_term().map(like_pattern).unwrap_or_default();
        let status = filter.status.map(|s| s.as_str());

        let rows = sqlx::query_as::<_, ActivityRow>(&format!(
            r#"
            SELECT {ACTIVITY_COLUMNS}
            FROM activities
            WHERE ($1 = '' OR title ILIKE $1 OR workshop_tutor ILIKE $1 OR student_name ILIKE $1)
              AND ($2::text IS NULL OR status = $2)
              AND ($3::timestamptz IS NULL OR recorded_at >= $3)
              AND ($4::timestamptz IS NULL OR recorded_at < $4)
            ORDER BY recorded_at DESC, id DESC
            LIMIT $5 OFFSET $6
            "#,
        ))
        .bind(&pattern)
        .bind(status)
        .bind(filter.from)
        .bind(filter.to)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM activities
            WHERE ($1 = '' OR title ILIKE $1 OR workshop_tutor ILIKE $1 OR student_name ILIKE $1)
              AND ($2::text IS NULL OR status = $2)
              AND ($3::timestamptz IS NULL OR recorded_at >= $3)
              AND ($4::timestamptz IS NULL OR recorded_at < $4)
            "#,
        )
        .bind(&pattern)
        .bind(status)
        .bind(filter.from)
        .bind(filter.to)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows.into_iter().map(ActivityRow::into_activity).collect(), total))
    }

    async fn update(&self, id: i32, activity: &Activity) -> Result<Activity, AppError> {
        let row = sqlx::query_as::<_, ActivityRow>(&format!(
            r#"
            UPDATE activities
            SET title = $2,
                description = $3,
                workshop_tutor = $4,
                student_name = $5,
                status = $6,
                evidence_url = $7
            WHERE id = $1
            RETURNING {ACTIVITY_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&activity.title)
        .bind(&activity.description)
        .bind(&activity.workshop_tutor)
        .bind(&activity.student_name)
        .bind(activity.status.as_str())
        .bind(&activity.evidence_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Activity with id {} not found", id)))?;

        Ok(row.into_activity())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Activity with id {} not found", id)));
        }

        Ok(())
    }
}
