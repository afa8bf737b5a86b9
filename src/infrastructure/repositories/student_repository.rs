//! Student Repository Implementation
//!
//! PostgreSQL implementation of the StudentRepository trait.
//! Students are addressed by rut, their natural key, across the API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Student, StudentRepository};
use crate::shared::error::AppError;
use crate::shared::pagination::{like_pattern, PageQuery};

/// Database row representation matching the students table schema.
#[derive(Debug, sqlx::FromRow)]
struct StudentRow {
    id: i32,
    rut: String,
    full_name: String,
    level: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StudentRow {
    fn into_student(self) -> Student {
        Student {
            id: self.id,
            rut: self.rut,
            full_name: self.full_name,
            level: self.level,
            email: self.email,
            phone: self.phone,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Columns the listing may be sorted by. The first entry is the default.
const SORT_COLUMNS: &[&str] = &["full_name", "rut", "level", "created_at"];

/// PostgreSQL student repository implementation.
#[derive(Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    /// Create a new PgStudentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn create(&self, student: &Student) -> Result<Student, AppError> {
        let row = sqlx::query_as::<_, StudentRow>(
            r#"
            INSERT INTO students (rut, full_name, level, email, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, rut, full_name, level, email, phone, created_at, updated_at
            "#,
        )
        .bind(&student.rut)
        .bind(&student.full_name)
        .bind(&student.level)
        .bind(&student.email)
        .bind(&student.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(format!("Student with rut {} already exists", student.rut))
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into_student())
    }

    async fn find_by_rut(&self, rut: &str) -> Result<Option<Student>, AppError> {
        let row = sqlx::query_as::<_, StudentRow>(
            r#"
            SELECT id, rut, full_name, level, email, phone, created_at, updated_at
            FROM students
            WHERE rut = $1
            "#,
        )
        .bind(rut)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_student()))
    }

    async fn list(&self, query: &PageQuery) -> Result<(Vec<Student>, i64), AppError> {
        let column = query.sort_column(SORT_COLUMNS);
        let direction = query.sort_dir();
        let pattern = query.search_term().map(like_pattern);

        // Column and direction come from an allow-list, never from input.
        let (rows, total) = match &pattern {
            Some(pattern) => {
                let rows = sqlx::query_as::<_, StudentRow>(&format!(
                    r#"
                    SELECT id, rut, full_name, level, email, phone, created_at, updated_at
                    FROM students
                    WHERE rut ILIKE $1 OR full_name ILIKE $1
                    ORDER BY {column} {direction}
                    LIMIT $2 OFFSET $3
                    "#,
                ))
                .bind(pattern)
                .bind(query.limit())
                .bind(query.offset())
                .fetch_all(&self.pool)
                .await?;

                let total = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM students WHERE rut ILIKE $1 OR full_name ILIKE $1",
                )
                .bind(pattern)
                .fetch_one(&self.pool)
                .await?;

                (rows, total)
            }
            None => {
                let rows = sqlx::query_as::<_, StudentRow>(&format!(
                    r#"
                    SELECT id, rut, full_name, level, email, phone, created_at, updated_at
                    FROM students
                    ORDER BY {column} {direction}
                    LIMIT $1 OFFSET $2
                    "#,
                ))
                .bind(query.limit())
                .bind(query.offset())
                .fetch_all(&self.pool)
                .await?;

                let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
                    .fetch_one(&self.pool)
                    .await?;

                (rows, total)
            }
        };

        Ok((rows.into_iter().map(StudentRow::into_student).collect(), total))
    }

    async fn update(&self, rut: &str, student: &Student) -> Result<Student, AppError> {
        let row = sqlx::query_as::<_, StudentRow>(
            r#"
            UPDATE students
            SET full_name = $2,
                level = $3,
                email = $4,
                phone = $5,
                updated_at = NOW()
            WHERE rut = $1
            RETURNING id, rut, full_name, level, email, phone, created_at, updated_at
            "#,
        )
        .bind(rut)
        .bind(&student.full_name)
        .bind(&student.level)
        .bind(&student.email)
        .bind(&student.phone)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student with rut {} not found", rut)))?;

        Ok(row.into_student())
    }

    async fn delete(&self, rut: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE rut = $1")
            .bind(rut)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                    AppError::NotFound(format!(
                        "Student with rut {} cannot be removed while practices reference it",
                        rut
                    ))
                }
                _ => AppError::Database(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Student with rut {} not found", rut)));
        }

        Ok(())
    }

    async fn rut_exists(&self, rut: &str) -> Result<bool, AppError> {
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE rut = $1)",
        )
        .bind(rut)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    async fn catalog(&self) -> Result<Vec<(String, String)>, AppError> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT rut, full_name FROM students ORDER BY full_name LIMIT 1000",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
