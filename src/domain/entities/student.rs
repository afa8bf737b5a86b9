//! Student entity and repository trait.
//!
//! Maps to the `students` table. Students are keyed by their national ID
//! (rut), which is the natural key used across the API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;
use crate::shared::pagination::PageQuery;

/// Represents a student eligible for internship placements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    /// Surrogate primary key
    pub id: i32,

    /// National ID, unique (e.g., "12.345.678-9")
    pub rut: String,

    /// Full name
    pub full_name: String,

    /// Academic level/year (optional)
    pub level: Option<String>,

    /// Contact email
    pub email: Option<String>,

    /// Contact phone
    pub phone: Option<String>,

    /// Record creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Repository trait for Student data access operations.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Insert a new student.
    async fn create(&self, student: &Student) -> Result<Student, AppError>;

    /// Find a student by rut.
    async fn find_by_rut(&self, rut: &str) -> Result<Option<Student>, AppError>;

    /// Paginated listing; `search` matches rut and full name.
    async fn list(&self, query: &PageQuery) -> Result<(Vec<Student>, i64), AppError>;

    /// Update an existing student identified by rut.
    async fn update(&self, rut: &str, student: &Student) -> Result<Student, AppError>;

    /// Delete a student by rut.
    async fn delete(&self, rut: &str) -> Result<(), AppError>;

    /// Check whether a rut is already registered.
    async fn rut_exists(&self, rut: &str) -> Result<bool, AppError>;

    /// Name catalog for form selects, ordered by name, capped at 1000 rows.
    async fn catalog(&self) -> Result<Vec<(String, String)>, AppError>;
}
