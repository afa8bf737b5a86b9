//! Center worker entity and repository trait.
//!
//! Maps to the `workers` table. A worker always belongs to one center.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;
use crate::shared::pagination::PageQuery;

/// Staff member employed at an educational center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    pub id: i32,
    pub rut: String,
    pub full_name: String,
    /// Position at the center (e.g., "Jefe UTP")
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub center_id: i32,
    /// Center name, populated on reads that join the center
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Repository trait for Worker data access operations.
#[async_trait]
pub trait WorkerRepository: Send + Sync {
    async fn create(&self, worker: &Worker) -> Result<Worker, AppError>;

    /// Find a worker by ID, joining the center name.
    async fn find_by_id(&self, id: i32) -> Result<Option<Worker>, AppError>;

    /// Paginated listing; `search` matches rut, name and email.
    async fn list(&self, query: &PageQuery) -> Result<(Vec<Worker>, i64), AppError>;

    /// Workers of one center, ordered by name.
    async fn list_by_center(&self, center_id: i32) -> Result<Vec<Worker>, AppError>;

    async fn update(&self, id: i32, worker: &Worker) -> Result<Worker, AppError>;

    async fn delete(&self, id: i32) -> Result<(), AppError>;
}
