//! Collaborator entity and repository trait.
//!
//! Maps to the `collaborators` table. Collaborators are center-side
//! teachers who receive and supervise interns.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;
use crate::shared::pagination::PageQuery;

/// Center-side collaborating teacher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collaborator {
    pub id: i32,
    pub rut: String,
    pub full_name: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub alma_mater: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Repository trait for Collaborator data access operations.
#[async_trait]
pub trait CollaboratorRepository: Send + Sync {
    async fn create(&self, collaborator: &Collaborator) -> Result<Collaborator, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Collaborator>, AppError>;

    /// Paginated listing; `search` matches rut, name and email.
    async fn list(&self, query: &PageQuery) -> Result<(Vec<Collaborator>, i64), AppError>;

    async fn update(&self, id: i32, collaborator: &Collaborator)
        -> Result<Collaborator, AppError>;

    async fn delete(&self, id: i32) -> Result<(), AppError>;

    async fn exists(&self, id: i32) -> Result<bool, AppError>;

    /// (id, name) catalog for form selects, ordered by name, capped at 1000.
    async fn catalog(&self) -> Result<Vec<(i32, String)>, AppError>;
}
