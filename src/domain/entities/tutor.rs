//! Tutor entity and repository trait.
//!
//! Maps to the `tutors` table plus the `tutor_roles` and `tutor_positions`
//! join tables. A tutor can act as workshop tutor, supervisor, or both.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;
use crate::shared::pagination::PageQuery;

/// Role a tutor can hold towards a practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TutorRole {
    /// Runs the pedagogy workshop tied to the practice
    Tallerista,
    /// Supervises the student at the center
    Supervisor,
}

impl TutorRole {
    /// Convert from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Tallerista" => Some(Self::Tallerista),
            "Supervisor" => Some(Self::Supervisor),
            _ => None,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tallerista => "Tallerista",
            Self::Supervisor => "Supervisor",
        }
    }
}

impl std::fmt::Display for TutorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// University-side tutor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tutor {
    pub id: i32,
    pub rut: String,
    pub full_name: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// University of graduation
    pub alma_mater: Option<String>,
    /// Roles held (deduplicated)
    pub roles: Vec<TutorRole>,
    /// Free-text positions (cargos)
    pub positions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Repository trait for Tutor data access operations.
#[async_trait]
pub trait TutorRepository: Send + Sync {
    /// Insert a tutor together with its roles and positions.
    async fn create(&self, tutor: &Tutor) -> Result<Tutor, AppError>;

    /// Find a tutor by ID, including roles and positions.
    async fn find_by_id(&self, id: i32) -> Result<Option<Tutor>, AppError>;

    /// Paginated listing; `search` matches rut, name and email; `role`
    /// narrows to tutors holding that role.
    async fn list(
        &self,
        query: &PageQuery,
        role: Option<TutorRole>,
    ) -> Result<(Vec<Tutor>, i64), AppError>;

    /// Update base fields. When `replace_roles`/`replace_positions` is set
    /// the corresponding join rows are replaced wholesale.
    async fn update(
        &self,
        id: i32,
        tutor: &Tutor,
        replace_roles: bool,
        replace_positions: bool,
    ) -> Result<Tutor, AppError>;

    async fn delete(&self, id: i32) -> Result<(), AppError>;

    /// (id, name) catalog for form selects, ordered by name, capped at 1000.
    async fn catalog(&self) -> Result<Vec<(i32, String)>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tutor_role_roundtrip() {
        assert_eq!(TutorRole::parse("Tallerista"), Some(TutorRole::Tallerista));
        assert_eq!(TutorRole::parse("Supervisor"), Some(TutorRole::Supervisor));
        assert_eq!(TutorRole::Tallerista.as_str(), "Tallerista");
    }

    #[test]
    fn test_tutor_role_parse_rejects_unknown() {
        assert_eq!(TutorRole::parse("Coordinador"), None);
        assert_eq!(TutorRole::parse("tallerista"), None);
    }
}
