//! Practice (internship placement) entity, observations, and repository
//! traits.
//!
//! Maps to the `practices` and `observations` tables. A practice ties a
//! student to a center under a collaborating teacher for a date range.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;
use crate::shared::pagination::PageQuery;

/// Lifecycle state of a practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PracticeStatus {
    #[default]
    Pending,
    InProgress,
    Finished,
    Rejected,
}

impl PracticeStatus {
    /// Convert from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "IN_PROGRESS" => Some(Self::InProgress),
            "FINISHED" => Some(Self::Finished),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Finished => "FINISHED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for PracticeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An internship placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Practice {
    pub id: i32,
    pub student_rut: String,
    pub center_id: i32,
    pub collaborator_id: i32,
    pub status: PracticeStatus,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Practice kind (e.g., "Práctica Profesional")
    pub kind: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Practice joined with summaries of its three references.
#[derive(Debug, Clone, Serialize)]
pub struct PracticeDetail {
    pub practice: Practice,
    pub student_name: String,
    pub center_name: String,
    pub center_commune: Option<String>,
    pub collaborator_name: String,
}

/// Free-text follow-up note attached to a practice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub id: i32,
    pub practice_id: i32,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Filters accepted by the practice listing.
#[derive(Debug, Clone, Default)]
pub struct PracticeFilter {
    pub status: Option<PracticeStatus>,
    pub student_rut: Option<String>,
}

/// Repository trait for Practice data access operations.
#[async_trait]
pub trait PracticeRepository: Send + Sync {
    async fn create(&self, practice: &Practice) -> Result<Practice, AppError>;

    /// Find a practice by ID with student/center/collaborator summaries.
    async fn find_detail(&self, id: i32) -> Result<Option<PracticeDetail>, AppError>;

    /// Paginated listing, newest start date first.
    async fn list(
        &self,
        query: &PageQuery,
        filter: &PracticeFilter,
    ) -> Result<(Vec<PracticeDetail>, i64), AppError>;

    /// Practices hosted at one center, newest start date first.
    async fn list_by_center(&self, center_id: i32) -> Result<Vec<PracticeDetail>, AppError>;

    async fn update(&self, id: i32, practice: &Practice) -> Result<Practice, AppError>;

    async fn delete(&self, id: i32) -> Result<(), AppError>;

    async fn exists(&self, id: i32) -> Result<bool, AppError>;
}

/// Repository trait for Observation data access operations.
#[async_trait]
pub trait ObservationRepository: Send + Sync {
    async fn create(&self, observation: &Observation) -> Result<Observation, AppError>;

    /// Observations of one practice, newest first.
    async fn list_by_practice(&self, practice_id: i32) -> Result<Vec<Observation>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Observation>, AppError>;

    async fn update(&self, id: i32, body: &str) -> Result<Observation, AppError>;

    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_practice_status_default_is_pending() {
        assert_eq!(PracticeStatus::default(), PracticeStatus::Pending);
    }

    #[test]
    fn test_practice_status_roundtrip() {
        for status in [
            PracticeStatus::Pending,
            PracticeStatus::InProgress,
            PracticeStatus::Finished,
            PracticeStatus::Rejected,
        ] {
            assert_eq!(PracticeStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_practice_status_parse_is_case_insensitive() {
        assert_eq!(
            PracticeStatus::parse("in_progress"),
            Some(PracticeStatus::InProgress)
        );
    }

    #[test]
    fn test_practice_status_parse_unknown() {
        assert_eq!(PracticeStatus::parse("PAUSED"), None);
    }

    #[test]
    fn test_practice_status_serializes_screaming_snake() {
        let json = serde_json::to_string(&PracticeStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
    }
}
