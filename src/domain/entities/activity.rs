//! Workshop activity entity and repository trait.
//!
//! Maps to the `activities` table. Activities are recorded by the
//! internship coordination and reviewed by the career leadership.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;
use crate::shared::pagination::PageQuery;

/// Review state of a recorded activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityStatus {
    #[default]
    Pending,
    Approved,
    Observed,
}

impl ActivityStatus {
    /// Convert from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "APPROVED" => Some(Self::Approved),
            "OBSERVED" => Some(Self::Observed),
            _ => None,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Observed => "OBSERVED",
        }
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded workshop activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    /// Workshop tutor who ran the activity
    pub workshop_tutor: Option<String>,
    /// Student the activity concerns
    pub student_name: Option<String>,
    pub status: ActivityStatus,
    pub evidence_url: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Filters accepted by the activity listing.
/// Listing filter. `from` is an inclusive lower bound on `recorded_at`,
/// `to` an exclusive upper bound.
#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
    pub status: Option<ActivityStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Repository trait for Activity data access operations.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn create(&self, activity: &Activity) -> Result<Activity, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Activity>, AppError>;

    /// Paginated listing, newest first; `search` matches title, workshop
    /// tutor and student name.
    async fn list(
        &self,
        query: &PageQuery,
        filter: &ActivityFilter,
    ) -> Result<(Vec<Activity>, i64), AppError>;

    async fn update(&self, id: i32, activity: &Activity) -> Result<Activity, AppError>;

    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_status_roundtrip() {
        for status in [
            ActivityStatus::Pending,
            ActivityStatus::Approved,
            ActivityStatus::Observed,
        ] {
            assert_eq!(ActivityStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_activity_status_parse_unknown() {
        assert_eq!(ActivityStatus::parse("DONE"), None);
    }
}
