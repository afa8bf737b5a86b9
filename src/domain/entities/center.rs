//! Educational center entity and repository trait.
//!
//! Maps to the `centers` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::practice::PracticeDetail;
use super::worker::Worker;
use crate::shared::error::AppError;
use crate::shared::pagination::PageQuery;

/// Administrative kind of an educational center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CenterKind {
    Private,
    Subsidized,
    Slep,
}

impl CenterKind {
    /// Convert from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PRIVATE" => Some(Self::Private),
            "SUBSIDIZED" => Some(Self::Subsidized),
            "SLEP" => Some(Self::Slep),
            _ => None,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "PRIVATE",
            Self::Subsidized => "SUBSIDIZED",
            Self::Slep => "SLEP",
        }
    }
}

impl std::fmt::Display for CenterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents an educational center hosting internships.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Center {
    pub id: i32,
    pub name: String,
    pub region: Option<String>,
    pub commune: Option<String>,
    pub address: Option<String>,
    pub street_name: Option<String>,
    pub street_number: Option<i32>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub kind: Option<CenterKind>,
    /// Agreement reference with the university, if any
    pub agreement: Option<String>,
    pub social_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row: a center plus how many practices and workers reference it.
#[derive(Debug, Clone, Serialize)]
pub struct CenterSummary {
    pub center: Center,
    pub practice_count: i64,
    pub worker_count: i64,
}

/// Detail view: a center plus the practices it hosts and its staff.
#[derive(Debug, Clone, Serialize)]
pub struct CenterDetail {
    pub center: Center,
    pub practices: Vec<PracticeDetail>,
    pub workers: Vec<Worker>,
}

/// Repository trait for Center data access operations.
#[async_trait]
pub trait CenterRepository: Send + Sync {
    /// Insert a new center.
    async fn create(&self, center: &Center) -> Result<Center, AppError>;

    /// Find a center by ID.
    async fn find_by_id(&self, id: i32) -> Result<Option<Center>, AppError>;

    /// Paginated listing with dependent-row counts; `search` matches name,
    /// commune, region and email; `kind` narrows by center kind.
    async fn list(
        &self,
        query: &PageQuery,
        kind: Option<CenterKind>,
    ) -> Result<(Vec<CenterSummary>, i64), AppError>;

    /// Update an existing center.
    async fn update(&self, id: i32, center: &Center) -> Result<Center, AppError>;

    /// Delete a center. Rejected while dependent workers or practices exist.
    async fn delete(&self, id: i32) -> Result<(), AppError>;

    /// Check whether a center ID exists.
    async fn exists(&self, id: i32) -> Result<bool, AppError>;

    /// (id, name) catalog for form selects, ordered by name, capped at 1000.
    async fn catalog(&self) -> Result<Vec<(i32, String)>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_kind_roundtrip() {
        for kind in [CenterKind::Private, CenterKind::Subsidized, CenterKind::Slep] {
            assert_eq!(CenterKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_center_kind_parse_is_case_insensitive() {
        assert_eq!(CenterKind::parse("slep"), Some(CenterKind::Slep));
        assert_eq!(CenterKind::parse("Private"), Some(CenterKind::Private));
    }

    #[test]
    fn test_center_kind_parse_unknown() {
        assert_eq!(CenterKind::parse("MUNICIPAL"), None);
        assert_eq!(CenterKind::parse(""), None);
    }

    #[test]
    fn test_center_kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&CenterKind::Subsidized).unwrap();
        assert_eq!(json, "\"SUBSIDIZED\"");
    }
}
