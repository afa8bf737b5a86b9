//! Authorization letter folio ledger.
//!
//! Maps to the `letter_requests` table. Every generated letter consumes
//! the next sequential folio; the allocation happens inside a single
//! database transaction so concurrent requests cannot observe the same
//! maximum.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Ledger row recording one issued folio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterRequest {
    pub id: i32,
    pub folio: i32,
    pub issued_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Repository trait for folio allocation.
#[async_trait]
pub trait LetterRepository: Send + Sync {
    /// Allocate the next folio (`max(folio) + 1`, starting at 1), record
    /// it inside one transaction, and return the inserted ledger row.
    async fn allocate_folio(&self) -> Result<LetterRequest, AppError>;
}
