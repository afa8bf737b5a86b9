//! Center Repository Implementation
//!
//! PostgreSQL implementation of the CenterRepository trait. Listings are
//! joined with dependent-row counts so the UI can show how many practices
//! and workers each center carries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Center, CenterKind, CenterRepository, CenterSummary};
use crate::shared::error::AppError;
use crate::shared::pagination::{like_pattern, PageQuery};

/// Database row representation matching the centers table schema.
#[derive(Debug, sqlx::FromRow)]
struct CenterRow {
    id: i32,
    name: String,
    region: Option<String>,
    commune: Option<String>,
    address: Option<String>,
    street_name: Option<String>,
    street_number: Option<i32>,
    phone: Option<String>,
    email: Option<String>,
    kind: Option<String>,
    agreement: Option<String>,
    social_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CenterRow {
    fn into_center(self) -> Center {
        Center {
            id: self.id,
            name: self.name,
            region: self.region,
            commune: self.commune,
            address: self.address,
            street_name: self.street_name,
            street_number: self.street_number,
            phone: self.phone,
            email: self.email,
            kind: self.kind.as_deref().and_then(CenterKind::parse),
            agreement: self.agreement,
            social_url: self.social_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Listing row: center columns plus the two dependent counts.
#[derive(Debug, sqlx::FromRow)]
struct CenterSummaryRow {
    #[sqlx(flatten)]
    center: CenterRow,
    practice_count: i64,
    worker_count: i64,
}

impl CenterSummaryRow {
    fn into_summary(self) -> CenterSummary {
        CenterSummary {
            center: self.center.into_center(),
            practice_count: self.practice_count,
            worker_count: self.worker_count,
        }
    }
}

const SORT_COLUMNS: &[&str] = &["name", "commune", "region", "kind", "created_at"];

const CENTER_COLUMNS: &str = "id, name, region, commune, address, street_name, street_number, \
     phone, email, kind, agreement, social_url, created_at, updated_at";

/// PostgreSQL center repository implementation.
#[derive(Clone)]
pub struct PgCenterRepository {
    pool: PgPool,
}

impl PgCenterRepository {
    /// Create a new PgCenterRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CenterRepository for PgCenterRepository {
    async fn create(&self, center: &Center) -> Result<Center, AppError> {
        let row = sqlx::query_as::<_, CenterRow>(&format!(
            r#"
            INSERT INTO centers (name, region, commune, address, street_name, street_number,
                                 phone, email, kind, agreement, social_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {CENTER_COLUMNS}
            "#,
        ))
        .bind(&center.name)
        .bind(&center.region)
        .bind(&center.commune)
        .bind(&center.address)
        .bind(&center.street_name)
        .bind(center.street_number)
        .bind(&center.phone)
        .bind(&center.email)
        .bind(center.kind.map(|k| k.as_str()))
        .bind(&center.agreement)
        .bind(&center.social_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_center())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Center>, AppError> {
        let row = sqlx::query_as::<_, CenterRow>(&format!(
            "SELECT {CENTER_COLUMNS} FROM centers WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_center()))
    }

    async fn list(
        &self,
        query: &PageQuery,
        kind: Option<CenterKind>,
    ) -> Result<(Vec<CenterSummary>, i64), AppError> {
        let column = query.sort_column(SORT_COLUMNS);
        let direction = query.sort_dir();
        let pattern = query.search_term().map(like_pattern).unwrap_or_default();
        let has_search = !pattern.is_empty();
        let kind = kind.map(|k| k.as_str());

        // $1 empty disables the search filter, $2 NULL the kind filter.
        let rows = sqlx::query_as::<_, CenterSummaryRow>(&format!(
            r#"
            SELECT c.id, c.name, c.region, c.commune, c.address, c.street_name,
                   c.street_number, c.phone, c.email, c.kind, c.agreement, c.social_url,
                   c.created_at, c.updated_at,
                   (SELECT COUNT(*) FROM practices p WHERE p.center_id = c.id) AS practice_count,
                   (SELECT COUNT(*) FROM workers w WHERE w.center_id = c.id) AS worker_count
            FROM centers c
            WHERE ($1 = '' OR c.name ILIKE $1 OR c.commune ILIKE $1
                           OR c.region ILIKE $1 OR c.email ILIKE $1)
              AND ($2::text IS NULL OR c.kind = $2)
            ORDER BY c.{column} {direction}
            LIMIT $3 OFFSET $4
            "#,
        ))
        .bind(if has_search { pattern.as_str() } else { "" })
        .bind(kind)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM centers c
            WHERE ($1 = '' OR c.name ILIKE $1 OR c.commune ILIKE $1
                           OR c.region ILIKE $1 OR c.email ILIKE $1)
              AND ($2::text IS NULL OR c.kind = $2)
            "#,
        )
        .bind(if has_search { pattern.as_str() } else { "" })
        .bind(kind)
        .fetch_one(&self.pool)
        .await?;

        Ok((
            rows.into_iter().map(CenterSummaryRow::into_summary).collect(),
            total,
        ))
    }

    async fn update(&self, id: i32, center: &Center) -> Result<Center, AppError> {
        let row = sqlx::query_as::<_, CenterRow>(&format!(
            r#"
            UPDATE centers
            SET name = $2,
                region = $3,
                commune = $4,
                address = $5,
                street_name = $6,
                street_number = $7,
                phone = $8,
                email = $9,
                kind = $10,
                agreement = $11,
                social_url = $12,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CENTER_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&center.name)
        .bind(&center.region)
        .bind(&center.commune)
        .bind(&center.address)
        .bind(&center.street_name)
        .bind(center.street_number)
        .bind(&center.phone)
        .bind(&center.email)
        .bind(center.kind.map(|k| k.as_str()))
        .bind(&center.agreement)
        .bind(&center.social_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Center with id {} not found", id)))?;

        Ok(row.into_center())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM centers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                    AppError::NotFound(format!(
                        "Center with id {} cannot be removed while workers or practices reference it",
                        id
                    ))
                }
                _ => AppError::Database(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Center with id {} not found", id)));
        }

        Ok(())
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM centers WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    async fn catalog(&self) -> Result<Vec<(i32, String)>, AppError> {
        let rows = sqlx::query_as::<_, (i32, String)>(
            "SELECT id, name FROM centers ORDER BY name LIMIT 1000",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
