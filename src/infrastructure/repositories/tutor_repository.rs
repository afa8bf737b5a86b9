//! Tutor Repository Implementation
//!
//! PostgreSQL implementation of the TutorRepository trait. Roles and
//! positions live in join tables and are replaced wholesale inside the
//! same transaction as the base row.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::{Tutor, TutorRepository, TutorRole};
use crate::shared::error::AppError;
use crate::shared::pagination::{like_pattern, PageQuery};

/// Database row representation matching the tutors table schema.
#[derive(Debug, sqlx::FromRow)]
struct TutorRow {
    id: i32,
    rut: String,
    full_name: String,
    email: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    alma_mater: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TutorRow {
    fn into_tutor(self, roles: Vec<TutorRole>, positions: Vec<String>) -> Tutor {
        Tutor {
            id: self.id,
            rut: self.rut,
            full_name: self.full_name,
            email: self.email,
            address: self.address,
            phone: self.phone,
            alma_mater: self.alma_mater,
            roles,
            positions,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const SORT_COLUMNS: &[&str] = &["full_name", "rut", "created_at"];

const TUTOR_COLUMNS: &str =
    "id, rut, full_name, email, address, phone, alma_mater, created_at, updated_at";

/// PostgreSQL tutor repository implementation.
#[derive(Clone)]
pub struct PgTutorRepository {
    pool: PgPool,
}

impl PgTutorRepository {
    /// Create a new PgTutorRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load roles and positions for a batch of tutor ids.
    async fn load_joins(
        &self,
        ids: &[i32],
    ) -> Result<(HashMap<i32, Vec<TutorRole>>, HashMap<i32, Vec<String>>), AppError> {
        let role_rows = sqlx::query_as::<_, (i32, String)>(
            "SELECT tutor_id, role FROM tutor_roles WHERE tutor_id = ANY($1) ORDER BY role",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut roles: HashMap<i32, Vec<TutorRole>> = HashMap::new();
        for (tutor_id, role) in role_rows {
            if let Some(role) = TutorRole::parse(&role) {
                roles.entry(tutor_id).or_default().push(role);
            }
        }

        let position_rows = sqlx::query_as::<_, (i32, String)>(
            "SELECT tutor_id, position FROM tutor_positions WHERE tutor_id = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut positions: HashMap<i32, Vec<String>> = HashMap::new();
        for (tutor_id, position) in position_rows {
            positions.entry(tutor_id).or_default().push(position);
        }

        Ok((roles, positions))
    }
}

/// Replace the role rows of one tutor inside an open transaction.
async fn replace_roles(
    tx: &mut Transaction<'_, Postgres>,
    tutor_id: i32,
    roles: &[TutorRole],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM tutor_roles WHERE tutor_id = $1")
        .bind(tutor_id)
        .execute(&mut **tx)
        .await?;

    for role in roles {
        // ON CONFLICT guards against duplicated roles in the input.
        sqlx::query(
            "INSERT INTO tutor_roles (tutor_id, role) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(tutor_id)
        .bind(role.as_str())
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

/// Replace the position rows of one tutor inside an open transaction.
async fn replace_positions(
    tx: &mut Transaction<'_, Postgres>,
    tutor_id: i32,
    positions: &[String],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM tutor_positions WHERE tutor_id = $1")
        .bind(tutor_id)
        .execute(&mut **tx)
        .await?;

    for position in positions {
        sqlx::query("INSERT INTO tutor_positions (tutor_id, position) VALUES ($1, $2)")
            .bind(tutor_id)
            .bind(position)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

#[async_trait]
impl TutorRepository for PgTutorRepository {
    async fn create(&self, tutor: &Tutor) -> Result<Tutor, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, TutorRow>(&format!(
            r#"
            INSERT INTO tutors (rut, full_name, email, address, phone, alma_mater)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {TUTOR_COLUMNS}
            "#,
        ))
        .bind(&tutor.rut)
        .bind(&tutor.full_name)
        .bind(&tutor.email)
        .bind(&tutor.address)
        .bind(&tutor.phone)
        .bind(&tutor.alma_mater)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(format!("Tutor with rut {} already exists", tutor.rut))
            }
            _ => AppError::Database(e),
        })?;

        replace_roles(&mut tx, row.id, &tutor.roles).await?;
        replace_positions(&mut tx, row.id, &tutor.positions).await?;

        tx.commit().await?;

        let id = row.id;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tutor with id {} not found", id)))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tutor>, AppError> {
        let row = sqlx::query_as::<_, TutorRow>(&format!(
            "SELECT {TUTOR_COLUMNS} FROM tutors WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let (mut roles, mut positions) = self.load_joins(&[row.id]).await?;
        let tutor = row.into_tutor(
            roles.remove(&id).unwrap_or_default(),
            positions.remove(&id).unwrap_or_default(),
        );

        Ok(Some(tutor))
    }

    async fn list(
        &self,
        query: &PageQuery,
        role: Option<TutorRole>,
    ) -> Result<(Vec<Tutor>, i64), AppError> {
        let column = query.sort_column(SORT_COLUMNS);
        let direction = query.sort_dir();
        let pattern = query.search_term().map(like_pattern).unwrap_or_default();
        let role = role.map(|r| r.as_str());

        let rows = sqlx::query_as::<_, TutorRow>(&format!(
            r#"
            SELECT {TUTOR_COLUMNS}
            FROM tutors t
            WHERE ($1 = '' OR t.rut ILIKE $1 OR t.full_name ILIKE $1 OR t.email ILIKE $1)
              AND ($2::text IS NULL OR EXISTS(
                  SELECT 1 FROM tutor_roles tr WHERE tr.tutor_id = t.id AND tr.role = $2))
            ORDER BY t.{column} {direction}
            LIMIT $3 OFFSET $4
            "#,
        ))
        .bind(&pattern)
        .bind(role)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM tutors t
            WHERE ($1 = '' OR t.rut ILIKE $1 OR t.full_name ILIKE $1 OR t.email ILIKE $1)
              AND ($2::text IS NULL OR EXISTS(
                  SELECT 1 FROM tutor_roles tr WHERE tr.tutor_id = t.id AND tr.role = $2))
            "#,
        )
        .bind(&pattern)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let (mut roles, mut positions) = self.load_joins(&ids).await?;

        let tutors = rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                row.into_tutor(
                    roles.remove(&id).unwrap_or_default(),
                    positions.remove(&id).unwrap_or_default(),
                )
            })
            .collect();

        Ok((tutors, total))
    }

    async fn update(
        &self,
        id: i32,
        tutor: &Tutor,
        replace_role_rows: bool,
        replace_position_rows: bool,
    ) -> Result<Tutor, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE tutors
            SET rut = $2,
                full_name = $3,
                email = $4,
                address = $5,
                phone = $6,
                alma_mater = $7,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&tutor.rut)
        .bind(&tutor.full_name)
        .bind(&tutor.email)
        .bind(&tutor.address)
        .bind(&tutor.phone)
        .bind(&tutor.alma_mater)
        .execute(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(format!("Tutor with rut {} already exists", tutor.rut))
            }
            _ => AppError::Database(e),
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Tutor with id {} not found", id)));
        }

        if replace_role_rows {
            replace_roles(&mut tx, id, &tutor.roles).await?;
        }
        if replace_position_rows {
            replace_positions(&mut tx, id, &tutor.positions).await?;
        }

        tx.commit().await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tutor with id {} not found", id)))
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tutors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Tutor with id {} not found", id)));
        }

        Ok(())
    }

    async fn catalog(&self) -> Result<Vec<(i32, String)>, AppError> {
        let rows = sqlx::query_as::<_, (i32, String)>(
            "SELECT id, full_name FROM tutors ORDER BY full_name LIMIT 1000",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
