//! Tutor Service
//!
//! Business logic for tutor management, including normalization of the
//! role and position inputs the form sends in either singular or plural
//! shape.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::dto::request::{CreateTutorRequest, UpdateTutorRequest};
use crate::domain::{Tutor, TutorRepository, TutorRole};
use crate::shared::error::AppError;
use crate::shared::pagination::{Page, PageQuery};

/// Tutor service trait for dependency injection
#[async_trait]
pub trait TutorService: Send + Sync {
    async fn create(&self, request: CreateTutorRequest) -> Result<Tutor, AppError>;

    async fn get(&self, id: i32) -> Result<Tutor, AppError>;

    async fn list(
        &self,
        query: PageQuery,
        role: Option<String>,
    ) -> Result<Page<Tutor>, AppError>;

    async fn update(&self, id: i32, request: UpdateTutorRequest) -> Result<Tutor, AppError>;

    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

/// Parse role inputs, deduplicating while preserving order.
fn parse_roles(inputs: Vec<String>) -> Result<Vec<TutorRole>, AppError> {
    let mut roles: Vec<TutorRole> = Vec::new();
    for input in inputs {
        let role = TutorRole::parse(&input)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown tutor role: {}", input)))?;
        if !roles.contains(&role) {
            roles.push(role);
        }
    }
    Ok(roles)
}

/// Deduplicate positions while preserving order.
fn dedup_positions(inputs: Vec<String>) -> Vec<String> {
    let mut positions: Vec<String> = Vec::new();
    for input in inputs {
        if !positions.contains(&input) {
            positions.push(input);
        }
    }
    positions
}

/// TutorService implementation
pub struct TutorServiceImpl<R>
where
    R: TutorRepository,
{
    repo: Arc<R>,
}

impl<R> TutorServiceImpl<R>
where
    R: TutorRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> TutorService for TutorServiceImpl<R>
where
    R: TutorRepository + 'static,
{
    async fn create(&self, request: CreateTutorRequest) -> Result<Tutor, AppError> {
        let roles = parse_roles(request.role_inputs())?;
        let positions = dedup_positions(request.position_inputs());

        let now = Utc::now();
        let tutor = Tutor {
            id: 0,
            rut: request.rut,
            full_name: request.full_name,
            email: request.email,
            address: request.address,
            phone: request.phone,
            alma_mater: request.alma_mater,
            roles,
            positions,
            created_at: now,
            updated_at: now,
        };

        self.repo.create(&tutor).await
    }

    async fn get(&self, id: i32) -> Result<Tutor, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tutor with id {} not found", id)))
    }

    async fn list(
        &self,
        query: PageQuery,
        role: Option<String>,
    ) -> Result<Page<Tutor>, AppError> {
        let role = match role {
            None => None,
            Some(raw) => Some(
                TutorRole::parse(&raw)
                    .ok_or_else(|| AppError::BadRequest(format!("Unknown tutor role: {}", raw)))?,
            ),
        };

        let (items, total) = self.repo.list(&query, role).await?;
        Ok(Page::new(items, &query, total))
    }

    async fn update(&self, id: i32, request: UpdateTutorRequest) -> Result<Tutor, AppError> {
        let mut tutor = self.get(id).await?;

        let replace_roles = request.replaces_roles();
        let replace_positions = request.replaces_positions();

        if replace_roles {
            tutor.roles = parse_roles(request.role_inputs())?;
        }
        if replace_positions {
            tutor.positions = dedup_positions(request.position_inputs());
        }
        if let Some(rut) = request.rut {
            tutor.rut = rut;
        }
        if let Some(full_name) = request.full_name {
            tutor.full_name = full_name;
        }
        if request.email.is_some() {
            tutor.email = request.email;
        }
        if request.address.is_some() {
            tutor.address = request.address;
        }
        if request.phone.is_some() {
            tutor.phone = request.phone;
        }
        if request.alma_mater.is_some() {
            tutor.alma_mater = request.alma_mater;
        }

        self.repo
            .update(id, &tutor, replace_roles, replace_positions)
            .await
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roles_deduplicates() {
        let roles = parse_roles(vec![
            "Tallerista".into(),
            "Supervisor".into(),
            "Tallerista".into(),
        ])
        .unwrap();
        assert_eq!(roles, vec![TutorRole::Tallerista, TutorRole::Supervisor]);
    }

    #[test]
    fn test_parse_roles_rejects_unknown() {
        assert!(matches!(
            parse_roles(vec!["Coordinador".into()]),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_dedup_positions_preserves_order() {
        let positions = dedup_positions(vec![
            "Jefa UTP".into(),
            "Coordinadora".into(),
            "Jefa UTP".into(),
        ]);
        assert_eq!(positions, vec!["Jefa UTP", "Coordinadora"]);
    }
}
