//! Collaborator Service
//!
//! Business logic for center-side collaborating teachers.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::dto::request::{CreateCollaboratorRequest, UpdateCollaboratorRequest};
use crate::domain::{Collaborator, CollaboratorRepository};
use crate::shared::error::AppError;
use crate::shared::pagination::{Page, PageQuery};

/// Collaborator service trait for dependency injection
#[async_trait]
pub trait CollaboratorService: Send + Sync {
    async fn create(&self, request: CreateCollaboratorRequest)
        -> Result<Collaborator, AppError>;

    async fn get(&self, id: i32) -> Result<Collaborator, AppError>;

    async fn list(&self, query: PageQuery) -> Result<Page<Collaborator>, AppError>;

    async fn update(
        &self,
        id: i32,
        request: UpdateCollaboratorRequest,
    ) -> Result<Collaborator, AppError>;

    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

/// CollaboratorService implementation
pub struct CollaboratorServiceImpl<R>
where
    R: CollaboratorRepository,
{
    repo: Arc<R>,
}

impl<R> CollaboratorServiceImpl<R>
where
    R: CollaboratorRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> CollaboratorService for CollaboratorServiceImpl<R>
where
    R: CollaboratorRepository + 'static,
{
    async fn create(
        &self,
        request: CreateCollaboratorRequest,
    ) -> Result<Collaborator, AppError> {
        let now = Utc::now();
        let collaborator = Collaborator {
            id: 0,
            rut: request.rut,
            full_name: request.full_name,
            email: request.email,
            address: request.address,
            phone: request.phone,
            position: request.position,
            alma_mater: request.alma_mater,
            created_at: now,
            updated_at: now,
        };

        self.repo.create(&collaborator).await
    }

    async fn get(&self, id: i32) -> Result<Collaborator, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Collaborator with id {} not found", id)))
    }

    async fn list(&self, query: PageQuery) -> Result<Page<Collaborator>, AppError> {
        let (items, total) = self.repo.list(&query).await?;
        Ok(Page::new(items, &query, total))
    }

    async fn update(
        &self,
        id: i32,
        request: UpdateCollaboratorRequest,
    ) -> Result<Collaborator, AppError> {
        let mut collaborator = self.get(id).await?;

        if let Some(rut) = request.rut {
            collaborator.rut = rut;
        }
        if let Some(full_name) = request.full_name {
            collaborator.full_name = full_name;
        }
        if request.email.is_some() {
            collaborator.email = request.email;
        }
        if request.address.is_some() {
            collaborator.address = request.address;
        }
        if request.phone.is_some() {
            collaborator.phone = request.phone;
        }
        if request.position.is_some() {
            collaborator.position = request.position;
        }
        if request.alma_mater.is_some() {
            collaborator.alma_mater = request.alma_mater;
        }

        self.repo.update(id, &collaborator).await
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repo.delete(id).await
    }
}
