//! Worker Service
//!
//! Business logic for center staff management. Creates and updates verify
//! the referenced center before touching the row.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::dto::request::{CreateWorkerRequest, UpdateWorkerRequest};
use crate::domain::{CenterRepository, Worker, WorkerRepository};
use crate::shared::error::AppError;
use crate::shared::pagination::{Page, PageQuery};

/// Worker service trait for dependency injection
#[async_trait]
pub trait WorkerService: Send + Sync {
    async fn create(&self, request: CreateWorkerRequest) -> Result<Worker, AppError>;

    async fn get(&self, id: i32) -> Result<Worker, AppError>;

    async fn list(&self, query: PageQuery) -> Result<Page<Worker>, AppError>;

    async fn update(&self, id: i32, request: UpdateWorkerRequest) -> Result<Worker, AppError>;

    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

/// WorkerService implementation
pub struct WorkerServiceImpl<W, C>
where
    W: WorkerRepository,
    C: CenterRepository,
{
    worker_repo: Arc<W>,
    center_repo: Arc<C>,
}

impl<W, C> WorkerServiceImpl<W, C>
where
    W: WorkerRepository,
    C: CenterRepository,
{
    pub fn new(worker_repo: Arc<W>, center_repo: Arc<C>) -> Self {
        Self {
            worker_repo,
            center_repo,
        }
    }

    async fn ensure_center(&self, center_id: i32) -> Result<(), AppError> {
        if !self.center_repo.exists(center_id).await? {
            return Err(AppError::NotFound(format!(
                "Center with id {} not found",
                center_id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<W, C> WorkerService for WorkerServiceImpl<W, C>
where
    W: WorkerRepository + 'static,
    C: CenterRepository + 'static,
{
    async fn create(&self, request: CreateWorkerRequest) -> Result<Worker, AppError> {
        self.ensure_center(request.center_id).await?;

        let now = Utc::now();
        let worker = Worker {
            id: 0,
            rut: request.rut,
            full_name: request.full_name,
            role: request.role,
            email: request.email,
            phone: request.phone,
            center_id: request.center_id,
            center_name: None,
            created_at: now,
            updated_at: now,
        };

        self.worker_repo.create(&worker).await
    }

    async fn get(&self, id: i32) -> Result<Worker, AppError> {
        self.worker_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Worker with id {} not found", id)))
    }

    async fn list(&self, query: PageQuery) -> Result<Page<Worker>, AppError> {
        let (items, total) = self.worker_repo.list(&query).await?;
        Ok(Page::new(items, &query, total))
    }

    async fn update(&self, id: i32, request: UpdateWorkerRequest) -> Result<Worker, AppError> {
        let mut worker = self.get(id).await?;

        if let Some(center_id) = request.center_id {
            self.ensure_center(center_id).await?;
            worker.center_id = center_id;
        }
        if let Some(rut) = request.rut {
            worker.rut = rut;
        }
        if let Some(full_name) = request.full_name {
            worker.full_name = full_name;
        }
        if request.role.is_some() {
            worker.role = request.role;
        }
        if request.email.is_some() {
            worker.email = request.email;
        }
        if request.phone.is_some() {
            worker.phone = request.phone;
        }

        self.worker_repo.update(id, &worker).await
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.worker_repo.delete(id).await
    }
}
