//! Worker Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CreateWorkerRequest, UpdateWorkerRequest};
use crate::application::services::{WorkerService, WorkerServiceImpl};
use crate::domain::Worker;
use crate::infrastructure::repositories::{PgCenterRepository, PgWorkerRepository};
use crate::shared::error::AppError;
use crate::shared::pagination::{Page, PageQuery};
use crate::shared::validation::validation_error;
use crate::startup::AppState;

fn worker_service(
    state: &AppState,
) -> WorkerServiceImpl<PgWorkerRepository, PgCenterRepository> {
    WorkerServiceImpl::new(
        Arc::new(PgWorkerRepository::new(state.db.clone())),
        Arc::new(PgCenterRepository::new(state.db.clone())),
    )
}

/// Create a worker
pub async fn create_worker(
    State(state): State<AppState>,
    Json(body): Json<CreateWorkerRequest>,
) -> Result<(StatusCode, Json<Worker>), AppError> {
    body.validate().map_err(validation_error)?;

    let worker = worker_service(&state).create(body).await?;
    Ok((StatusCode::CREATED, Json(worker)))
}

/// List workers, paginated and searchable
pub async fn list_workers(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Worker>>, AppError> {
    let page = worker_service(&state).list(query).await?;
    Ok(Json(page))
}

/// Get a worker by id
pub async fn get_worker(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Worker>, AppError> {
    let worker = worker_service(&state).get(id).await?;
    Ok(Json(worker))
}

/// Update a worker by id
pub async fn update_worker(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateWorkerRequest>,
) -> Result<Json<Worker>, AppError> {
    body.validate().map_err(validation_error)?;

    let worker = worker_service(&state).update(id, body).await?;
    Ok(Json(worker))
}

/// Delete a worker by id
pub async fn delete_worker(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    worker_service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
