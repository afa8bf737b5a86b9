//! Center Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CenterListQuery, CreateCenterRequest, UpdateCenterRequest};
use crate::application::services::{CenterService, CenterServiceImpl};
use crate::domain::{Center, CenterDetail, CenterSummary};
use crate::infrastructure::repositories::{
    PgCenterRepository, PgPracticeRepository, PgWorkerRepository,
};
use crate::shared::error::AppError;
use crate::shared::pagination::{Page, PageQuery};
use crate::shared::validation::validation_error;
use crate::startup::AppState;

type Service = CenterServiceImpl<PgCenterRepository, PgPracticeRepository, PgWorkerRepository>;

fn center_service(state: &AppState) -> Service {
    CenterServiceImpl::new(
        Arc::new(PgCenterRepository::new(state.db.clone())),
        Arc::new(PgPracticeRepository::new(state.db.clone())),
        Arc::new(PgWorkerRepository::new(state.db.clone())),
    )
}

/// Create a center
pub async fn create_center(
    State(state): State<AppState>,
    Json(body): Json<CreateCenterRequest>,
) -> Result<(StatusCode, Json<Center>), AppError> {
    body.validate().map_err(validation_error)?;

    let center = center_service(&state).create(body).await?;
    Ok((StatusCode::CREATED, Json(center)))
}

/// List centers with their practice and worker counts
pub async fn list_centers(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    Query(filter): Query<CenterListQuery>,
) -> Result<Json<Page<CenterSummary>>, AppError> {
    let page = center_service(&state).list(query, filter.kind).await?;
    Ok(Json(page))
}

/// Get a center by id, with its practices and workers embedded
pub async fn get_center(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CenterDetail>, AppError> {
    let detail = center_service(&state).get_detail(id).await?;
    Ok(Json(detail))
}

/// Update a center by id
pub async fn update_center(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateCenterRequest>,
) -> Result<Json<Center>, AppError> {
    body.validate().map_err(validation_error)?;

    let center = center_service(&state).update(id, body).await?;
    Ok(Json(center))
}

/// Delete a center by id
pub async fn delete_center(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    center_service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
