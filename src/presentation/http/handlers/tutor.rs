//! Tutor Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CreateTutorRequest, TutorListQuery, UpdateTutorRequest};
use crate::application::services::{TutorService, TutorServiceImpl};
use crate::domain::Tutor;
use crate::infrastructure::repositories::PgTutorRepository;
use crate::shared::error::AppError;
use crate::shared::pagination::{Page, PageQuery};
use crate::shared::validation::validation_error;
use crate::startup::AppState;

fn tutor_service(state: &AppState) -> TutorServiceImpl<PgTutorRepository> {
    TutorServiceImpl::new(Arc::new(PgTutorRepository::new(state.db.clone())))
}

/// Create a tutor with their roles and positions
pub async fn create_tutor(
    State(state): State<AppState>,
    Json(body): Json<CreateTutorRequest>,
) -> Result<(StatusCode, Json<Tutor>), AppError> {
    body.validate().map_err(validation_error)?;

    let tutor = tutor_service(&state).create(body).await?;
    Ok((StatusCode::CREATED, Json(tutor)))
}

/// List tutors, optionally narrowed to one role
pub async fn list_tutors(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    Query(filter): Query<TutorListQuery>,
) -> Result<Json<Page<Tutor>>, AppError> {
    let page = tutor_service(&state).list(query, filter.role).await?;
    Ok(Json(page))
}

/// Get a tutor by id
pub async fn get_tutor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Tutor>, AppError> {
    let tutor = tutor_service(&state).get(id).await?;
    Ok(Json(tutor))
}

/// Update a tutor by id
pub async fn update_tutor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateTutorRequest>,
) -> Result<Json<Tutor>, AppError> {
    body.validate().map_err(validation_error)?;

    let tutor = tutor_service(&state).update(id, body).await?;
    Ok(Json(tutor))
}

/// Delete a tutor by id
pub async fn delete_tutor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    tutor_service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
