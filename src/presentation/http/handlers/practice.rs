//! Practice and Observation Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use crate::application::dto::request::{
    CreatePracticeRequest, ObservationRequest, PracticeListQuery, UpdatePracticeRequest,
};
use crate::application::services::{PracticeService, PracticeServiceImpl};
use crate::domain::{Observation, Practice, PracticeDetail};
use crate::infrastructure::repositories::{
    PgCenterRepository, PgCollaboratorRepository, PgObservationRepository, PgPracticeRepository,
    PgStudentRepository,
};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::pagination::{Page, PageQuery};
use crate::shared::validation::validation_error;
use crate::startup::AppState;

type Service = PracticeServiceImpl<
    PgPracticeRepository,
    PgObservationRepository,
    PgStudentRepository,
    PgCenterRepository,
    PgCollaboratorRepository,
>;

fn practice_service(state: &AppState) -> Service {
    PracticeServiceImpl::new(
        Arc::new(PgPracticeRepository::new(state.db.clone())),
        Arc::new(PgObservationRepository::new(state.db.clone())),
        Arc::new(PgStudentRepository::new(state.db.clone())),
        Arc::new(PgCenterRepository::new(state.db.clone())),
        Arc::new(PgCollaboratorRepository::new(state.db.clone())),
    )
}

/// Create a practice
pub async fn create_practice(
    State(state): State<AppState>,
    Json(body): Json<CreatePracticeRequest>,
) -> Result<(StatusCode, Json<Practice>), AppError> {
    body.validate().map_err(validation_error)?;

    let practice = practice_service(&state).create(body).await?;
    Ok((StatusCode::CREATED, Json(practice)))
}

/// List practices with student, center and collaborator names
pub async fn list_practices(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    Query(filter): Query<PracticeListQuery>,
) -> Result<Json<Page<PracticeDetail>>, AppError> {
    let page = practice_service(&state)
        .list(query, filter.status, filter.student_rut)
        .await?;
    Ok(Json(page))
}

/// Get a practice by id
pub async fn get_practice(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PracticeDetail>, AppError> {
    let practice = practice_service(&state).get(id).await?;
    Ok(Json(practice))
}

/// Update a practice by id
pub async fn update_practice(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdatePracticeRequest>,
) -> Result<Json<Practice>, AppError> {
    body.validate().map_err(validation_error)?;

    let practice = practice_service(&state).update(id, body).await?;
    Ok(Json(practice))
}

/// Delete a practice by id
pub async fn delete_practice(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    practice_service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Attach an observation to a practice
pub async fn add_observation(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(practice_id): Path<i32>,
    Json(body): Json<ObservationRequest>,
) -> Result<(StatusCode, Json<Observation>), AppError> {
    body.validate().map_err(validation_error)?;

    let observation = practice_service(&state)
        .add_observation(practice_id, auth.role, body)
        .await?;
    Ok((StatusCode::CREATED, Json(observation)))
}

/// List the observations of a practice, newest first
pub async fn list_observations(
    State(state): State<AppState>,
    Path(practice_id): Path<i32>,
) -> Result<Json<Vec<Observation>>, AppError> {
    let observations = practice_service(&state)
        .list_observations(practice_id)
        .await?;
    Ok(Json(observations))
}

/// Edit an observation
pub async fn update_observation(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
    Json(body): Json<ObservationRequest>,
) -> Result<Json<Observation>, AppError> {
    body.validate().map_err(validation_error)?;

    let observation = practice_service(&state)
        .update_observation(id, auth.role, body)
        .await?;
    Ok(Json(observation))
}

/// Remove an observation
pub async fn delete_observation(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    practice_service(&state)
        .delete_observation(id, auth.role)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
