//! Collaborator Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CreateCollaboratorRequest, UpdateCollaboratorRequest};
use crate::application::services::{CollaboratorService, CollaboratorServiceImpl};
use crate::domain::Collaborator;
use crate::infrastructure::repositories::PgCollaboratorRepository;
use crate::shared::error::AppError;
use crate::shared::pagination::{Page, PageQuery};
use crate::shared::validation::validation_error;
use crate::startup::AppState;

fn collaborator_service(state: &AppState) -> CollaboratorServiceImpl<PgCollaboratorRepository> {
    CollaboratorServiceImpl::new(Arc::new(PgCollaboratorRepository::new(state.db.clone())))
}

/// Create a collaborator
pub async fn create_collaborator(
    State(state): State<AppState>,
    Json(body): Json<CreateCollaboratorRequest>,
) -> Result<(StatusCode, Json<Collaborator>), AppError> {
    body.validate().map_err(validation_error)?;

    let collaborator = collaborator_service(&state).create(body).await?;
    Ok((StatusCode::CREATED, Json(collaborator)))
}

/// List collaborators, paginated and searchable
pub async fn list_collaborators(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Collaborator>>, AppError> {
    let page = collaborator_service(&state).list(query).await?;
    Ok(Json(page))
}

/// Get a collaborator by id
pub async fn get_collaborator(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Collaborator>, AppError> {
    let collaborator = collaborator_service(&state).get(id).await?;
    Ok(Json(collaborator))
}

/// Update a collaborator by id
pub async fn update_collaborator(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateCollaboratorRequest>,
) -> Result<Json<Collaborator>, AppError> {
    body.validate().map_err(validation_error)?;

    let collaborator = collaborator_service(&state).update(id, body).await?;
    Ok(Json(collaborator))
}

/// Delete a collaborator by id
pub async fn delete_collaborator(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    collaborator_service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
