//! Activity Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{
    ActivityListQuery, CreateActivityRequest, UpdateActivityRequest,
};
use crate::application::services::{ActivityService, ActivityServiceImpl};
use crate::domain::Activity;
use crate::infrastructure::repositories::PgActivityRepository;
use crate::shared::error::AppError;
use crate::shared::pagination::{Page, PageQuery};
use crate::shared::validation::validation_error;
use crate::startup::AppState;

fn activity_service(state: &AppState) -> ActivityServiceImpl<PgActivityRepository> {
    ActivityServiceImpl::new(Arc::new(PgActivityRepository::new(state.db.clone())))
}

/// Create an activity
pub async fn create_activity(
    State(state): State<AppState>,
    Json(body): Json<CreateActivityRequest>,
) -> Result<(StatusCode, Json<Activity>), AppError> {
    body.validate().map_err(validation_error)?;

    let activity = activity_service(&state).create(body).await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

/// List activities, optionally narrowed by status and date range
pub async fn list_activities(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    Query(filter): Query<ActivityListQuery>,
) -> Result<Json<Page<Activity>>, AppError> {
    let from = filter.from_bound();
    let to = filter.to_bound();
    let page = activity_service(&state)
        .list(query, filter.status, from, to)
        .await?;
    Ok(Json(page))
}

/// Get an activity by id
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Activity>, AppError> {
    let activity = activity_service(&state).get(id).await?;
    Ok(Json(activity))
}

/// Update an activity by id
pub async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateActivityRequest>,
) -> Result<Json<Activity>, AppError> {
    body.validate().map_err(validation_error)?;

    let activity = activity_service(&state).update(id, body).await?;
    Ok(Json(activity))
}

/// Delete an activity by id
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    activity_service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
