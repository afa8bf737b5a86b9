//! Student Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CreateStudentRequest, UpdateStudentRequest};
use crate::application::services::{StudentService, StudentServiceImpl};
use crate::domain::Student;
use crate::infrastructure::repositories::PgStudentRepository;
use crate::shared::error::AppError;
use crate::shared::pagination::{Page, PageQuery};
use crate::shared::validation::validation_error;
use crate::startup::AppState;

fn student_service(state: &AppState) -> StudentServiceImpl<PgStudentRepository> {
    StudentServiceImpl::new(Arc::new(PgStudentRepository::new(state.db.clone())))
}

/// Create a student
pub async fn create_student(
    State(state): State<AppState>,
    Json(body): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    body.validate().map_err(validation_error)?;

    let student = student_service(&state).create(body).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// List students, paginated and searchable
pub async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Student>>, AppError> {
    let page = student_service(&state).list(query).await?;
    Ok(Json(page))
}

/// Get a student by rut
pub async fn get_student(
    State(state): State<AppState>,
    Path(rut): Path<String>,
) -> Result<Json<Student>, AppError> {
    let student = student_service(&state).get(&rut).await?;
    Ok(Json(student))
}

/// Update a student by rut
pub async fn update_student(
    State(state): State<AppState>,
    Path(rut): Path<String>,
    Json(body): Json<UpdateStudentRequest>,
) -> Result<Json<Student>, AppError> {
    body.validate().map_err(validation_error)?;

    let student = student_service(&state).update(&rut, body).await?;
    Ok(Json(student))
}

/// Delete a student by rut
pub async fn delete_student(
    State(state): State<AppState>,
    Path(rut): Path<String>,
) -> Result<StatusCode, AppError> {
    student_service(&state).delete(&rut).await?;
    Ok(StatusCode::NO_CONTENT)
}
