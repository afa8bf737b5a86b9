//! Survey Handlers
//!
//! Perception surveys plus the catalogs the survey forms draw from and
//! the spreadsheet export.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CreateSurveyRequest, UpdateAnswersRequest};
use crate::application::dto::response::{IdNameItem, StudentCatalogItem};
use crate::application::services::{SurveyService, SurveyServiceImpl};
use crate::domain::Survey;
use crate::infrastructure::repositories::{
    PgCenterRepository, PgCollaboratorRepository, PgStudentRepository, PgSurveyRepository,
    PgTutorRepository,
};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

type Service = SurveyServiceImpl<
    PgSurveyRepository,
    PgStudentRepository,
    PgCenterRepository,
    PgCollaboratorRepository,
    PgTutorRepository,
>;

fn survey_service(state: &AppState) -> Service {
    SurveyServiceImpl::new(
        Arc::new(PgSurveyRepository::new(state.db.clone())),
        Arc::new(PgStudentRepository::new(state.db.clone())),
        Arc::new(PgCenterRepository::new(state.db.clone())),
        Arc::new(PgCollaboratorRepository::new(state.db.clone())),
        Arc::new(PgTutorRepository::new(state.db.clone())),
    )
}

/// Create a survey from a `{ kind, data }` submission
pub async fn create_survey(
    State(state): State<AppState>,
    Json(body): Json<CreateSurveyRequest>,
) -> Result<(StatusCode, Json<Survey>), AppError> {
    let survey = survey_service(&state).create(body).await?;
    Ok((StatusCode::CREATED, Json(survey)))
}

/// List surveys of both kinds, tagged by kind
pub async fn list_surveys(
    State(state): State<AppState>,
) -> Result<Json<Vec<Survey>>, AppError> {
    let surveys = survey_service(&state).list().await?;
    Ok(Json(surveys))
}

/// Get a survey by id
pub async fn get_survey(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Survey>, AppError> {
    let survey = survey_service(&state).get(id).await?;
    Ok(Json(survey))
}

/// Upsert open answers on a student survey
pub async fn update_answers(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateAnswersRequest>,
) -> Result<Json<Survey>, AppError> {
    body.validate().map_err(validation_error)?;

    let survey = survey_service(&state).update_answers(id, body).await?;
    Ok(Json(survey))
}

/// Download student surveys as an xlsx workbook
pub async fn export_excel(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let bytes = survey_service(&state).export_excel().await?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"encuestas.xlsx\"".to_string(),
            ),
        ],
        bytes,
    ))
}

/// Students for the survey forms, addressed by rut
pub async fn student_catalog(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentCatalogItem>>, AppError> {
    let items = survey_service(&state).student_catalog().await?;
    Ok(Json(items))
}

/// Centers for the survey forms
pub async fn center_catalog(
    State(state): State<AppState>,
) -> Result<Json<Vec<IdNameItem>>, AppError> {
    let items = survey_service(&state).center_catalog().await?;
    Ok(Json(items))
}

/// Collaborators for the survey forms
pub async fn collaborator_catalog(
    State(state): State<AppState>,
) -> Result<Json<Vec<IdNameItem>>, AppError> {
    let items = survey_service(&state).collaborator_catalog().await?;
    Ok(Json(items))
}

/// Tutors for the survey forms
pub async fn tutor_catalog(
    State(state): State<AppState>,
) -> Result<Json<Vec<IdNameItem>>, AppError> {
    let items = survey_service(&state).tutor_catalog().await?;
    Ok(Json(items))
}
