//! Survey Service
//!
//! Business logic for perception surveys: the merged listing, kind-tagged
//! creation, open-answer updates, the spreadsheet export, and the name
//! catalogs the survey forms draw from.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

use crate::application::dto::request::{CreateSurveyRequest, UpdateAnswersRequest};
use crate::application::dto::response::{IdNameItem, StudentCatalogItem};
use crate::domain::{
    AnswerInput, CenterRepository, CollaboratorRepository, CollaboratorSurvey, StudentRepository,
    StudentSurvey, Survey, SurveyKind, SurveyRepository, TutorRepository,
};
use crate::infrastructure::documents::student_survey_workbook;
use crate::shared::error::AppError;

/// Kind-specific payload of a student survey submission.
#[derive(Debug, Deserialize)]
struct StudentSurveyPayload {
    student_name: Option<String>,
    workshop_tutor: Option<String>,
    collaborator_name: Option<String>,
    center_name: Option<String>,
    remark: Option<String>,
    #[serde(default)]
    answers: Vec<AnswerInput>,
}

/// Kind-specific payload of a collaborator survey submission.
#[derive(Debug, Deserialize)]
struct CollaboratorSurveyPayload {
    collaborator_name: Option<String>,
    center_name: Option<String>,
    remark: Option<String>,
    #[serde(default)]
    answers: Vec<AnswerInput>,
}

/// Survey service trait for dependency injection
#[async_trait]
pub trait SurveyService: Send + Sync {
    /// Both variants merged, tagged by kind.
    async fn list(&self) -> Result<Vec<Survey>, AppError>;

    async fn get(&self, id: i32) -> Result<Survey, AppError>;

    /// Create a survey from a `{ kind, data }` submission.
    async fn create(&self, request: CreateSurveyRequest) -> Result<Survey, AppError>;

    /// Upsert open answers on a student survey.
    async fn update_answers(
        &self,
        id: i32,
        request: UpdateAnswersRequest,
    ) -> Result<Survey, AppError>;

    /// Student surveys as xlsx bytes.
    async fn export_excel(&self) -> Result<Vec<u8>, AppError>;

    async fn student_catalog(&self) -> Result<Vec<StudentCatalogItem>, AppError>;

    async fn center_catalog(&self) -> Result<Vec<IdNameItem>, AppError>;

    async fn collaborator_catalog(&self) -> Result<Vec<IdNameItem>, AppError>;

    async fn tutor_catalog(&self) -> Result<Vec<IdNameItem>, AppError>;
}

/// SurveyService implementation
pub struct SurveyServiceImpl<R, S, C, L, T>
where
    R: SurveyRepository,
    S: StudentRepository,
    C: CenterRepository,
    L: CollaboratorRepository,
    T: TutorRepository,
{
    survey_repo: Arc<R>,
    student_repo: Arc<S>,
    center_repo: Arc<C>,
    collaborator_repo: Arc<L>,
    tutor_repo: Arc<T>,
}

impl<R, S, C, L, T> SurveyServiceImpl<R, S, C, L, T>
where
    R: SurveyRepository,
    S: StudentRepository,
    C: CenterRepository,
    L: CollaboratorRepository,
    T: TutorRepository,
{
    pub fn new(
        survey_repo: Arc<R>,
        student_repo: Arc<S>,
        center_repo: Arc<C>,
        collaborator_repo: Arc<L>,
        tutor_repo: Arc<T>,
    ) -> Self {
        Self {
            survey_repo,
            student_repo,
            center_repo,
            collaborator_repo,
            tutor_repo,
        }
    }
}

#[async_trait]
impl<R, S, C, L, T> SurveyService for SurveyServiceImpl<R, S, C, L, T>
where
    R: SurveyRepository + 'static,
    S: StudentRepository + 'static,
    C: CenterRepository + 'static,
    L: CollaboratorRepository + 'static,
    T: TutorRepository + 'static,
{
    async fn list(&self) -> Result<Vec<Survey>, AppError> {
        self.survey_repo.list_all().await
    }

    async fn get(&self, id: i32) -> Result<Survey, AppError> {
        self.survey_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Survey with id {} not found", id)))
    }

    async fn create(&self, request: CreateSurveyRequest) -> Result<Survey, AppError> {
        let kind = SurveyKind::parse(&request.kind)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown survey kind: {}", request.kind)))?;

        match kind {
            SurveyKind::Student => {
                let payload: StudentSurveyPayload = serde_json::from_value(request.data)
                    .map_err(|e| AppError::BadRequest(format!("Invalid survey payload: {}", e)))?;

                let created = self
                    .survey_repo
                    .create_student(&StudentSurvey {
                        id: 0,
                        student_name: payload.student_name,
                        workshop_tutor: payload.workshop_tutor,
                        collaborator_name: payload.collaborator_name,
                        center_name: payload.center_name,
                        taken_at: Utc::now(),
                        remark: payload.remark,
                    })
                    .await?;

                if !payload.answers.is_empty() {
                    self.survey_repo
                        .insert_answers(kind, created.id, &payload.answers)
                        .await?;
                }

                self.get(created.id).await
            }
            SurveyKind::Collaborator => {
                let payload: CollaboratorSurveyPayload = serde_json::from_value(request.data)
                    .map_err(|e| AppError::BadRequest(format!("Invalid survey payload: {}", e)))?;

                let created = self
                    .survey_repo
                    .create_collaborator(&CollaboratorSurvey {
                        id: 0,
                        collaborator_name: payload.collaborator_name,
                        center_name: payload.center_name,
                        remark: payload.remark,
                        taken_at: Utc::now(),
                    })
                    .await?;

                if !payload.answers.is_empty() {
                    self.survey_repo
                        .insert_answers(kind, created.id, &payload.answers)
                        .await?;
                }

                self.get(created.id).await
            }
        }
    }

    async fn update_answers(
        &self,
        id: i32,
        request: UpdateAnswersRequest,
    ) -> Result<Survey, AppError> {
        let survey = self.get(id).await?;
        if survey.kind != SurveyKind::Student {
            return Err(AppError::BadRequest(
                "Open answers can only be updated on student surveys".into(),
            ));
        }

        let answers: Vec<(i32, String)> = request
            .answers
            .into_iter()
            .map(|a| (a.question_id, a.text))
            .collect();

        self.survey_repo.upsert_open_answers(id, &answers).await?;
        self.get(id).await
    }

    async fn export_excel(&self) -> Result<Vec<u8>, AppError> {
        let surveys = self.survey_repo.list_student_full().await?;
        student_survey_workbook(&surveys)
    }

    async fn student_catalog(&self) -> Result<Vec<StudentCatalogItem>, AppError> {
        let rows = self.student_repo.catalog().await?;
        Ok(rows.into_iter().map(StudentCatalogItem::from).collect())
    }

    async fn center_catalog(&self) -> Result<Vec<IdNameItem>, AppError> {
        let rows = self.center_repo.catalog().await?;
        Ok(rows.into_iter().map(IdNameItem::from).collect())
    }

    async fn collaborator_catalog(&self) -> Result<Vec<IdNameItem>, AppError> {
        let rows = self.collaborator_repo.catalog().await?;
        Ok(rows.into_iter().map(IdNameItem::from).collect())
    }

    async fn tutor_catalog(&self) -> Result<Vec<IdNameItem>, AppError> {
        let rows = self.tutor_repo.catalog().await?;
        Ok(rows.into_iter().map(IdNameItem::from).collect())
    }
}
