//! Practice Service
//!
//! Business logic for internship placements and their follow-up
//! observations. Creating a practice validates its three references;
//! observation writes are restricted to the internship coordination role.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::dto::request::{
    CreatePracticeRequest, ObservationRequest, UpdatePracticeRequest,
};
use crate::domain::{
    CenterRepository, CollaboratorRepository, Observation, ObservationRepository, Practice,
    PracticeDetail, PracticeFilter, PracticeRepository, PracticeStatus, StudentRepository,
    UserRole,
};
use crate::shared::error::AppError;
use crate::shared::pagination::{Page, PageQuery};

/// Practice service trait for dependency injection
#[async_trait]
pub trait PracticeService: Send + Sync {
    async fn create(&self, request: CreatePracticeRequest) -> Result<Practice, AppError>;

    async fn get(&self, id: i32) -> Result<PracticeDetail, AppError>;

    async fn list(
        &self,
        query: PageQuery,
        status: Option<String>,
        student_rut: Option<String>,
    ) -> Result<Page<PracticeDetail>, AppError>;

    async fn update(&self, id: i32, request: UpdatePracticeRequest)
        -> Result<Practice, AppError>;

    async fn delete(&self, id: i32) -> Result<(), AppError>;

    /// Attach an observation; internship coordination only.
    async fn add_observation(
        &self,
        practice_id: i32,
        role: UserRole,
        request: ObservationRequest,
    ) -> Result<Observation, AppError>;

    /// Observations of one practice, newest first.
    async fn list_observations(&self, practice_id: i32) -> Result<Vec<Observation>, AppError>;

    /// Edit an observation; internship coordination only.
    async fn update_observation(
        &self,
        id: i32,
        role: UserRole,
        request: ObservationRequest,
    ) -> Result<Observation, AppError>;

    /// Remove an observation; internship coordination only.
    async fn delete_observation(&self, id: i32, role: UserRole) -> Result<(), AppError>;
}

/// Parse an optional status string, rejecting unknown values.
fn parse_status(status: Option<String>) -> Result<Option<PracticeStatus>, AppError> {
    match status {
        None => Ok(None),
        Some(raw) => PracticeStatus::parse(&raw)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown practice status: {}", raw))),
    }
}

fn ensure_observation_access(role: UserRole) -> Result<(), AppError> {
    if !role.can_manage_observations() {
        return Err(AppError::Forbidden(
            "Only the internship coordination can manage observations".into(),
        ));
    }
    Ok(())
}

/// PracticeService implementation
pub struct PracticeServiceImpl<P, O, S, C, L>
where
    P: PracticeRepository,
    O: ObservationRepository,
    S: StudentRepository,
    C: CenterRepository,
    L: CollaboratorRepository,
{
    practice_repo: Arc<P>,
    observation_repo: Arc<O>,
    student_repo: Arc<S>,
    center_repo: Arc<C>,
    collaborator_repo: Arc<L>,
}

impl<P, O, S, C, L> PracticeServiceImpl<P, O, S, C, L>
where
    P: PracticeRepository,
    O: ObservationRepository,
    S: StudentRepository,
    C: CenterRepository,
    L: CollaboratorRepository,
{
    pub fn new(
        practice_repo: Arc<P>,
        observation_repo: Arc<O>,
        student_repo: Arc<S>,
        center_repo: Arc<C>,
        collaborator_repo: Arc<L>,
    ) -> Self {
        Self {
            practice_repo,
            observation_repo,
            student_repo,
            center_repo,
            collaborator_repo,
        }
    }

    async fn ensure_references(
        &self,
        student_rut: &str,
        center_id: i32,
        collaborator_id: i32,
    ) -> Result<(), AppError> {
        if !self.student_repo.rut_exists(student_rut).await? {
            return Err(AppError::NotFound(format!(
                "Student with rut {} not found",
                student_rut
            )));
        }
        if !self.center_repo.exists(center_id).await? {
            return Err(AppError::NotFound(format!(
                "Center with id {} not found",
                center_id
            )));
        }
        if !self.collaborator_repo.exists(collaborator_id).await? {
            return Err(AppError::NotFound(format!(
                "Collaborator with id {} not found",
                collaborator_id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<P, O, S, C, L> PracticeService for PracticeServiceImpl<P, O, S, C, L>
where
    P: PracticeRepository + 'static,
    O: ObservationRepository + 'static,
    S: StudentRepository + 'static,
    C: CenterRepository + 'static,
    L: CollaboratorRepository + 'static,
{
    async fn create(&self, request: CreatePracticeRequest) -> Result<Practice, AppError> {
        self.ensure_references(
            &request.student_rut,
            request.center_id,
            request.collaborator_id,
        )
        .await?;

        if let Some(end) = request.end_date {
            if end < request.start_date {
                return Err(AppError::BadRequest(
                    "End date must not precede the start date".into(),
                ));
            }
        }

        let now = Utc::now();
        let practice = Practice {
            id: 0,
            student_rut: request.student_rut,
            center_id: request.center_id,
            collaborator_id: request.collaborator_id,
            status: parse_status(request.status)?.unwrap_or_default(),
            start_date: request.start_date,
            end_date: request.end_date,
            kind: request.kind,
            created_at: now,
            updated_at: now,
        };

        self.practice_repo.create(&practice).await
    }

    async fn get(&self, id: i32) -> Result<PracticeDetail, AppError> {
        self.practice_repo
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Practice with id {} not found", id)))
    }

    async fn list(
        &self,
        query: PageQuery,
        status: Option<String>,
        student_rut: Option<String>,
    ) -> Result<Page<PracticeDetail>, AppError> {
        let filter = PracticeFilter {
            status: parse_status(status)?,
            student_rut,
        };

        let (items, total) = self.practice_repo.list(&query, &filter).await?;
        Ok(Page::new(items, &query, total))
    }

    async fn update(
        &self,
        id: i32,
        request: UpdatePracticeRequest,
    ) -> Result<Practice, AppError> {
        let mut practice = self.get(id).await?.practice;

        if let Some(student_rut) = request.student_rut {
            practice.student_rut = student_rut;
        }
        if let Some(center_id) = request.center_id {
            practice.center_id = center_id;
        }
        if let Some(collaborator_id) = request.collaborator_id {
            practice.collaborator_id = collaborator_id;
        }
        self.ensure_references(
            &practice.student_rut,
            practice.center_id,
            practice.collaborator_id,
        )
        .await?;

        if let Some(status) = parse_status(request.status)? {
            practice.status = status;
        }
        if let Some(start_date) = request.start_date {
            practice.start_date = start_date;
        }
        if request.end_date.is_some() {
            practice.end_date = request.end_date;
        }
        if request.kind.is_some() {
            practice.kind = request.kind;
        }

        if let Some(end) = practice.end_date {
            if end < practice.start_date {
                return Err(AppError::BadRequest(
                    "End date must not precede the start date".into(),
                ));
            }
        }

        self.practice_repo.update(id, &practice).await
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.practice_repo.delete(id).await
    }

    async fn add_observation(
        &self,
        practice_id: i32,
        role: UserRole,
        request: ObservationRequest,
    ) -> Result<Observation, AppError> {
        ensure_observation_access(role)?;

        if !self.practice_repo.exists(practice_id).await? {
            return Err(AppError::NotFound(format!(
                "Practice with id {} not found",
                practice_id
            )));
        }

        let observation = Observation {
            id: 0,
            practice_id,
            body: request.body,
            created_at: Utc::now(),
        };

        self.observation_repo.create(&observation).await
    }

    async fn list_observations(&self, practice_id: i32) -> Result<Vec<Observation>, AppError> {
        if !self.practice_repo.exists(practice_id).await? {
            return Err(AppError::NotFound(format!(
                "Practice with id {} not found",
                practice_id
            )));
        }

        self.observation_repo.list_by_practice(practice_id).await
    }

    async fn update_observation(
        &self,
        id: i32,
        role: UserRole,
        request: ObservationRequest,
    ) -> Result<Observation, AppError> {
        ensure_observation_access(role)?;
        self.observation_repo.update(id, &request.body).await
    }

    async fn delete_observation(&self, id: i32, role: UserRole) -> Result<(), AppError> {
        ensure_observation_access(role)?;
        self.observation_repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_accepts_known_values() {
        assert_eq!(
            parse_status(Some("IN_PROGRESS".into())).unwrap(),
            Some(PracticeStatus::InProgress)
        );
        assert_eq!(parse_status(None).unwrap(), None);
    }

    #[test]
    fn test_parse_status_rejects_unknown_values() {
        assert!(matches!(
            parse_status(Some("PAUSED".into())),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_observation_access_restricted_to_internships() {
        assert!(ensure_observation_access(UserRole::Internships).is_ok());
        assert!(matches!(
            ensure_observation_access(UserRole::Leadership),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            ensure_observation_access(UserRole::Outreach),
            Err(AppError::Forbidden(_))
        ));
    }
}
