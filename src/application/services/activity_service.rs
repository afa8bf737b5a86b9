//! Activity Service
//!
//! Business logic for workshop activity management.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::dto::request::{CreateActivityRequest, UpdateActivityRequest};
use crate::domain::{Activity, ActivityFilter, ActivityRepository, ActivityStatus};
use crate::shared::error::AppError;
use crate::shared::pagination::{Page, PageQuery};

/// Activity service trait for dependency injection
#[async_trait]
pub trait ActivityService: Send + Sync {
    async fn create(&self, request: CreateActivityRequest) -> Result<Activity, AppError>;

    async fn get(&self, id: i32) -> Result<Activity, AppError>;

    async fn list(
        &self,
        query: PageQuery,
        status: Option<String>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Page<Activity>, AppError>;

    async fn update(&self, id: i32, request: UpdateActivityRequest)
        -> Result<Activity, AppError>;

    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

/// Parse an optional status string, rejecting unknown values.
fn parse_status(status: Option<String>) -> Result<Option<ActivityStatus>, AppError> {
    match status {
        None => Ok(None),
        Some(raw) => ActivityStatus::parse(&raw)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown activity status: {}", raw))),
    }
}

/// ActivityService implementation
pub struct ActivityServiceImpl<R>
where
    R: ActivityRepository,
{
    repo: Arc<R>,
}

impl<R> ActivityServiceImpl<R>
where
    R: ActivityRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> ActivityService for ActivityServiceImpl<R>
where
    R: ActivityRepository + 'static,
{
    async fn create(&self, request: CreateActivityRequest) -> Result<Activity, AppError> {
        let activity = Activity {
            id: 0,
            title: request.title,
            description: request.description,
            workshop_tutor: request.workshop_tutor,
            student_name: request.student_name,
            status: parse_status(request.status)?.unwrap_or_default(),
            evidence_url: request.evidence_url,
            recorded_at: Utc::now(),
        };

        self.repo.create(&activity).await
    }

    async fn get(&self, id: i32) -> Result<Activity, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Activity with id {} not found", id)))
    }

    async fn list(
        &self,
        query: PageQuery,
        status: Option<String>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Page<Activity>, AppError> {
        let filter = ActivityFilter {
            status: parse_status(status)?,
            from,
            to,
        };

        let (items, total) = self.repo.list(&query, &filter).await?;
        Ok(Page::new(items, &query, total))
    }

    async fn update(
        &self,
        id: i32,
        request: UpdateActivityRequest,
    ) -> Result<Activity, AppError> {
        let mut activity = self.get(id).await?;

        if let Some(title) = request.title {
            activity.title = title;
        }
        if request.description.is_some() {
            activity.description = request.description;
        }
        if request.workshop_tutor.is_some() {
            activity.workshop_tutor = request.workshop_tutor;
        }
        if request.student_name.is_some() {
            activity.student_name = request.student_name;
        }
        if let Some(status) = parse_status(request.status)? {
            activity.status = status;
        }
        if request.evidence_url.is_some() {
            activity.evidence_url = request.evidence_url;
        }

        self.repo.update(id, &activity).await
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_accepts_known_values() {
        assert_eq!(
            parse_status(Some("observed".into())).unwrap(),
            Some(ActivityStatus::Observed)
        );
    }

    #[test]
    fn test_parse_status_rejects_unknown_values() {
        assert!(parse_status(Some("DONE".into())).is_err());
    }
}
