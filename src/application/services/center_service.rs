//! Center Service
//!
//! Business logic for educational center management. The detail view
//! embeds the practices hosted at the center and its staff.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::dto::request::{CreateCenterRequest, UpdateCenterRequest};
use crate::domain::{
    Center, CenterDetail, CenterKind, CenterRepository, CenterSummary, PracticeRepository,
    WorkerRepository,
};
use crate::shared::error::AppError;
use crate::shared::pagination::{Page, PageQuery};

/// Center service trait for dependency injection
#[async_trait]
pub trait CenterService: Send + Sync {
    async fn create(&self, request: CreateCenterRequest) -> Result<Center, AppError>;

    async fn get(&self, id: i32) -> Result<Center, AppError>;

    /// Center plus its practices and workers.
    async fn get_detail(&self, id: i32) -> Result<CenterDetail, AppError>;

    async fn list(
        &self,
        query: PageQuery,
        kind: Option<String>,
    ) -> Result<Page<CenterSummary>, AppError>;

    async fn update(&self, id: i32, request: UpdateCenterRequest) -> Result<Center, AppError>;

    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

/// Parse an optional kind string, rejecting unknown values.
fn parse_kind(kind: Option<String>) -> Result<Option<CenterKind>, AppError> {
    match kind {
        None => Ok(None),
        Some(raw) => CenterKind::parse(&raw)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown center kind: {}", raw))),
    }
}

/// CenterService implementation
pub struct CenterServiceImpl<R, P, W>
where
    R: CenterRepository,
    P: PracticeRepository,
    W: WorkerRepository,
{
    repo: Arc<R>,
    practice_repo: Arc<P>,
    worker_repo: Arc<W>,
}

impl<R, P, W> CenterServiceImpl<R, P, W>
where
    R: CenterRepository,
    P: PracticeRepository,
    W: WorkerRepository,
{
    pub fn new(repo: Arc<R>, practice_repo: Arc<P>, worker_repo: Arc<W>) -> Self {
        Self {
            repo,
            practice_repo,
            worker_repo,
        }
    }
}

#[async_trait]
impl<R, P, W> CenterService for CenterServiceImpl<R, P, W>
where
    R: CenterRepository + 'static,
    P: PracticeRepository + 'static,
    W: WorkerRepository + 'static,
{
    async fn create(&self, request: CreateCenterRequest) -> Result<Center, AppError> {
        let now = Utc::now();
        let center = Center {
            id: 0,
            name: request.name,
            region: request.region,
            commune: request.commune,
            address: request.address,
            street_name: request.street_name,
            street_number: request.street_number,
            phone: request.phone,
            email: request.email,
            kind: parse_kind(request.kind)?,
            agreement: request.agreement,
            social_url: request.social_url,
            created_at: now,
            updated_at: now,
        };

        self.repo.create(&center).await
    }

    async fn get(&self, id: i32) -> Result<Center, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Center with id {} not found", id)))
    }

    async fn get_detail(&self, id: i32) -> Result<CenterDetail, AppError> {
        let center = self.get(id).await?;
        let practices = self.practice_repo.list_by_center(id).await?;
        let workers = self.worker_repo.list_by_center(id).await?;

        Ok(CenterDetail {
            center,
            practices,
            workers,
        })
    }

    async fn list(
        &self,
        query: PageQuery,
        kind: Option<String>,
    ) -> Result<Page<CenterSummary>, AppError> {
        let kind = parse_kind(kind)?;
        let (items, total) = self.repo.list(&query, kind).await?;
        Ok(Page::new(items, &query, total))
    }

    async fn update(&self, id: i32, request: UpdateCenterRequest) -> Result<Center, AppError> {
        let mut center = self.get(id).await?;

        if let Some(name) = request.name {
            center.name = name;
        }
        if request.region.is_some() {
            center.region = request.region;
        }
        if request.commune.is_some() {
            center.commune = request.commune;
        }
        if request.address.is_some() {
            center.address = request.address;
        }
        if request.street_name.is_some() {
            center.street_name = request.street_name;
        }
        if request.street_number.is_some() {
            center.street_number = request.street_number;
        }
        if request.phone.is_some() {
            center.phone = request.phone;
        }
        if request.email.is_some() {
            center.email = request.email;
        }
        if request.kind.is_some() {
            center.kind = parse_kind(request.kind)?;
        }
        if request.agreement.is_some() {
            center.agreement = request.agreement;
        }
        if request.social_url.is_some() {
            center.social_url = request.social_url;
        }

        self.repo.update(id, &center).await
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Practice, PracticeDetail, PracticeFilter, PracticeStatus, Worker};
    use chrono::NaiveDate;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        CenterRepo {}

        #[async_trait]
        impl CenterRepository for CenterRepo {
            async fn create(&self, center: &Center) -> Result<Center, AppError>;
            async fn find_by_id(&self, id: i32) -> Result<Option<Center>, AppError>;
            async fn list(
                &self,
                query: &PageQuery,
                kind: Option<CenterKind>,
            ) -> Result<(Vec<CenterSummary>, i64), AppError>;
            async fn update(&self, id: i32, center: &Center) -> Result<Center, AppError>;
            async fn delete(&self, id: i32) -> Result<(), AppError>;
            async fn exists(&self, id: i32) -> Result<bool, AppError>;
            async fn catalog(&self) -> Result<Vec<(i32, String)>, AppError>;
        }
    }

    mock! {
        PracticeRepo {}

        #[async_trait]
        impl PracticeRepository for PracticeRepo {
            async fn create(&self, practice: &Practice) -> Result<Practice, AppError>;
            async fn find_detail(&self, id: i32) -> Result<Option<PracticeDetail>, AppError>;
            async fn list(
                &self,
                query: &PageQuery,
                filter: &PracticeFilter,
            ) -> Result<(Vec<PracticeDetail>, i64), AppError>;
            async fn list_by_center(&self, center_id: i32) -> Result<Vec<PracticeDetail>, AppError>;
            async fn update(&self, id: i32, practice: &Practice) -> Result<Practice, AppError>;
            async fn delete(&self, id: i32) -> Result<(), AppError>;
            async fn exists(&self, id: i32) -> Result<bool, AppError>;
        }
    }

    mock! {
        WorkerRepo {}

        #[async_trait]
        impl WorkerRepository for WorkerRepo {
            async fn create(&self, worker: &Worker) -> Result<Worker, AppError>;
            async fn find_by_id(&self, id: i32) -> Result<Option<Worker>, AppError>;
            async fn list(&self, query: &PageQuery) -> Result<(Vec<Worker>, i64), AppError>;
            async fn list_by_center(&self, center_id: i32) -> Result<Vec<Worker>, AppError>;
            async fn update(&self, id: i32, worker: &Worker) -> Result<Worker, AppError>;
            async fn delete(&self, id: i32) -> Result<(), AppError>;
        }
    }

    fn sample_center() -> Center {
        let now = Utc::now();
        Center {
            id: 3,
            name: "Escuela Los Aromos".into(),
            region: Some("Arica y Parinacota".into()),
            commune: Some("Arica".into()),
            address: None,
            street_name: None,
            street_number: None,
            phone: None,
            email: None,
            kind: Some(CenterKind::Subsidized),
            agreement: None,
            social_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_practice_detail(center_id: i32) -> PracticeDetail {
        let now = Utc::now();
        PracticeDetail {
            practice: Practice {
                id: 7,
                student_rut: "12.345.678-9".into(),
                center_id,
                collaborator_id: 2,
                status: PracticeStatus::InProgress,
                start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
                end_date: None,
                kind: None,
                created_at: now,
                updated_at: now,
            },
            student_name: "Ana Pérez".into(),
            center_name: "Escuela Los Aromos".into(),
            center_commune: Some("Arica".into()),
            collaborator_name: "Luis Rojas".into(),
        }
    }

    fn sample_worker(center_id: i32) -> Worker {
        let now = Utc::now();
        Worker {
            id: 5,
            rut: "9.876.543-2".into(),
            full_name: "María Díaz".into(),
            role: Some("Jefe UTP".into()),
            email: None,
            phone: None,
            center_id,
            center_name: Some("Escuela Los Aromos".into()),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_get_detail_embeds_practices_and_workers() {
        let mut center_repo = MockCenterRepo::new();
        center_repo
            .expect_find_by_id()
            .with(eq(3))
            .returning(|_| Ok(Some(sample_center())));

        let mut practice_repo = MockPracticeRepo::new();
        practice_repo
            .expect_list_by_center()
            .with(eq(3))
            .returning(|id| Ok(vec![sample_practice_detail(id)]));

        let mut worker_repo = MockWorkerRepo::new();
        worker_repo
            .expect_list_by_center()
            .with(eq(3))
            .returning(|id| Ok(vec![sample_worker(id)]));

        let service = CenterServiceImpl::new(
            Arc::new(center_repo),
            Arc::new(practice_repo),
            Arc::new(worker_repo),
        );
        let detail = service.get_detail(3).await.unwrap();

        assert_eq!(detail.center.id, 3);
        assert_eq!(detail.practices.len(), 1);
        assert_eq!(detail.practices[0].practice.center_id, 3);
        assert_eq!(detail.workers.len(), 1);
        assert_eq!(detail.workers[0].full_name, "María Díaz");
    }

    #[tokio::test]
    async fn test_get_detail_maps_missing_center_to_not_found() {
        let mut center_repo = MockCenterRepo::new();
        center_repo.expect_find_by_id().returning(|_| Ok(None));

        // No expectations on the join repositories: a missing center
        // must short-circuit before they are queried.
        let service = CenterServiceImpl::new(
            Arc::new(center_repo),
            Arc::new(MockPracticeRepo::new()),
            Arc::new(MockWorkerRepo::new()),
        );
        let err = service.get_detail(99).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_parse_kind_accepts_known_values() {
        assert_eq!(
            parse_kind(Some("SLEP".into())).unwrap(),
            Some(CenterKind::Slep)
        );
        assert_eq!(parse_kind(None).unwrap(), None);
    }

    #[test]
    fn test_parse_kind_rejects_unknown_values() {
        assert!(matches!(
            parse_kind(Some("MUNICIPAL".into())),
            Err(AppError::BadRequest(_))
        ));
    }
}
