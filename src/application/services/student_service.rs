//! Student Service
//!
//! Business logic for student management.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::dto::request::{CreateStudentRequest, UpdateStudentRequest};
use crate::domain::{Student, StudentRepository};
use crate::shared::error::AppError;
use crate::shared::pagination::{Page, PageQuery};

/// Student service trait for dependency injection
#[async_trait]
pub trait StudentService: Send + Sync {
    async fn create(&self, request: CreateStudentRequest) -> Result<Student, AppError>;

    async fn get(&self, rut: &str) -> Result<Student, AppError>;

    async fn list(&self, query: PageQuery) -> Result<Page<Student>, AppError>;

    async fn update(&self, rut: &str, request: UpdateStudentRequest)
        -> Result<Student, AppError>;

    async fn delete(&self, rut: &str) -> Result<(), AppError>;
}

/// StudentService implementation
pub struct StudentServiceImpl<R>
where
    R: StudentRepository,
{
    repo: Arc<R>,
}

impl<R> StudentServiceImpl<R>
where
    R: StudentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> StudentService for StudentServiceImpl<R>
where
    R: StudentRepository + 'static,
{
    async fn create(&self, request: CreateStudentRequest) -> Result<Student, AppError> {
        let now = Utc::now();
        let student = Student {
            id: 0,
            rut: request.rut,
            full_name: request.full_name,
            level: request.level,
            email: request.email,
            phone: request.phone,
            created_at: now,
            updated_at: now,
        };

        self.repo.create(&student).await
    }

    async fn get(&self, rut: &str) -> Result<Student, AppError> {
        self.repo
            .find_by_rut(rut)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student with rut {} not found", rut)))
    }

    async fn list(&self, query: PageQuery) -> Result<Page<Student>, AppError> {
        let (items, total) = self.repo.list(&query).await?;
        Ok(Page::new(items, &query, total))
    }

    async fn update(
        &self,
        rut: &str,
        request: UpdateStudentRequest,
    ) -> Result<Student, AppError> {
        let mut student = self.get(rut).await?;

        if let Some(full_name) = request.full_name {
            student.full_name = full_name;
        }
        if request.level.is_some() {
            student.level = request.level;
        }
        if request.email.is_some() {
            student.email = request.email;
        }
        if request.phone.is_some() {
            student.phone = request.phone;
        }

        self.repo.update(rut, &student).await
    }

    async fn delete(&self, rut: &str) -> Result<(), AppError> {
        self.repo.delete(rut).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        StudentRepo {}

        #[async_trait]
        impl StudentRepository for StudentRepo {
            async fn create(&self, student: &Student) -> Result<Student, AppError>;
            async fn find_by_rut(&self, rut: &str) -> Result<Option<Student>, AppError>;
            async fn list(&self, query: &PageQuery) -> Result<(Vec<Student>, i64), AppError>;
            async fn update(&self, rut: &str, student: &Student) -> Result<Student, AppError>;
            async fn delete(&self, rut: &str) -> Result<(), AppError>;
            async fn rut_exists(&self, rut: &str) -> Result<bool, AppError>;
            async fn catalog(&self) -> Result<Vec<(String, String)>, AppError>;
        }
    }

    fn sample_student() -> Student {
        let now = Utc::now();
        Student {
            id: 1,
            rut: "12.345.678-9".into(),
            full_name: "Ana Pérez".into(),
            level: Some("Cuarto año".into()),
            email: None,
            phone: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_get_maps_missing_student_to_not_found() {
        let mut repo = MockStudentRepo::new();
        repo.expect_find_by_rut()
            .with(eq("99.999.999-9"))
            .returning(|_| Ok(None));

        let service = StudentServiceImpl::new(Arc::new(repo));
        let err = service.get("99.999.999-9").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_keeps_absent_fields() {
        let mut repo = MockStudentRepo::new();
        repo.expect_find_by_rut()
            .returning(|_| Ok(Some(sample_student())));
        repo.expect_update()
            .withf(|rut, student| {
                rut == "12.345.678-9"
                    && student.full_name == "Ana Pérez Soto"
                    && student.level.as_deref() == Some("Cuarto año")
            })
            .returning(|_, student| Ok(student.clone()));

        let service = StudentServiceImpl::new(Arc::new(repo));
        let updated = service
            .update(
                "12.345.678-9",
                UpdateStudentRequest {
                    full_name: Some("Ana Pérez Soto".into()),
                    level: None,
                    email: None,
                    phone: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.full_name, "Ana Pérez Soto");
        assert_eq!(updated.level.as_deref(), Some("Cuarto año"));
    }

    #[tokio::test]
    async fn test_create_passes_request_fields_through() {
        let mut repo = MockStudentRepo::new();
        repo.expect_create()
            .withf(|student| student.rut == "12.345.678-9" && student.full_name == "Ana Pérez")
            .returning(|student| Ok(student.clone()));

        let service = StudentServiceImpl::new(Arc::new(repo));
        let created = service
            .create(CreateStudentRequest {
                rut: "12.345.678-9".into(),
                full_name: "Ana Pérez".into(),
                level: None,
                email: None,
                phone: None,
            })
            .await
            .unwrap();

        assert_eq!(created.rut, "12.345.678-9");
    }
}
