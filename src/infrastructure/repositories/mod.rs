//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! This module provides concrete implementations of the repository traits
//! defined in the domain layer. Each repository handles data access for
//! a specific entity type.
//!
//! ## Available Repositories
//!
//! - **StudentRepository** - Students keyed by rut
//! - **CenterRepository** - Educational centers with dependent-row counts
//! - **WorkerRepository** - Center staff
//! - **TutorRepository** - Tutors with role and position join tables
//! - **CollaboratorRepository** - Center-side collaborating teachers
//! - **PracticeRepository** - Internship placements with joined summaries
//! - **ObservationRepository** - Follow-up notes on practices
//! - **ActivityRepository** - Workshop activities
//! - **SurveyRepository** - Perception surveys, both variants
//! - **UserRepository** - Login accounts and reset tokens
//! - **LetterRepository** - Folio ledger for authorization letters
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{
//!     PgStudentRepository, PgCenterRepository, PgPracticeRepository,
//! };
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let student_repo = PgStudentRepository::new(pool.clone());
//!     let center_repo = PgCenterRepository::new(pool.clone());
//!     let practice_repo = PgPracticeRepository::new(pool.clone());
//! }
//! ```

pub mod activity_repository;
pub mod center_repository;
pub mod collaborator_repository;
pub mod letter_repository;
pub mod observation_repository;
pub mod practice_repository;
pub mod student_repository;
pub mod survey_repository;
pub mod tutor_repository;
pub mod user_repository;
pub mod worker_repository;

pub use activity_repository::PgActivityRepository;
pub use center_repository::PgCenterRepository;
pub use collaborator_repository::PgCollaboratorRepository;
pub use letter_repository::PgLetterRepository;
pub use observation_repository::PgObservationRepository;
pub use practice_repository::PgPracticeRepository;
pub use student_repository::PgStudentRepository;
pub use survey_repository::PgSurveyRepository;
pub use tutor_repository::PgTutorRepository;
pub use user_repository::PgUserRepository;
pub use worker_repository::PgWorkerRepository;
