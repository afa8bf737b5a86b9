//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Login, JWT tokens, password reset flow
//! - **StudentService**: Student management keyed by rut
//! - **CenterService**: Educational center management
//! - **WorkerService**: Center staff management
//! - **TutorService**: Tutor management with role/position normalization
//! - **CollaboratorService**: Collaborating teacher management
//! - **PracticeService**: Placements and their observations
//! - **ActivityService**: Workshop activity management
//! - **SurveyService**: Perception surveys, exports and catalogs
//! - **LetterService**: Authorization letter generation

pub mod activity_service;
pub mod auth_service;
pub mod center_service;
pub mod collaborator_service;
pub mod letter_service;
pub mod practice_service;
pub mod student_service;
pub mod survey_service;
pub mod tutor_service;
pub mod worker_service;

// Re-export auth service types
pub use auth_service::{AuthError, AuthService, AuthServiceImpl, Claims};

// Re-export entity service types
pub use activity_service::{ActivityService, ActivityServiceImpl};
pub use center_service::{CenterService, CenterServiceImpl};
pub use collaborator_service::{CollaboratorService, CollaboratorServiceImpl};
pub use letter_service::{GeneratedLetter, LetterService, LetterServiceImpl};
pub use practice_service::{PracticeService, PracticeServiceImpl};
pub use student_service::{StudentService, StudentServiceImpl};
pub use survey_service::{SurveyService, SurveyServiceImpl};
pub use tutor_service::{TutorService, TutorServiceImpl};
pub use worker_service::{WorkerService, WorkerServiceImpl};
