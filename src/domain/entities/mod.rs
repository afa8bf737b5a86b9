//! # Domain Entities
//!
//! Core domain entities representing the main business objects of the
//! internship management office. All entities map directly to their
//! corresponding database tables.
//!
//! ## Core Entities
//!
//! - **Student**: A student keyed by national ID (rut)
//! - **Center**: An educational center that hosts internships
//! - **Worker**: Staff employed at a center
//! - **Tutor**: University-side tutor (workshop tutor / supervisor roles)
//! - **Collaborator**: Center-side teacher supervising a practice
//! - **Practice**: An internship placement tying the three together
//! - **Activity**: A workshop activity recorded for a practice period
//!
//! ## Supporting Entities
//!
//! - **Observation**: Free-text follow-up notes on a practice
//! - **Survey**: Perception surveys (student and collaborator variants)
//!   with their question/alternative/answer rows
//! - **User**: Login account with a coordination role
//! - **PasswordResetToken**: One-hour reset tokens mailed to users
//! - **LetterRequest**: Folio ledger for generated authorization letters
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access
//! operations. These traits are implemented in the infrastructure layer,
//! following the dependency inversion principle.

mod activity;
mod center;
mod collaborator;
mod letter;
mod practice;
mod student;
mod survey;
mod tutor;
mod user;
mod worker;

pub use student::{Student, StudentRepository};

pub use center::{Center, CenterDetail, CenterKind, CenterSummary, CenterRepository};

pub use worker::{Worker, WorkerRepository};

pub use tutor::{Tutor, TutorRole, TutorRepository};

pub use collaborator::{Collaborator, CollaboratorRepository};

pub use practice::{
    Observation, ObservationRepository, Practice, PracticeDetail, PracticeFilter,
    PracticeRepository, PracticeStatus,
};

pub use activity::{Activity, ActivityFilter, ActivityStatus, ActivityRepository};

pub use survey::{
    Alternative, Answer, AnswerInput, CollaboratorSurvey, Question, QuestionKind, StudentSurvey,
    Survey, SurveyKind, SurveyRepository,
};

pub use user::{PasswordResetToken, User, UserRepository, UserRole};

pub use letter::{LetterRequest, LetterRepository};
