//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Forgot password request
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Reset password request
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Create student request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, max = 20, message = "Rut must be 1-20 characters"))]
    pub rut: String,

    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub full_name: String,

    #[validate(length(max = 60, message = "Level must be at most 60 characters"))]
    pub level: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,
}

/// Update student request. Absent fields keep their current value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStudentRequest {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub full_name: Option<String>,

    #[validate(length(max = 60, message = "Level must be at most 60 characters"))]
    pub level: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,
}

/// Create center request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCenterRequest {
    #[validate(length(min = 1, max = 160, message = "Name must be 1-160 characters"))]
    pub name: String,

    pub region: Option<String>,
    pub commune: Option<String>,
    pub address: Option<String>,
    pub street_name: Option<String>,
    pub street_number: Option<i32>,
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// PRIVATE, SUBSIDIZED or SLEP
    pub kind: Option<String>,
    pub agreement: Option<String>,
    pub social_url: Option<String>,
}

/// Update center request. Absent fields keep their current value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCenterRequest {
    #[validate(length(min = 1, max = 160, message = "Name must be 1-160 characters"))]
    pub name: Option<String>,

    pub region: Option<String>,
    pub commune: Option<String>,
    pub address: Option<String>,
    pub street_name: Option<String>,
    pub street_number: Option<i32>,
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub kind: Option<String>,
    pub agreement: Option<String>,
    pub social_url: Option<String>,
}

/// Extra query parameters accepted by the center listing.
#[derive(Debug, Default, Deserialize)]
pub struct CenterListQuery {
    /// Narrow by center kind
    pub kind: Option<String>,
}

/// Create worker request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkerRequest {
    #[validate(length(min = 1, max = 20, message = "Rut must be 1-20 characters"))]
    pub rut: String,

    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub full_name: String,

    pub role: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub phone: Option<String>,

    pub center_id: i32,
}

/// Update worker request. Absent fields keep their current value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateWorkerRequest {
    #[validate(length(min = 1, max = 20, message = "Rut must be 1-20 characters"))]
    pub rut: Option<String>,

    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub full_name: Option<String>,

    pub role: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub phone: Option<String>,

    pub center_id: Option<i32>,
}

/// Create tutor request. Roles and positions accept both the singular and
/// the plural field; the service merges and deduplicates them.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTutorRequest {
    #[validate(length(min = 1, max = 20, message = "Rut must be 1-20 characters"))]
    pub rut: String,

    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub address: Option<String>,
    pub phone: Option<String>,
    pub alma_mater: Option<String>,

    /// Single role (Tallerista or Supervisor)
    pub role: Option<String>,
    /// Multiple roles
    pub roles: Option<Vec<String>>,

    /// Single free-text position
    pub position: Option<String>,
    /// Multiple positions
    pub positions: Option<Vec<String>>,
}

impl CreateTutorRequest {
    /// Merge `role`/`roles` into one list, preserving order.
    pub fn role_inputs(&self) -> Vec<String> {
        merge_inputs(&self.role, &self.roles)
    }

    /// Merge `position`/`positions` into one list, preserving order.
    pub fn position_inputs(&self) -> Vec<String> {
        merge_inputs(&self.position, &self.positions)
    }
}

/// Update tutor request. Roles/positions are replaced wholesale only when
/// one of the corresponding fields is present.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTutorRequest {
    #[validate(length(min = 1, max = 20, message = "Rut must be 1-20 characters"))]
    pub rut: Option<String>,

    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub full_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub address: Option<String>,
    pub phone: Option<String>,
    pub alma_mater: Option<String>,

    pub role: Option<String>,
    pub roles: Option<Vec<String>>,
    pub position: Option<String>,
    pub positions: Option<Vec<String>>,
}

impl UpdateTutorRequest {
    pub fn replaces_roles(&self) -> bool {
        self.role.is_some() || self.roles.is_some()
    }

    pub fn replaces_positions(&self) -> bool {
        self.position.is_some() || self.positions.is_some()
    }

    pub fn role_inputs(&self) -> Vec<String> {
        merge_inputs(&self.role, &self.roles)
    }

    pub fn position_inputs(&self) -> Vec<String> {
        merge_inputs(&self.position, &self.positions)
    }
}

fn merge_inputs(single: &Option<String>, many: &Option<Vec<String>>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    if let Some(value) = single {
        merged.push(value.clone());
    }
    if let Some(values) = many {
        merged.extend(values.iter().cloned());
    }
    merged
        .into_iter()
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Extra query parameters accepted by the tutor listing.
#[derive(Debug, Default, Deserialize)]
pub struct TutorListQuery {
    /// Narrow to tutors holding this role
    pub role: Option<String>,
}

/// Create collaborator request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCollaboratorRequest {
    #[validate(length(min = 1, max = 20, message = "Rut must be 1-20 characters"))]
    pub rut: String,

    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub address: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub alma_mater: Option<String>,
}

/// Update collaborator request. Absent fields keep their current value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCollaboratorRequest {
    #[validate(length(min = 1, max = 20, message = "Rut must be 1-20 characters"))]
    pub rut: Option<String>,

    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub full_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub address: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub alma_mater: Option<String>,
}

/// Create practice request
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePracticeRequest {
    #[validate(length(min = 1, max = 20, message = "Rut must be 1-20 characters"))]
    pub student_rut: String,

    pub center_id: i32,
    pub collaborator_id: i32,

    /// PENDING (default), IN_PROGRESS, FINISHED or REJECTED
    pub status: Option<String>,

    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,

    #[validate(length(max = 60, message = "Kind must be at most 60 characters"))]
    pub kind: Option<String>,
}

/// Update practice request. Absent fields keep their current value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePracticeRequest {
    #[validate(length(min = 1, max = 20, message = "Rut must be 1-20 characters"))]
    pub student_rut: Option<String>,

    pub center_id: Option<i32>,
    pub collaborator_id: Option<i32>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    #[validate(length(max = 60, message = "Kind must be at most 60 characters"))]
    pub kind: Option<String>,
}

/// Extra query parameters accepted by the practice listing.
#[derive(Debug, Default, Deserialize)]
pub struct PracticeListQuery {
    pub status: Option<String>,
    pub student_rut: Option<String>,
}

/// Create or update observation request
#[derive(Debug, Deserialize, Validate)]
pub struct ObservationRequest {
    #[validate(length(min = 1, message = "Body is required"))]
    pub body: String,
}

/// Create activity request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[validate(length(min = 1, max = 160, message = "Title must be 1-160 characters"))]
    pub title: String,

    pub description: Option<String>,
    pub workshop_tutor: Option<String>,
    pub student_name: Option<String>,

    /// PENDING (default), APPROVED or OBSERVED
    pub status: Option<String>,
    pub evidence_url: Option<String>,
}

/// Update activity request. Absent fields keep their current value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateActivityRequest {
    #[validate(length(min = 1, max = 160, message = "Title must be 1-160 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,
    pub workshop_tutor: Option<String>,
    pub student_name: Option<String>,
    pub status: Option<String>,
    pub evidence_url: Option<String>,
}

/// Extra query parameters accepted by the activity listing. `from` and
/// `to` arrive as `YYYY-MM-DD` dates and bound an inclusive day range.
#[derive(Debug, Default, Deserialize)]
pub struct ActivityListQuery {
    pub status: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ActivityListQuery {
    /// Start of the `from` day, as an inclusive UTC lower bound.
    pub fn from_bound(&self) -> Option<DateTime<Utc>> {
        self.from.map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }

    /// Start of the day after `to`, as an exclusive UTC upper bound, so
    /// the whole `to` day is included.
    pub fn to_bound(&self) -> Option<DateTime<Utc>> {
        self.to
            .and_then(|d| d.succ_opt())
            .map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }
}

/// Create survey request: the variant tag plus a kind-specific payload.
#[derive(Debug, Deserialize)]
pub struct CreateSurveyRequest {
    /// STUDENT or COLLABORATOR
    pub kind: String,
    pub data: serde_json::Value,
}

/// One open answer in an answers update.
#[derive(Debug, Deserialize, Validate)]
pub struct OpenAnswerInput {
    pub question_id: i32,

    #[validate(length(min = 1, message = "Answer text is required"))]
    pub text: String,
}

/// Update open answers of a student survey.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAnswersRequest {
    #[validate(nested)]
    pub answers: Vec<OpenAnswerInput>,
}

/// Query parameters of the letter endpoint. Dates arrive as `YYYY-MM-DD`
/// strings and are validated by the service.
#[derive(Debug, Deserialize)]
pub struct LetterQuery {
    pub student_rut: String,
    pub center_id: i32,
    pub collaborator_id: i32,
    pub start: String,
    pub end: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_requires_valid_email() {
        let req = LoginRequest {
            email: "not-an-email".into(),
            password: "secret123".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_tutor_request_merges_role_fields() {
        let req = CreateTutorRequest {
            rut: "11.111.111-1".into(),
            full_name: "Dra. Soto".into(),
            email: None,
            address: None,
            phone: None,
            alma_mater: None,
            role: Some("Tallerista".into()),
            roles: Some(vec!["Supervisor".into(), "  ".into()]),
            position: None,
            positions: Some(vec!["Coordinadora".into()]),
        };
        assert_eq!(req.role_inputs(), vec!["Tallerista", "Supervisor"]);
        assert_eq!(req.position_inputs(), vec!["Coordinadora"]);
    }

    #[test]
    fn test_update_tutor_replace_flags() {
        let req = UpdateTutorRequest {
            rut: None,
            full_name: Some("Nuevo Nombre".into()),
            email: None,
            address: None,
            phone: None,
            alma_mater: None,
            role: None,
            roles: None,
            position: Some("Jefa de carrera".into()),
            positions: None,
        };
        assert!(!req.replaces_roles());
        assert!(req.replaces_positions());
    }

    #[test]
    fn test_activity_query_accepts_plain_dates() {
        let query: ActivityListQuery =
            serde_json::from_str(r#"{"from":"2026-01-01","to":"2026-01-31"}"#).unwrap();

        assert_eq!(
            query.from_bound().unwrap().to_rfc3339(),
            "2026-01-01T00:00:00+00:00"
        );
        // Upper bound is the start of the next day, keeping Jan 31 in range.
        assert_eq!(
            query.to_bound().unwrap().to_rfc3339(),
            "2026-02-01T00:00:00+00:00"
        );
    }

    #[test]
    fn test_activity_query_bounds_absent_when_unset() {
        let query = ActivityListQuery::default();
        assert!(query.from_bound().is_none());
        assert!(query.to_bound().is_none());
    }
}
