//! Survey entities and repository trait.
//!
//! Maps to the `questions`, `alternatives`, `student_surveys`,
//! `collaborator_surveys` and `survey_answers` tables. Two survey variants
//! exist: student perception and collaborator/leadership perception. The
//! API merges both into a single listing tagged by kind.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Survey variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurveyKind {
    Student,
    Collaborator,
}

impl SurveyKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "STUDENT" => Some(Self::Student),
            "COLLABORATOR" => Some(Self::Collaborator),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::Collaborator => "COLLABORATOR",
        }
    }
}

/// Question kind: closed questions carry scored alternatives, open
/// questions take free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionKind {
    Closed,
    Open,
}

impl QuestionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "CLOSED" => Some(Self::Closed),
            "OPEN" => Some(Self::Open),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "CLOSED",
            Self::Open => "OPEN",
        }
    }
}

/// A survey question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i32,
    pub prompt: String,
    pub kind: QuestionKind,
}

/// A scored alternative of a closed question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alternative {
    pub id: i32,
    pub question_id: i32,
    pub label: String,
    pub score: i32,
}

/// One answer row, denormalized with the question prompt and the chosen
/// alternative label for detail views and exports.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub id: i32,
    pub question_id: i32,
    pub question_prompt: String,
    pub alternative_id: Option<i32>,
    pub alternative_label: Option<String>,
    pub open_answer: Option<String>,
}

/// A student perception survey row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentSurvey {
    pub id: i32,
    pub student_name: Option<String>,
    pub workshop_tutor: Option<String>,
    pub collaborator_name: Option<String>,
    pub center_name: Option<String>,
    pub taken_at: DateTime<Utc>,
    pub remark: Option<String>,
}

/// A collaborator/leadership perception survey row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorSurvey {
    pub id: i32,
    pub collaborator_name: Option<String>,
    pub center_name: Option<String>,
    pub remark: Option<String>,
    pub taken_at: DateTime<Utc>,
}

/// Merged view over both survey variants, as exposed by the API.
#[derive(Debug, Clone, Serialize)]
pub struct Survey {
    pub id: i32,
    pub kind: SurveyKind,
    pub student_name: Option<String>,
    pub workshop_tutor: Option<String>,
    pub collaborator_name: Option<String>,
    pub center_name: Option<String>,
    pub taken_at: DateTime<Utc>,
    pub remark: Option<String>,
    pub answers: Vec<Answer>,
}

impl Survey {
    pub fn from_student(row: StudentSurvey, answers: Vec<Answer>) -> Self {
        Self {
            id: row.id,
            kind: SurveyKind::Student,
            student_name: row.student_name,
            workshop_tutor: row.workshop_tutor,
            collaborator_name: row.collaborator_name,
            center_name: row.center_name,
            taken_at: row.taken_at,
            remark: row.remark,
            answers,
        }
    }

    pub fn from_collaborator(row: CollaboratorSurvey, answers: Vec<Answer>) -> Self {
        Self {
            id: row.id,
            kind: SurveyKind::Collaborator,
            student_name: None,
            workshop_tutor: None,
            collaborator_name: row.collaborator_name,
            center_name: row.center_name,
            taken_at: row.taken_at,
            remark: row.remark,
            answers,
        }
    }
}

/// Answer values supplied when a survey is submitted.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerInput {
    pub question_id: i32,
    pub alternative_id: Option<i32>,
    pub open_answer: Option<String>,
}

/// Repository trait for survey data access operations.
#[async_trait]
pub trait SurveyRepository: Send + Sync {
    /// Insert a student survey row.
    async fn create_student(&self, survey: &StudentSurvey) -> Result<StudentSurvey, AppError>;

    /// Insert a collaborator survey row.
    async fn create_collaborator(
        &self,
        survey: &CollaboratorSurvey,
    ) -> Result<CollaboratorSurvey, AppError>;

    /// Insert the answer rows of a freshly created survey.
    async fn insert_answers(
        &self,
        kind: SurveyKind,
        survey_id: i32,
        answers: &[AnswerInput],
    ) -> Result<(), AppError>;

    /// Both variants merged, student surveys newest first, then
    /// collaborator surveys newest first, answers included.
    async fn list_all(&self) -> Result<Vec<Survey>, AppError>;

    /// Find one survey by ID: student surveys take precedence, then
    /// collaborator surveys, mirroring the shared ID namespace of the API.
    async fn find_by_id(&self, id: i32) -> Result<Option<Survey>, AppError>;

    /// Upsert open answers on a student survey: existing (survey,
    /// question) rows get their text replaced, missing rows are inserted.
    async fn upsert_open_answers(
        &self,
        survey_id: i32,
        answers: &[(i32, String)],
    ) -> Result<(), AppError>;

    /// All student surveys with answers, for the spreadsheet export.
    async fn list_student_full(&self) -> Result<Vec<Survey>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_survey_kind_roundtrip() {
        assert_eq!(SurveyKind::parse("STUDENT"), Some(SurveyKind::Student));
        assert_eq!(
            SurveyKind::parse("collaborator"),
            Some(SurveyKind::Collaborator)
        );
        assert_eq!(SurveyKind::parse("OTHER"), None);
    }

    #[test]
    fn test_question_kind_roundtrip() {
        assert_eq!(QuestionKind::parse("CLOSED"), Some(QuestionKind::Closed));
        assert_eq!(QuestionKind::parse("open"), Some(QuestionKind::Open));
        assert_eq!(QuestionKind::parse(""), None);
    }

    #[test]
    fn test_merged_view_tags_kind() {
        let row = CollaboratorSurvey {
            id: 7,
            collaborator_name: Some("Prof. Carlos".into()),
            center_name: Some("Liceo A-1".into()),
            remark: None,
            taken_at: Utc::now(),
        };
        let survey = Survey::from_collaborator(row, vec![]);
        assert_eq!(survey.kind, SurveyKind::Collaborator);
        assert!(survey.student_name.is_none());
    }
}
