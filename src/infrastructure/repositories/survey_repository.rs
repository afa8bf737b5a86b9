//! Survey Repository Implementation
//!
//! PostgreSQL implementation of the SurveyRepository trait. Answers are
//! denormalized with their question prompt and alternative label so detail
//! views and the spreadsheet export need no further lookups.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{
    Answer, AnswerInput, CollaboratorSurvey, StudentSurvey, Survey, SurveyKind, SurveyRepository,
};
use crate::shared::error::AppError;

/// Database row representation matching the student_surveys table schema.
#[derive(Debug, sqlx::FromRow)]
struct StudentSurveyRow {
    id: i32,
    student_name: Option<String>,
    workshop_tutor: Option<String>,
    collaborator_name: Option<String>,
    center_name: Option<String>,
    taken_at: DateTime<Utc>,
    remark: Option<String>,
}

impl StudentSurveyRow {
    fn into_survey(self) -> StudentSurvey {
        StudentSurvey {
            id: self.id,
            student_name: self.student_name,
            workshop_tutor: self.workshop_tutor,
            collaborator_name: self.collaborator_name,
            center_name: self.center_name,
            taken_at: self.taken_at,
            remark: self.remark,
        }
    }
}

/// Database row representation matching the collaborator_surveys table schema.
#[derive(Debug, sqlx::FromRow)]
struct CollaboratorSurveyRow {
    id: i32,
    collaborator_name: Option<String>,
    center_name: Option<String>,
    remark: Option<String>,
    taken_at: DateTime<Utc>,
}

impl CollaboratorSurveyRow {
    fn into_survey(self) -> CollaboratorSurvey {
        CollaboratorSurvey {
            id: self.id,
            collaborator_name: self.collaborator_name,
            center_name: self.center_name,
            remark: self.remark,
            taken_at: self.taken_at,
        }
    }
}

/// Answer row joined with the question prompt and alternative label.
#[derive(Debug, sqlx::FromRow)]
struct AnswerRow {
    id: i32,
    survey_id: i32,
    question_id: i32,
    question_prompt: String,
    alternative_id: Option<i32>,
    alternative_label: Option<String>,
    open_answer: Option<String>,
}

impl AnswerRow {
    fn into_answer(self) -> Answer {
        Answer {
            id: self.id,
            question_id: self.question_id,
            question_prompt: self.question_prompt,
            alternative_id: self.alternative_id,
            alternative_label: self.alternative_label,
            open_answer: self.open_answer,
        }
    }
}

const STUDENT_COLUMNS: &str =
    "id, student_name, workshop_tutor, collaborator_name, center_name, taken_at, remark";

const COLLABORATOR_COLUMNS: &str = "id, collaborator_name, center_name, remark, taken_at";

/// PostgreSQL survey repository implementation.
#[derive(Clone)]
pub struct PgSurveyRepository {
    pool: PgPool,
}

impl PgSurveyRepository {
    /// Create a new PgSurveyRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Answers for a batch of student surveys, grouped by survey id.
    async fn student_answers(
        &self,
        survey_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<Answer>>, AppError> {
        let rows = sqlx::query_as::<_, AnswerRow>(
            r#"
            SELECT a.id, a.student_survey_id AS survey_id, a.question_id,
                   q.prompt AS question_prompt, a.alternative_id,
                   alt.label AS alternative_label, a.open_answer
            FROM survey_answers a
            JOIN questions q ON q.id = a.question_id
            LEFT JOIN alternatives alt ON alt.id = a.alternative_id
            WHERE a.student_survey_id = ANY($1)
            ORDER BY a.question_id, a.id
            "#,
        )
        .bind(survey_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(group_answers(rows))
    }

    /// Answers for a batch of collaborator surveys, grouped by survey id.
    async fn collaborator_answers(
        &self,
        survey_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<Answer>>, AppError> {
        let rows = sqlx::query_as::<_, AnswerRow>(
            r#"
            SELECT a.id, a.collaborator_survey_id AS survey_id, a.question_id,
                   q.prompt AS question_prompt, a.alternative_id,
                   alt.label AS alternative_label, a.open_answer
            FROM survey_answers a
            JOIN questions q ON q.id = a.question_id
            LEFT JOIN alternatives alt ON alt.id = a.alternative_id
            WHERE a.collaborator_survey_id = ANY($1)
            ORDER BY a.question_id, a.id
            "#,
        )
        .bind(survey_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(group_answers(rows))
    }

    /// All student surveys newest first, answers attached.
    async fn student_surveys(&self) -> Result<Vec<Survey>, AppError> {
        let rows = sqlx::query_as::<_, StudentSurveyRow>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM student_surveys ORDER BY taken_at DESC, id DESC",
        ))
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut answers = self.student_answers(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                Survey::from_student(row.into_survey(), answers.remove(&id).unwrap_or_default())
            })
            .collect())
    }

    /// All collaborator surveys newest first, answers attached.
    async fn collaborator_surveys(&self) -> Result<Vec<Survey>, AppError> {
        let rows = sqlx::query_as::<_, CollaboratorSurveyRow>(&format!(
            "SELECT {COLLABORATOR_COLUMNS} FROM collaborator_surveys ORDER BY taken_at DESC, id DESC",
        ))
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut answers = self.collaborator_answers(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                Survey::from_collaborator(
                    row.into_survey(),
                    answers.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }
}

fn group_answers(rows: Vec<AnswerRow>) -> HashMap<i32, Vec<Answer>> {
    let mut grouped: HashMap<i32, Vec<Answer>> = HashMap::new();
    for row in rows {
        grouped.entry(row.survey_id).or_default().push(row.into_answer());
    }
    grouped
}

#[async_trait]
impl SurveyRepository for PgSurveyRepository {
    async fn create_student(&self, survey: &StudentSurvey) -> Result<StudentSurvey, AppError> {
        let row = sqlx::query_as::<_, StudentSurveyRow>(&format!(
            r#"
            INSERT INTO student_surveys (student_name, workshop_tutor, collaborator_name,
                                         center_name, remark)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {STUDENT_COLUMNS}
            "#,
        ))
        .bind(&survey.student_name)
        .bind(&survey.workshop_tutor)
        .bind(&survey.collaborator_name)
        .bind(&survey.center_name)
        .bind(&survey.remark)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_survey())
    }

    async fn create_collaborator(
        &self,
        survey: &CollaboratorSurvey,
    ) -> Result<CollaboratorSurvey, AppError> {
        let row = sqlx::query_as::<_, CollaboratorSurveyRow>(&format!(
            r#"
            INSERT INTO collaborator_surveys (collaborator_name, center_name, remark)
            VALUES ($1, $2, $3)
            RETURNING {COLLABORATOR_COLUMNS}
            "#,
        ))
        .bind(&survey.collaborator_name)
        .bind(&survey.center_name)
        .bind(&survey.remark)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_survey())
    }

    async fn insert_answers(
        &self,
        kind: SurveyKind,
        survey_id: i32,
        answers: &[AnswerInput],
    ) -> Result<(), AppError> {
        let column = match kind {
            SurveyKind::Student => "student_survey_id",
            SurveyKind::Collaborator => "collaborator_survey_id",
        };

        let mut tx = self.pool.begin().await?;

        for answer in answers {
            sqlx::query(&format!(
                r#"
                INSERT INTO survey_answers ({column}, question_id, alternative_id, open_answer)
                VALUES ($1, $2, $3, $4)
                "#,
            ))
            .bind(survey_id)
            .bind(answer.question_id)
            .bind(answer.alternative_id)
            .bind(&answer.open_answer)
            .execute(&mut *tx)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                    AppError::BadRequest(format!(
                        "Question {} or its alternative does not exist",
                        answer.question_id
                    ))
                }
                _ => AppError::Database(e),
            })?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Survey>, AppError> {
        let mut surveys = self.student_surveys().await?;
        surveys.extend(self.collaborator_surveys().await?);
        Ok(surveys)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Survey>, AppError> {
        let student = sqlx::query_as::<_, StudentSurveyRow>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM student_surveys WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = student {
            let mut answers = self.student_answers(&[id]).await?;
            return Ok(Some(Survey::from_student(
                row.into_survey(),
                answers.remove(&id).unwrap_or_default(),
            )));
        }

        let collaborator = sqlx::query_as::<_, CollaboratorSurveyRow>(&format!(
            "SELECT {COLLABORATOR_COLUMNS} FROM collaborator_surveys WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = collaborator {
            let mut answers = self.collaborator_answers(&[id]).await?;
            return Ok(Some(Survey::from_collaborator(
                row.into_survey(),
                answers.remove(&id).unwrap_or_default(),
            )));
        }

        Ok(None)
    }

    async fn upsert_open_answers(
        &self,
        survey_id: i32,
        answers: &[(i32, String)],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for (question_id, text) in answers {
            let updated = sqlx::query(
                r#"
                UPDATE survey_answers
                SET open_answer = $3
                WHERE student_survey_id = $1 AND question_id = $2
                "#,
            )
            .bind(survey_id)
            .bind(question_id)
            .bind(text)
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                sqlx::query(
                    r#"
                    INSERT INTO survey_answers (student_survey_id, question_id, open_answer)
                    VALUES ($1, $2, $3)
                    "#,
                )
                .bind(survey_id)
                .bind(question_id)
                .bind(text)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list_student_full(&self) -> Result<Vec<Survey>, AppError> {
        self.student_surveys().await
    }
}
