//! Student survey spreadsheet export
//!
//! Builds the xlsx workbook downloaded by the coordination office. One row
//! per student survey, with its answers flattened into a summary column.

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::domain::Survey;
use crate::shared::error::AppError;

const HEADERS: &[&str] = &[
    "ID",
    "Estudiante",
    "Tutor de taller",
    "Docente colaborador",
    "Centro",
    "Fecha",
    "Observación",
    "Respuestas",
];

/// Flatten a survey's answers into one display string.
fn answers_summary(survey: &Survey) -> String {
    survey
        .answers
        .iter()
        .map(|a| {
            let value = a
                .alternative_label
                .as_deref()
                .or(a.open_answer.as_deref())
                .unwrap_or("-");
            format!("{}: {}", a.question_prompt, value)
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn build(surveys: &[Survey]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name("Encuestas")?;

    let header_format = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, survey) in surveys.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_number(row, 0, f64::from(survey.id))?;
        sheet.write_string(row, 1, survey.student_name.as_deref().unwrap_or(""))?;
        sheet.write_string(row, 2, survey.workshop_tutor.as_deref().unwrap_or(""))?;
        sheet.write_string(row, 3, survey.collaborator_name.as_deref().unwrap_or(""))?;
        sheet.write_string(row, 4, survey.center_name.as_deref().unwrap_or(""))?;
        sheet.write_string(row, 5, &survey.taken_at.format("%d-%m-%Y").to_string())?;
        sheet.write_string(row, 6, survey.remark.as_deref().unwrap_or(""))?;
        sheet.write_string(row, 7, &answers_summary(survey))?;
    }

    sheet.autofit();
    workbook.save_to_buffer()
}

/// Serialize student surveys into xlsx bytes.
pub fn student_survey_workbook(surveys: &[Survey]) -> Result<Vec<u8>, AppError> {
    build(surveys).map_err(|e| AppError::Internal(format!("Spreadsheet export: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Answer, StudentSurvey, Survey};
    use chrono::Utc;

    fn sample_survey() -> Survey {
        Survey::from_student(
            StudentSurvey {
                id: 3,
                student_name: Some("María Pérez".into()),
                workshop_tutor: Some("Dra. Soto".into()),
                collaborator_name: Some("Prof. Rojas".into()),
                center_name: Some("Liceo A-1".into()),
                taken_at: Utc::now(),
                remark: None,
            },
            vec![
                Answer {
                    id: 1,
                    question_id: 10,
                    question_prompt: "¿Cómo evalúa el acompañamiento?".into(),
                    alternative_id: Some(4),
                    alternative_label: Some("Muy bueno".into()),
                    open_answer: None,
                },
                Answer {
                    id: 2,
                    question_id: 11,
                    question_prompt: "Comentarios".into(),
                    alternative_id: None,
                    alternative_label: None,
                    open_answer: Some("Sin observaciones".into()),
                },
            ],
        )
    }

    #[test]
    fn test_answers_summary_prefers_alternative_label() {
        let summary = answers_summary(&sample_survey());
        assert!(summary.contains("¿Cómo evalúa el acompañamiento?: Muy bueno"));
        assert!(summary.contains("Comentarios: Sin observaciones"));
    }

    #[test]
    fn test_workbook_builds_with_rows() {
        let bytes = student_survey_workbook(&[sample_survey()]).unwrap();
        // xlsx files are zip archives
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_workbook_builds_empty() {
        let bytes = student_survey_workbook(&[]).unwrap();
        assert!(!bytes.is_empty());
    }
}
