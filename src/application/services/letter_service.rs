//! Letter Service
//!
//! Builds authorization letters: validates the three references and the
//! date range, allocates a folio, and renders the PDF.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::application::dto::request::LetterQuery;
use crate::domain::{
    Center, CenterRepository, Collaborator, CollaboratorRepository, LetterRepository,
    LetterRequest, Student, StudentRepository,
};
use crate::infrastructure::documents::{LetterData, LetterPdfGenerator};
use crate::shared::error::AppError;

/// A generated letter: the folio and the PDF bytes.
#[derive(Debug)]
pub struct GeneratedLetter {
    pub folio: i32,
    pub pdf: Vec<u8>,
}

impl GeneratedLetter {
    /// Download filename of this letter.
    pub fn filename(&self) -> String {
        format!("carta-{}.pdf", self.folio)
    }
}

/// Letter service trait for dependency injection
#[async_trait]
pub trait LetterService: Send + Sync {
    async fn generate(&self, query: LetterQuery) -> Result<GeneratedLetter, AppError>;
}

/// Spanish month names for the letter date line.
const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

fn spanish_date(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!(
        "{} de {} de {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("{} must be a YYYY-MM-DD date", field)))
}

/// Assemble the template fields from the allocated ledger row and the
/// resolved references. The date line comes from the ledger, not from
/// the wall clock at render time.
fn letter_data(
    request: &LetterRequest,
    student: Student,
    center: Center,
    collaborator: Collaborator,
    start: NaiveDate,
    end: NaiveDate,
) -> LetterData {
    LetterData {
        folio: request.folio,
        issued_on: spanish_date(request.issued_on),
        student_name: student.full_name,
        student_rut: student.rut,
        center_name: center.name,
        center_commune: center.commune.unwrap_or_default(),
        collaborator_name: collaborator.full_name,
        practice_kind: "práctica".into(),
        start_date: start.format("%d-%m-%Y").to_string(),
        end_date: end.format("%d-%m-%Y").to_string(),
    }
}

/// LetterService implementation
pub struct LetterServiceImpl<L, S, C, O>
where
    L: LetterRepository,
    S: StudentRepository,
    C: CenterRepository,
    O: CollaboratorRepository,
{
    letter_repo: Arc<L>,
    student_repo: Arc<S>,
    center_repo: Arc<C>,
    collaborator_repo: Arc<O>,
    generator: LetterPdfGenerator,
}

impl<L, S, C, O> LetterServiceImpl<L, S, C, O>
where
    L: LetterRepository,
    S: StudentRepository,
    C: CenterRepository,
    O: CollaboratorRepository,
{
    pub fn new(
        letter_repo: Arc<L>,
        student_repo: Arc<S>,
        center_repo: Arc<C>,
        collaborator_repo: Arc<O>,
        generator: LetterPdfGenerator,
    ) -> Self {
        Self {
            letter_repo,
            student_repo,
            center_repo,
            collaborator_repo,
            generator,
        }
    }
}

#[async_trait]
impl<L, S, C, O> LetterService for LetterServiceImpl<L, S, C, O>
where
    L: LetterRepository + 'static,
    S: StudentRepository + 'static,
    C: CenterRepository + 'static,
    O: CollaboratorRepository + 'static,
{
    async fn generate(&self, query: LetterQuery) -> Result<GeneratedLetter, AppError> {
        let start = parse_date("start", &query.start)?;
        let end = parse_date("end", &query.end)?;
        if end < start {
            return Err(AppError::BadRequest(
                "End date must not precede the start date".into(),
            ));
        }

        let student = self
            .student_repo
            .find_by_rut(&query.student_rut)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Student with rut {} not found", query.student_rut))
            })?;

        let center = self
            .center_repo
            .find_by_id(query.center_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Center with id {} not found", query.center_id))
            })?;

        let collaborator = self
            .collaborator_repo
            .find_by_id(query.collaborator_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Collaborator with id {} not found",
                    query.collaborator_id
                ))
            })?;

        let request = self.letter_repo.allocate_folio().await?;
        let data = letter_data(&request, student, center, collaborator, start, end);

        let pdf = self.generator.generate(&data).await?;
        Ok(GeneratedLetter {
            folio: request.folio,
            pdf,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spanish_date_formats_month_name() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        assert_eq!(spanish_date(date), "26 de agosto de 2026");
    }

    #[test]
    fn test_parse_date_accepts_iso() {
        assert!(parse_date("start", "2026-03-01").is_ok());
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        assert!(parse_date("start", "01-03-2026").is_err());
        assert!(parse_date("start", "not-a-date").is_err());
    }

    #[test]
    fn test_letter_data_uses_ledger_folio_and_date() {
        let now = chrono::Utc::now();
        let request = LetterRequest {
            id: 1,
            folio: 15,
            issued_on: NaiveDate::from_ymd_opt(2026, 5, 10).unwrap(),
            created_at: now,
        };
        let student = Student {
            id: 1,
            rut: "12.345.678-9".into(),
            full_name: "Ana Pérez".into(),
            level: None,
            email: None,
            phone: None,
            created_at: now,
            updated_at: now,
        };
        let center = Center {
            id: 3,
            name: "Liceo A-1".into(),
            region: None,
            commune: Some("Arica".into()),
            address: None,
            street_name: None,
            street_number: None,
            phone: None,
            email: None,
            kind: None,
            agreement: None,
            social_url: None,
            created_at: now,
            updated_at: now,
        };
        let collaborator = Collaborator {
            id: 2,
            rut: "9.876.543-2".into(),
            full_name: "Luis Rojas".into(),
            email: None,
            address: None,
            phone: None,
            position: None,
            alma_mater: None,
            created_at: now,
            updated_at: now,
        };

        let data = letter_data(
            &request,
            student,
            center,
            collaborator,
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 11, 30).unwrap(),
        );

        assert_eq!(data.folio, 15);
        assert_eq!(data.issued_on, "10 de mayo de 2026");
        assert_eq!(data.start_date, "01-09-2026");
        assert_eq!(data.end_date, "30-11-2026");
    }

    #[test]
    fn test_generated_letter_filename() {
        let letter = GeneratedLetter {
            folio: 7,
            pdf: vec![],
        };
        assert_eq!(letter.filename(), "carta-7.pdf");
    }
}
