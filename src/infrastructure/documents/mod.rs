//! Document Generation Module
//!
//! Rendered artifacts served by the API:
//! - Authorization letters as PDF (HTML template converted with headless
//!   Chrome/Chromium)
//! - Student survey spreadsheet export (xlsx)

pub mod excel;
pub mod letter;

pub use excel::student_survey_workbook;
pub use letter::{LetterData, LetterPdfGenerator};
