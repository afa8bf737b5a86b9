//! Authorization letter PDF generation
//!
//! Renders the letter as HTML from a template and converts it to PDF with
//! headless Chrome/Chromium. The converter binary can be pinned through
//! configuration; otherwise common executable names are probed.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use askama::Template;
use tokio::process::Command;
use uuid::Uuid;

use crate::shared::error::AppError;

/// Fields interpolated into the letter template, already formatted for
/// display.
#[derive(Debug, Clone, Template)]
#[template(path = "letter.html")]
pub struct LetterData {
    pub folio: i32,
    pub issued_on: String,
    pub student_name: String,
    pub student_rut: String,
    pub center_name: String,
    pub center_commune: String,
    pub collaborator_name: String,
    pub practice_kind: String,
    pub start_date: String,
    pub end_date: String,
}

/// PDF generator backed by a headless browser.
#[derive(Clone)]
pub struct LetterPdfGenerator {
    /// Optional custom converter command
    converter: Option<String>,
}

impl LetterPdfGenerator {
    /// Create a generator, optionally pinning the converter binary.
    pub fn new(converter: Option<String>) -> Self {
        Self { converter }
    }

    /// Detect an available Chrome/Chromium browser.
    async fn detect_chrome() -> Option<String> {
        // Try common Chrome/Chromium executables in order of preference
        let candidates = [
            "google-chrome",
            "chrome",
            "chromium",
            "chromium-browser",
            "google-chrome-stable",
        ];

        for candidate in candidates {
            let probe = Command::new(candidate)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await;
            if matches!(probe, Ok(status) if status.success()) {
                return Some(candidate.to_owned());
            }
        }

        None
    }

    /// Convert an HTML file to PDF using Chrome/Chromium.
    async fn html_to_pdf_chrome(
        chrome_cmd: &str,
        html_path: &Path,
        pdf_path: &Path,
    ) -> Result<(), AppError> {
        let canonical = html_path
            .canonicalize()
            .map_err(|e| AppError::Internal(format!("Letter temp file: {}", e)))?;

        let status = Command::new(chrome_cmd)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--run-all-compositor-stages-before-draw")
            .arg("--virtual-time-budget=10000")
            .arg(format!("--print-to-pdf={}", pdf_path.display()))
            .arg(format!("file://{}", canonical.display()))
            .stderr(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .await
            .map_err(|e| AppError::Internal(format!("PDF converter failed to start: {}", e)))?;

        if !status.success() {
            return Err(AppError::Internal("PDF conversion failed".into()));
        }

        Ok(())
    }

    /// Render the letter and return the PDF bytes.
    pub async fn generate(&self, data: &LetterData) -> Result<Vec<u8>, AppError> {
        let html = data
            .render()
            .map_err(|e| AppError::Internal(format!("Letter template: {}", e)))?;

        let temp_dir = std::env::temp_dir();
        let stem = format!("carta-{}-{}", data.folio, Uuid::new_v4());
        let html_path = temp_dir.join(format!("{stem}.html"));
        let pdf_path = temp_dir.join(format!("{stem}.pdf"));

        tokio::fs::write(&html_path, &html)
            .await
            .map_err(|e| AppError::Internal(format!("Letter temp file: {}", e)))?;

        let converter = match &self.converter {
            Some(converter) => converter.clone(),
            None => Self::detect_chrome().await.ok_or_else(|| {
                AppError::Internal(
                    "PDF conversion unavailable: Chrome/Chromium not found".into(),
                )
            })?,
        };

        let result = Self::html_to_pdf_chrome(&converter, &html_path, &pdf_path).await;

        let bytes = match result {
            Ok(()) => tokio::fs::read(&pdf_path)
                .await
                .map_err(|e| AppError::Internal(format!("Letter output: {}", e))),
            Err(e) => Err(e),
        };

        let _ = tokio::fs::remove_file(&html_path).await;
        let _ = tokio::fs::remove_file(&pdf_path).await;

        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> LetterData {
        LetterData {
            folio: 42,
            issued_on: "26 de agosto de 2026".into(),
            student_name: "María Pérez".into(),
            student_rut: "12.345.678-9".into(),
            center_name: "Liceo A-1".into(),
            center_commune: "Arica".into(),
            collaborator_name: "Prof. Carlos Rojas".into(),
            practice_kind: "Práctica Profesional".into(),
            start_date: "01-09-2026".into(),
            end_date: "30-11-2026".into(),
        }
    }

    #[test]
    fn test_letter_template_renders_fields() {
        let html = sample_data().render().unwrap();
        assert!(html.contains("42"));
        assert!(html.contains("María Pérez"));
        assert!(html.contains("Liceo A-1"));
        assert!(html.contains("Prof. Carlos Rojas"));
    }

    #[test]
    fn test_letter_template_escapes_html() {
        let mut data = sample_data();
        data.student_name = "<script>alert(1)</script>".into();
        let html = data.render().unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
    }
}
