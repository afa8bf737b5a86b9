//! Letter Handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};

use crate::application::dto::request::LetterQuery;
use crate::application::services::{LetterService, LetterServiceImpl};
use crate::infrastructure::repositories::{
    PgCenterRepository, PgCollaboratorRepository, PgLetterRepository, PgStudentRepository,
};
use crate::shared::error::AppError;
use crate::startup::AppState;

type Service = LetterServiceImpl<
    PgLetterRepository,
    PgStudentRepository,
    PgCenterRepository,
    PgCollaboratorRepository,
>;

fn letter_service(state: &AppState) -> Service {
    LetterServiceImpl::new(
        Arc::new(PgLetterRepository::new(state.db.clone())),
        Arc::new(PgStudentRepository::new(state.db.clone())),
        Arc::new(PgCenterRepository::new(state.db.clone())),
        Arc::new(PgCollaboratorRepository::new(state.db.clone())),
        state.pdf.clone(),
    )
}

/// Generate an authorization letter PDF with a fresh folio
pub async fn generate_letter(
    State(state): State<AppState>,
    Query(query): Query<LetterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let letter = letter_service(&state).generate(query).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", letter.filename()),
            ),
        ],
        letter.pdf,
    ))
}
