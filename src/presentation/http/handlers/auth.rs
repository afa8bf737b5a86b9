//! Authentication Handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::application::dto::request::{
    ForgotPasswordRequest, LoginRequest, ResetPasswordRequest,
};
use crate::application::dto::response::{LoginResponse, MessageResponse};
use crate::application::services::{AuthError, AuthService, AuthServiceImpl};
use crate::infrastructure::repositories::PgUserRepository;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

fn auth_service(state: &AppState) -> AuthServiceImpl<PgUserRepository> {
    let user_repo = Arc::new(PgUserRepository::new(state.db.clone()));
    AuthServiceImpl::new(
        user_repo,
        state.mailer.clone(),
        state.settings.jwt.clone(),
        state.settings.frontend.clone(),
    )
}

fn map_auth_error(e: AuthError) -> AppError {
    match e {
        AuthError::InvalidCredentials => {
            AppError::Unauthorized("Invalid email or password".into())
        }
        AuthError::TokenExpired => AppError::Unauthorized("Token expired".into()),
        AuthError::InvalidToken => AppError::Unauthorized("Invalid token".into()),
        AuthError::InvalidResetToken => {
            AppError::BadRequest("Reset token is invalid or expired".into())
        }
        AuthError::Internal(msg) => AppError::Internal(msg),
    }
}

/// Login with credentials
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    body.validate().map_err(validation_error)?;

    let service = auth_service(&state);
    let (user, access_token) = service
        .login(&body.email, &body.password)
        .await
        .map_err(map_auth_error)?;

    Ok(Json(LoginResponse { access_token, user }))
}

/// Start the password reset flow. Responds the same whether or not the
/// address belongs to an account.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    body.validate().map_err(validation_error)?;

    let service = auth_service(&state);
    service
        .forgot_password(&body.email)
        .await
        .map_err(map_auth_error)?;

    Ok(Json(MessageResponse::new(
        "If the address belongs to an account, a reset link was sent",
    )))
}

/// Complete the password reset flow with a mailed token
pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    body.validate().map_err(validation_error)?;

    let service = auth_service(&state);
    service
        .reset_password(&body.token, &body.password)
        .await
        .map_err(map_auth_error)?;

    Ok(Json(MessageResponse::new("Password updated")))
}
