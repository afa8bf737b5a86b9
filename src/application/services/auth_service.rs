//! Authentication Service
//!
//! Handles login, JWT issuance, and the password reset flow.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{FrontendSettings, JwtSettings};
use crate::domain::{PasswordResetToken, User, UserRepository, UserRole};
use crate::infrastructure::email::Mailer;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate with credentials; returns the user and a signed JWT.
    async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError>;

    /// Start the password reset flow. Succeeds whether or not the email
    /// exists, so the endpoint never leaks which accounts are registered.
    async fn forgot_password(&self, email: &str) -> Result<(), AuthError>;

    /// Complete the password reset flow with a mailed token.
    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError>;

    /// Validate an access token and extract its claims.
    fn validate_token(&self, access_token: &str) -> Result<Claims, AuthError>;
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Coordination role of the user
    pub role: UserRole,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Parse the subject back into a user id.
    pub fn user_id(&self) -> Result<i32, AuthError> {
        self.sub.parse::<i32>().map_err(|_| AuthError::InvalidToken)
    }
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Reset token is invalid or expired")]
    InvalidResetToken,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// AuthService implementation
pub struct AuthServiceImpl<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    mailer: Arc<Mailer>,
    jwt_settings: JwtSettings,
    frontend_settings: FrontendSettings,
}

impl<U> AuthServiceImpl<U>
where
    U: UserRepository,
{
    /// Create a new AuthServiceImpl
    pub fn new(
        user_repo: Arc<U>,
        mailer: Arc<Mailer>,
        jwt_settings: JwtSettings,
        frontend_settings: FrontendSettings,
    ) -> Self {
        Self {
            user_repo,
            mailer,
            jwt_settings,
            frontend_settings,
        }
    }

    /// Hash a password using Argon2id
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against the stored value. Rows predating the
    /// hashing rollout hold the plaintext password; those compare by
    /// equality and get upgraded on the next successful login.
    fn verify_password(&self, password: &str, stored: &str) -> (bool, bool) {
        match PasswordHash::new(stored) {
            Ok(parsed_hash) => {
                let ok = Argon2::default()
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok();
                (ok, false)
            }
            // Not a valid PHC string, treat as a legacy plaintext row
            Err(_) => (stored == password, true),
        }
    }

    /// Generate a signed access token for a user
    fn generate_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.jwt_settings.access_token_expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role,
            exp: expiry.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))
    }
}

#[async_trait]
impl<U> AuthService for AuthServiceImpl<U>
where
    U: UserRepository + 'static,
{
    async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.active {
            return Err(AuthError::InvalidCredentials);
        }

        let (ok, legacy) = self.verify_password(password, &user.password_hash);
        if !ok {
            return Err(AuthError::InvalidCredentials);
        }

        // Upgrade legacy plaintext rows to Argon2 in place
        if legacy {
            let hash = self.hash_password(password)?;
            self.user_repo
                .update_password(user.id, &hash)
                .await
                .map_err(|e| AuthError::Internal(e.to_string()))?;
        }

        let token = self.generate_token(&user)?;
        Ok((user, token))
    }

    async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        let Some(user) = self
            .user_repo
            .find_by_email(email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
        else {
            // Unknown address, respond as if the mail was sent
            return Ok(());
        };

        if !user.active {
            return Ok(());
        }

        let token = PasswordResetToken::issue(user.id, uuid::Uuid::new_v4().to_string());
        let token = self
            .user_repo
            .create_reset_token(&token)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let reset_url = self.frontend_settings.reset_password_url(&token.token);
        self.mailer
            .send_password_reset(&user.email, &user.full_name, &reset_url)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(())
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        let token = self
            .user_repo
            .find_reset_token(token)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::InvalidResetToken)?;

        if !token.is_valid() {
            return Err(AuthError::InvalidResetToken);
        }

        let hash = self.hash_password(new_password)?;
        self.user_repo
            .update_password(token.user_id, &hash)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        self.user_repo
            .mark_token_used(token.id)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(())
    }

    fn validate_token(&self, access_token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(
            access_token,
            &DecodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_user_id_parses_subject() {
        let claims = Claims {
            sub: "17".into(),
            role: UserRole::Internships,
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims.user_id().unwrap(), 17);
    }

    #[test]
    fn test_claims_user_id_rejects_garbage() {
        let claims = Claims {
            sub: "abc".into(),
            role: UserRole::Leadership,
            exp: 0,
            iat: 0,
        };
        assert!(matches!(claims.user_id(), Err(AuthError::InvalidToken)));
    }
}
