//! Login user entity, reset tokens, and repository trait.
//!
//! Maps to the `users` and `password_reset_tokens` tables.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Coordination role of a login account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Career leadership (jefatura)
    Leadership,
    /// Outreach coordination (vinculación)
    Outreach,
    /// Internship coordination (prácticas)
    Internships,
}

impl UserRole {
    /// Convert from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "leadership" => Some(Self::Leadership),
            "outreach" => Some(Self::Outreach),
            "internships" => Some(Self::Internships),
            _ => None,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leadership => "leadership",
            Self::Outreach => "outreach",
            Self::Internships => "internships",
        }
    }

    /// Observation write access is restricted to the internship
    /// coordination.
    pub fn can_manage_observations(&self) -> bool {
        matches!(self, Self::Internships)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A login account of the coordination office.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,

    /// Email address (unique)
    pub email: String,

    /// Argon2 hash; legacy rows may still hold a plaintext password
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub full_name: String,

    pub role: UserRole,

    /// Inactive accounts cannot log in
    pub active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Validity window for password reset tokens.
pub const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// A single-use password reset token mailed to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetToken {
    pub id: i32,
    pub user_id: i32,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl PasswordResetToken {
    /// Build a fresh token for a user, expiring one hour from now.
    pub fn issue(user_id: i32, token: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_id,
            token,
            expires_at: now + Duration::hours(RESET_TOKEN_TTL_HOURS),
            used: false,
            created_at: now,
        }
    }

    /// A token is usable while unused and unexpired.
    pub fn is_valid(&self) -> bool {
        !self.used && self.expires_at > Utc::now()
    }
}

/// Repository trait for User and reset-token data access operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Replace a user's password hash.
    async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), AppError>;

    /// Store a freshly issued reset token.
    async fn create_reset_token(
        &self,
        token: &PasswordResetToken,
    ) -> Result<PasswordResetToken, AppError>;

    /// Look a reset token up by its opaque value.
    async fn find_reset_token(&self, token: &str)
        -> Result<Option<PasswordResetToken>, AppError>;

    /// Mark a reset token consumed.
    async fn mark_token_used(&self, id: i32) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_roundtrip() {
        for role in [UserRole::Leadership, UserRole::Outreach, UserRole::Internships] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_user_role_parse_is_case_insensitive() {
        assert_eq!(UserRole::parse("LEADERSHIP"), Some(UserRole::Leadership));
    }

    #[test]
    fn test_only_internships_manage_observations() {
        assert!(UserRole::Internships.can_manage_observations());
        assert!(!UserRole::Leadership.can_manage_observations());
        assert!(!UserRole::Outreach.can_manage_observations());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: 1,
            email: "practicas@uta.cl".into(),
            password_hash: "secret-hash".into(),
            full_name: "Coordinación de Prácticas".into(),
            role: UserRole::Internships,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("secret-hash"));
    }

    #[test]
    fn test_fresh_reset_token_is_valid() {
        let token = PasswordResetToken::issue(1, "abc".into());
        assert!(token.is_valid());
    }

    #[test]
    fn test_used_reset_token_is_invalid() {
        let mut token = PasswordResetToken::issue(1, "abc".into());
        token.used = true;
        assert!(!token.is_valid());
    }

    #[test]
    fn test_expired_reset_token_is_invalid() {
        let mut token = PasswordResetToken::issue(1, "abc".into());
        token.expires_at = Utc::now() - Duration::minutes(1);
        assert!(!token.is_valid());
    }
}
