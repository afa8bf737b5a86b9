//! Response DTOs
//!
//! Data structures for API response bodies. Entities serialize directly;
//! the types here cover envelopes the frontend expects in a fixed shape.

use serde::Serialize;

use crate::domain::User;

/// Login response: the signed token plus the authenticated user.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub user: User,
}

/// Generic message envelope.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Catalog entry for entities addressed by id.
#[derive(Debug, Serialize)]
pub struct IdNameItem {
    pub id: i32,
    pub name: String,
}

impl From<(i32, String)> for IdNameItem {
    fn from((id, name): (i32, String)) -> Self {
        Self { id, name }
    }
}

/// Catalog entry for students, addressed by rut.
#[derive(Debug, Serialize)]
pub struct StudentCatalogItem {
    pub rut: String,
    pub name: String,
}

impl From<(String, String)> for StudentCatalogItem {
    fn from((rut, name): (String, String)) -> Self {
        Self { rut, name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use chrono::Utc;

    #[test]
    fn test_login_response_uses_camel_case_token() {
        let response = LoginResponse {
            access_token: "jwt".into(),
            user: User {
                id: 1,
                email: "practicas@uta.cl".into(),
                password_hash: "hash".into(),
                full_name: "Coordinación".into(),
                role: UserRole::Internships,
                active: true,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"accessToken\":\"jwt\""));
        assert!(!json.contains("password_hash"));
    }
}
