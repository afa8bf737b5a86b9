//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database repositories (PostgreSQL)
//! - Outgoing email (SMTP)
//! - Document generation (PDF letters, spreadsheet exports)

pub mod database;
pub mod documents;
pub mod email;
pub mod repositories;
