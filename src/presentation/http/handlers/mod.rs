//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod activity;
pub mod auth;
pub mod center;
pub mod collaborator;
pub mod health;
pub mod letter;
pub mod practice;
pub mod student;
pub mod survey;
pub mod tutor;
pub mod worker;
