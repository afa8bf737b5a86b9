//! Application Layer
//!
//! Business logic services and data transfer objects (DTOs). This layer
//! orchestrates the flow of data between the presentation layer and the
//! domain entities.

pub mod dto;
pub mod services;
