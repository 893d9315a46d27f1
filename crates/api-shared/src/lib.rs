//! # API Shared
//!
//! Shared wire types and utilities for MediBook APIs.
//!
//! Contains:
//! - Request/response DTOs (`dto` module) with OpenAPI schemas
//! - The shared `HealthService`
//!
//! DTOs are the only types that cross the HTTP boundary; translation to and
//! from `medibook-core` domain types lives here so handlers stay thin.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
