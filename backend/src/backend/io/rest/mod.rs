//! # REST API Interface Layer
//!
//! Provides HTTP REST endpoints for the consent form application. This layer
//! handles:
//! - Request/response serialization and deserialization
//! - Error translation from domain to HTTP status codes
//! - Request logging
//!
//! It is a pure translation layer: no business logic lives here.

pub mod admin_apis;
pub mod export_apis;
pub mod mappers;
pub mod submission_apis;

pub use admin_apis::*;
pub use export_apis::*;
pub use submission_apis::*;
