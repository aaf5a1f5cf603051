//! # Domain Module
//!
//! Contains all business logic for the consent form application.
//!
//! ## Module Organization
//!
//! - **submission_service**: Submission lifecycle (create, read, delete, stats)
//! - **form_validation**: Complete-error-set validation of the consent form
//! - **dashboard_service**: Pure filter/sort/search derivation for the admin view
//! - **admin_auth_service**: Shared-password gating for the dashboard
//! - **export_service**: CSV export of all submissions
//! - **pdf_service**: Single-page consent document rendering
//! - **signature**: Data-URI signature decoding for embedding
//!
//! ## Key Business Rules
//!
//! - Required fields are validated once, at submission time, and every
//!   failure is collected before the user is notified
//! - `id` and `created_at` are assigned at creation and never mutated;
//!   records are never updated, only created and deleted
//! - The dashboard listing is a pure function of the raw records and the
//!   current search/filter/sort choices
//! - Stats always reflect the full, unfiltered set
//! - The signature payload is opaque; only the document renderer inspects it,
//!   and only to decide embeddable-or-placeholder

pub mod admin_auth_service;
pub mod commands;
pub mod dashboard_service;
pub mod export_service;
pub mod form_validation;
pub mod models;
pub mod pdf_service;
pub mod signature;
pub mod submission_service;

pub use admin_auth_service::*;
pub use dashboard_service::*;
pub use export_service::*;
pub use form_validation::*;
pub use pdf_service::*;
pub use submission_service::*;
