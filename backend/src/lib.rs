//! Consent form collection service.
//!
//! Everything behind the browser UI: the submission store, the domain
//! services (form validation, dashboard derivation, exports, admin gating),
//! and the REST layer the form and dashboard talk to.

pub mod backend;
