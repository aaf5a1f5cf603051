//! Consent form validation.
//!
//! Validation runs once, at submission time. Every field is checked and the
//! complete error set is collected before anyone is notified; the result is
//! never just the first failure. A submission that fails validation must not
//! reach storage.

use chrono::NaiveDate;
use shared::{FormValidation, FormValidationError};

use crate::backend::domain::commands::submissions::CreateSubmissionCommand;

/// Validates consent form input before it becomes a submission.
#[derive(Clone, Default)]
pub struct FormValidationService {}

impl FormValidationService {
    pub fn new() -> Self {
        Self {}
    }

    /// Validate a create command, collecting all failures.
    pub fn validate(&self, command: &CreateSubmissionCommand) -> FormValidation {
        let mut errors = Vec::new();

        if command.child_full_name.trim().is_empty() {
            errors.push(FormValidationError::EmptyChildFullName);
        }

        let date_of_birth = command.child_date_of_birth.trim();
        if date_of_birth.is_empty() {
            errors.push(FormValidationError::MissingDateOfBirth);
        } else if NaiveDate::parse_from_str(date_of_birth, "%Y-%m-%d").is_err() {
            errors.push(FormValidationError::InvalidDateOfBirth(
                date_of_birth.to_string(),
            ));
        }

        if command.parent_full_name.trim().is_empty() {
            errors.push(FormValidationError::EmptyParentFullName);
        }
        if command.parent_phone_number.trim().is_empty() {
            errors.push(FormValidationError::EmptyParentPhoneNumber);
        }
        if command.emergency_contact_info.trim().is_empty() {
            errors.push(FormValidationError::EmptyEmergencyContactInfo);
        }
        if command.signature.is_empty() {
            errors.push(FormValidationError::MissingSignature);
        }

        if errors.is_empty() {
            FormValidation::valid()
        } else {
            FormValidation::invalid(errors)
        }
    }
}
