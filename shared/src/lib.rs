use serde::{Deserialize, Serialize};
use std::fmt;

/// A parent-completed consent record, the only persisted entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    /// Child's full legal name
    pub child_full_name: String,
    /// ISO 8601 date (YYYY-MM-DD)
    pub child_date_of_birth: String,
    /// Parent/guardian full name
    pub parent_full_name: String,
    /// Free-form phone number, not normalized
    pub parent_phone_number: String,
    /// Who to call when the parent is unreachable
    pub emergency_contact_info: String,
    /// Optional; empty string means nothing reported
    pub allergies_medical_conditions: String,
    pub permission_to_participate: bool,
    pub emergency_medical_auth: bool,
    pub photo_video_release: bool,
    /// Signature drawing encoded as an image data URI; opaque to the store
    pub signature: SignatureData,
    /// RFC 3339 timestamp, server-assigned at creation and never mutated
    pub created_at: String,
}

/// Request payload for creating a new submission.
///
/// `id` and `created_at` are assigned by the server, so the request carries
/// everything else the form collects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSubmissionRequest {
    pub child_full_name: String,
    pub child_date_of_birth: String,
    pub parent_full_name: String,
    pub parent_phone_number: String,
    pub emergency_contact_info: String,
    pub allergies_medical_conditions: String,
    pub permission_to_participate: bool,
    pub emergency_medical_auth: bool,
    pub photo_video_release: bool,
    pub signature: SignatureData,
}

/// Response after creating a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub submission: Submission,
    pub success_message: String,
}

/// Response containing a list of submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionListResponse {
    pub submissions: Vec<Submission>,
}

/// Aggregate counts over the full (unfiltered) set of submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionStats {
    pub total: u64,
    pub with_permissions: u64,
    pub with_photo_release: u64,
}

/// The signature drawing as an image data URI.
///
/// The drawing surface re-encodes the complete image on every finished stroke,
/// so the held value is always the latest full encoding, never a delta. The
/// payload is opaque everywhere except the document renderer, which only
/// checks that it is embeddable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureData(String);

impl SignatureData {
    pub fn new(data_uri: impl Into<String>) -> Self {
        Self(data_uri.into())
    }

    /// An empty signature (nothing drawn yet, or cleared).
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Erase the drawing. Clearing is idempotent: reading the value
    /// afterwards yields empty until a new stroke is captured.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignatureData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of validating the consent form input.
///
/// `errors` is the complete set of failures, not the first one found; the
/// form shows every problem at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormValidation {
    pub is_valid: bool,
    pub errors: Vec<FormValidationError>,
}

impl FormValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid(errors: Vec<FormValidationError>) -> Self {
        Self {
            is_valid: false,
            errors,
        }
    }
}

/// Specific validation errors for the consent form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormValidationError {
    EmptyChildFullName,
    MissingDateOfBirth,
    InvalidDateOfBirth(String),
    EmptyParentFullName,
    EmptyParentPhoneNumber,
    EmptyEmergencyContactInfo,
    MissingSignature,
}

impl FormValidationError {
    /// The form field this error belongs to, for inline display.
    pub fn field(&self) -> &'static str {
        match self {
            FormValidationError::EmptyChildFullName => "child_full_name",
            FormValidationError::MissingDateOfBirth
            | FormValidationError::InvalidDateOfBirth(_) => "child_date_of_birth",
            FormValidationError::EmptyParentFullName => "parent_full_name",
            FormValidationError::EmptyParentPhoneNumber => "parent_phone_number",
            FormValidationError::EmptyEmergencyContactInfo => "emergency_contact_info",
            FormValidationError::MissingSignature => "signature",
        }
    }
}

impl fmt::Display for FormValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormValidationError::EmptyChildFullName => {
                write!(f, "Child's full name is required")
            }
            FormValidationError::MissingDateOfBirth => write!(f, "Date of birth is required"),
            FormValidationError::InvalidDateOfBirth(value) => {
                write!(f, "'{}' is not a valid date", value)
            }
            FormValidationError::EmptyParentFullName => {
                write!(f, "Parent's full name is required")
            }
            FormValidationError::EmptyParentPhoneNumber => write!(f, "Phone number is required"),
            FormValidationError::EmptyEmergencyContactInfo => {
                write!(f, "Emergency contact is required")
            }
            FormValidationError::MissingSignature => write!(f, "Signature is required"),
        }
    }
}

/// Dashboard filter against `permission_to_participate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionFilter {
    #[default]
    All,
    Granted,
    Denied,
}

/// Dashboard sort order for the submission list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionSort {
    /// Child name, lexicographic ascending
    Name,
    /// Creation time, newest first
    #[default]
    Date,
}

/// Request for admin dashboard access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub password: String,
}

/// Response from admin password verification.
///
/// Access is UI gating only, held in memory for the session; there is no
/// token and no expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub success: bool,
    pub message: String,
}
