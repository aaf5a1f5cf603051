//! Domain-level command and query types.
//!
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod submissions {
    use shared::{PermissionFilter, SignatureData, SubmissionSort};

    use crate::backend::domain::models::submission::Submission as DomainSubmission;

    /// Input for creating a new submission.
    #[derive(Debug, Clone)]
    pub struct CreateSubmissionCommand {
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

    /// Query parameters for the dashboard listing.
    #[derive(Debug, Clone, Default)]
    pub struct SubmissionListQuery {
        /// Case-insensitive term matched against names and the phone number
        pub search: Option<String>,
        pub permission: PermissionFilter,
        pub sort: SubmissionSort,
    }

    /// Result of listing submissions.
    #[derive(Debug, Clone)]
    pub struct SubmissionListResult {
        pub submissions: Vec<DomainSubmission>,
    }

    /// Aggregate counts over the full set of submissions.
    #[derive(Debug, Clone)]
    pub struct SubmissionStatsResult {
        pub total: u64,
        pub with_permissions: u64,
        pub with_photo_release: u64,
    }
}

pub mod admin {
    /// Input for admin password verification.
    #[derive(Debug, Clone)]
    pub struct ValidateAdminPasswordCommand {
        pub password: String,
    }

    /// Result of admin password verification.
    #[derive(Debug, Clone)]
    pub struct ValidateAdminPasswordResult {
        pub success: bool,
        pub message: String,
    }
}

pub mod export {
    /// A rendered CSV document ready for download.
    #[derive(Debug, Clone)]
    pub struct CsvExportResult {
        pub csv_content: String,
        pub filename: String,
        pub submission_count: usize,
    }

    /// A rendered PDF document ready for download.
    #[derive(Debug, Clone)]
    pub struct PdfExportResult {
        pub bytes: Vec<u8>,
        pub filename: String,
    }
}
