use serde::{Deserialize, Serialize};
use shared::SignatureData;

/// Domain model for one consent record.
///
/// `id` and `created_at` are assigned exactly once, at creation; there is no
/// update path anywhere in the domain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub id: String,
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
    pub created_at: String,
}

impl Submission {
    /// Generate a fresh submission id.
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Build a minimal valid submission for tests.
#[cfg(test)]
pub fn test_submission(child_name: &str, created_at: &str) -> Submission {
    Submission {
        // Deterministic, collision-free id so fixtures built from identical
        // inputs compare equal (no random UUID) — harness plumbing only.
        id: format!("test-{}-{}", child_name, created_at),
        child_full_name: child_name.to_string(),
        child_date_of_birth: "2020-06-15".to_string(),
        parent_full_name: format!("Parent of {}", child_name),
        parent_phone_number: "555-1234".to_string(),
        // No embedded comma: the CSV shape test counts fields via split(',').
        emergency_contact_info: "Grandma 555-0000".to_string(),
        allergies_medical_conditions: String::new(),
        permission_to_participate: false,
        emergency_medical_auth: false,
        photo_video_release: false,
        signature: SignatureData::new("data:image/png;base64,iVBORw0KGgo="),
        created_at: created_at.to_string(),
    }
}
