//! Mapping between the public submission DTOs and domain types.

use crate::backend::domain::commands::submissions::CreateSubmissionCommand;
use crate::backend::domain::models::submission::Submission as DomainSubmission;
use shared::{CreateSubmissionRequest, Submission};

pub struct SubmissionMapper;

impl SubmissionMapper {
    /// Convert a domain submission into the public DTO.
    pub fn to_dto(submission: DomainSubmission) -> Submission {
        Submission {
            id: submission.id,
            child_full_name: submission.child_full_name,
            child_date_of_birth: submission.child_date_of_birth,
            parent_full_name: submission.parent_full_name,
            parent_phone_number: submission.parent_phone_number,
            emergency_contact_info: submission.emergency_contact_info,
            allergies_medical_conditions: submission.allergies_medical_conditions,
            permission_to_participate: submission.permission_to_participate,
            emergency_medical_auth: submission.emergency_medical_auth,
            photo_video_release: submission.photo_video_release,
            signature: submission.signature,
            created_at: submission.created_at,
        }
    }

    /// Convert a create request into the domain command.
    pub fn to_create_command(request: CreateSubmissionRequest) -> CreateSubmissionCommand {
        CreateSubmissionCommand {
            child_full_name: request.child_full_name,
            child_date_of_birth: request.child_date_of_birth,
            parent_full_name: request.parent_full_name,
            parent_phone_number: request.parent_phone_number,
            emergency_contact_info: request.emergency_contact_info,
            allergies_medical_conditions: request.allergies_medical_conditions,
            permission_to_participate: request.permission_to_participate,
            emergency_medical_auth: request.emergency_medical_auth,
            photo_video_release: request.photo_video_release,
            signature: request.signature,
        }
    }
}
