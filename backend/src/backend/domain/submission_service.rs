use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use shared::FormValidation;

use crate::backend::domain::commands::submissions::{
    CreateSubmissionCommand, SubmissionStatsResult,
};
use crate::backend::domain::form_validation::FormValidationService;
use crate::backend::domain::models::submission::Submission;
use crate::backend::storage::DbConnection;

/// Error produced when creating a submission.
///
/// Validation failures carry the complete error set so the form can show
/// every problem at once; storage failures keep their underlying message.
#[derive(Debug, thiserror::Error)]
pub enum CreateSubmissionError {
    #[error("submission failed validation")]
    Invalid(FormValidation),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Service for managing consent form submissions
#[derive(Clone)]
pub struct SubmissionService {
    db: Arc<DbConnection>,
    validator: FormValidationService,
}

impl SubmissionService {
    /// Create a new SubmissionService
    pub fn new(db: Arc<DbConnection>) -> Self {
        Self {
            db,
            validator: FormValidationService::new(),
        }
    }

    /// Create a new submission.
    ///
    /// Validation runs first; on any failure the store is never touched and
    /// the caller receives the full error set. On success the record gets its
    /// id and creation timestamp here, exactly once.
    pub async fn create_submission(
        &self,
        command: CreateSubmissionCommand,
    ) -> Result<Submission, CreateSubmissionError> {
        info!(
            "Creating submission for child: {}",
            command.child_full_name.trim()
        );

        let validation = self.validator.validate(&command);
        if !validation.is_valid {
            warn!(
                "Submission rejected with {} validation error(s)",
                validation.errors.len()
            );
            return Err(CreateSubmissionError::Invalid(validation));
        }

        let submission = Submission {
            id: Submission::generate_id(),
            child_full_name: command.child_full_name.trim().to_string(),
            child_date_of_birth: command.child_date_of_birth.trim().to_string(),
            parent_full_name: command.parent_full_name.trim().to_string(),
            parent_phone_number: command.parent_phone_number.trim().to_string(),
            emergency_contact_info: command.emergency_contact_info.trim().to_string(),
            allergies_medical_conditions: command.allergies_medical_conditions.trim().to_string(),
            permission_to_participate: command.permission_to_participate,
            emergency_medical_auth: command.emergency_medical_auth,
            photo_video_release: command.photo_video_release,
            signature: command.signature,
            created_at: Utc::now().to_rfc3339(),
        };

        self.db.store_submission(&submission).await?;

        info!("Created submission with ID: {}", submission.id);

        Ok(submission)
    }

    /// Get a submission by id
    pub async fn get_submission(&self, id: &str) -> Result<Option<Submission>> {
        info!("Getting submission: {}", id);

        let submission = self.db.get_submission(id).await?;

        if submission.is_none() {
            warn!("Submission not found: {}", id);
        }

        Ok(submission)
    }

    /// List all submissions, newest first
    pub async fn list_submissions(&self) -> Result<Vec<Submission>> {
        let submissions = self.db.list_submissions().await?;

        info!("Found {} submissions", submissions.len());

        Ok(submissions)
    }

    /// Delete a submission
    pub async fn delete_submission(&self, id: &str) -> Result<()> {
        info!("Deleting submission: {}", id);

        let deleted = self.db.delete_submission(id).await?;
        if !deleted {
            return Err(anyhow::anyhow!("Submission not found: {}", id));
        }

        info!("Deleted submission: {}", id);

        Ok(())
    }

    /// Aggregate counts over the full, unfiltered set of submissions
    pub async fn get_stats(&self) -> Result<SubmissionStatsResult> {
        let total = self.db.count_submissions().await?;
        let with_permissions = self.db.count_with_permission().await?;
        let with_photo_release = self.db.count_with_photo_release().await?;

        Ok(SubmissionStatsResult {
            total,
            with_permissions,
            with_photo_release,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{FormValidationError, SignatureData};

    async fn setup_test() -> SubmissionService {
        let db = Arc::new(
            DbConnection::init_test()
                .await
                .expect("Failed to create test database"),
        );
        SubmissionService::new(db)
    }

    fn valid_command(child_name: &str) -> CreateSubmissionCommand {
        CreateSubmissionCommand {
            child_full_name: child_name.to_string(),
            child_date_of_birth: "2020-06-15".to_string(),
            parent_full_name: "Dana Smith".to_string(),
            parent_phone_number: "555-1234".to_string(),
            emergency_contact_info: "Grandma, 555-0000".to_string(),
            allergies_medical_conditions: "Peanuts".to_string(),
            permission_to_participate: true,
            emergency_medical_auth: true,
            photo_video_release: false,
            signature: SignatureData::new("data:image/png;base64,iVBORw0KGgo="),
        }
    }

    #[tokio::test]
    async fn test_create_submission_assigns_id_and_timestamp() {
        let service = setup_test().await;

        let created = service
            .create_submission(valid_command("Alice Smith"))
            .await
            .unwrap();

        assert!(!created.id.is_empty());
        assert!(!created.created_at.is_empty());
        assert_eq!(created.child_full_name, "Alice Smith");

        // The stored record matches what was returned
        let stored = service.get_submission(&created.id).await.unwrap().unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn test_create_submission_trims_text_fields() {
        let service = setup_test().await;

        let mut command = valid_command("  Alice Smith  ");
        command.parent_full_name = " Dana Smith ".to_string();

        let created = service.create_submission(command).await.unwrap();
        assert_eq!(created.child_full_name, "Alice Smith");
        assert_eq!(created.parent_full_name, "Dana Smith");
    }

    #[tokio::test]
    async fn test_invalid_submission_is_not_stored() {
        let service = setup_test().await;

        let mut command = valid_command("Alice Smith");
        command.signature = SignatureData::empty();
        command.parent_phone_number = String::new();

        let err = service.create_submission(command).await.unwrap_err();
        match err {
            CreateSubmissionError::Invalid(validation) => {
                assert!(!validation.is_valid);
                assert_eq!(
                    validation.errors,
                    vec![
                        FormValidationError::EmptyParentPhoneNumber,
                        FormValidationError::MissingSignature,
                    ]
                );
            }
            other => panic!("Expected validation error, got {:?}", other),
        }

        // Nothing reached the store
        let listed = service.list_submissions().await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_from_listing() {
        let service = setup_test().await;

        let first = service
            .create_submission(valid_command("Alice Smith"))
            .await
            .unwrap();
        let second = service
            .create_submission(valid_command("Bob Lee"))
            .await
            .unwrap();

        service.delete_submission(&first.id).await.unwrap();

        let listed = service.list_submissions().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, second.id);
    }

    #[tokio::test]
    async fn test_delete_missing_submission_is_an_error() {
        let service = setup_test().await;

        let err = service.delete_submission("no-such-id").await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_stats_reflect_unfiltered_set() {
        let service = setup_test().await;

        let mut with_everything = valid_command("Alice Smith");
        with_everything.permission_to_participate = true;
        with_everything.photo_video_release = true;
        service.create_submission(with_everything).await.unwrap();

        let mut with_nothing = valid_command("Bob Lee");
        with_nothing.permission_to_participate = false;
        with_nothing.photo_video_release = false;
        service.create_submission(with_nothing).await.unwrap();

        let stats = service.get_stats().await.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.with_permissions, 1);
        assert_eq!(stats.with_photo_release, 1);
    }
}
