//! CSV export for the admin dashboard.
//!
//! Exports the full, unfiltered set of submissions as a single CSV document
//! with a fixed 10-column header. Every cell is quoted. An export of zero
//! submissions is refused; the dashboard disables the button in that state.

use anyhow::Result;
use chrono::Utc;
use csv::{QuoteStyle, WriterBuilder};
use tracing::info;

use crate::backend::domain::commands::export::CsvExportResult;
use crate::backend::domain::models::submission::Submission;

const CSV_HEADER: [&str; 10] = [
    "Child Name",
    "Date of Birth",
    "Parent Name",
    "Phone Number",
    "Emergency Contact",
    "Allergies/Medical Conditions",
    "Permission to Participate",
    "Emergency Medical Auth",
    "Photo/Video Release",
    "Submitted At",
];

/// Service that renders submissions into downloadable CSV documents
#[derive(Clone, Default)]
pub struct ExportService {}

impl ExportService {
    pub fn new() -> Self {
        Self {}
    }

    /// Render all submissions as one CSV document.
    pub fn export_submissions_csv(&self, submissions: &[Submission]) -> Result<CsvExportResult> {
        if submissions.is_empty() {
            return Err(anyhow::anyhow!("No submissions to export"));
        }

        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_writer(Vec::new());

        writer.write_record(CSV_HEADER)?;

        for submission in submissions {
            writer.write_record([
                submission.child_full_name.as_str(),
                submission.child_date_of_birth.as_str(),
                submission.parent_full_name.as_str(),
                submission.parent_phone_number.as_str(),
                submission.emergency_contact_info.as_str(),
                Self::allergies_cell(&submission.allergies_medical_conditions),
                Self::yes_no(submission.permission_to_participate),
                Self::yes_no(submission.emergency_medical_auth),
                Self::yes_no(submission.photo_video_release),
                submission.created_at.as_str(),
            ])?;
        }

        let csv_content = String::from_utf8(writer.into_inner()?)?;
        let filename = format!("consent_submissions_{}.csv", Utc::now().format("%Y%m%d"));

        info!(
            "Exported {} submissions as CSV ({} bytes) with filename: {}",
            submissions.len(),
            csv_content.len(),
            filename
        );

        Ok(CsvExportResult {
            csv_content,
            filename,
            submission_count: submissions.len(),
        })
    }

    fn allergies_cell(allergies: &str) -> &str {
        if allergies.trim().is_empty() {
            "None"
        } else {
            allergies
        }
    }

    fn yes_no(value: bool) -> &'static str {
        if value {
            "Yes"
        } else {
            "No"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::submission::test_submission;

    #[test]
    fn test_export_refuses_zero_submissions() {
        let service = ExportService::new();
        let err = service.export_submissions_csv(&[]).unwrap_err();
        assert!(err.to_string().contains("No submissions"));
    }

    #[test]
    fn test_export_single_submission_shape() {
        let service = ExportService::new();
        let mut submission = test_submission("Alice Smith", "2026-01-01T10:00:00+00:00");
        submission.permission_to_participate = true;

        let result = service.export_submissions_csv(&[submission]).unwrap();
        assert_eq!(result.submission_count, 1);

        // Exactly header + one data row
        let lines: Vec<&str> = result.csv_content.trim_end().lines().collect();
        assert_eq!(lines.len(), 2);

        // Ten fields per line, every one quoted
        for line in &lines {
            let fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields.len(), 10);
            for field in fields {
                assert!(field.starts_with('"') && field.ends_with('"'));
            }
        }

        assert!(lines[0].starts_with("\"Child Name\""));
        assert!(lines[1].contains("\"Alice Smith\""));
        assert!(lines[1].contains("\"Yes\""));
        assert!(lines[1].contains("\"No\""));
    }

    #[test]
    fn test_empty_allergies_exported_as_none() {
        let service = ExportService::new();
        let mut submission = test_submission("Alice Smith", "2026-01-01T10:00:00+00:00");
        submission.allergies_medical_conditions = "  ".to_string();

        let result = service.export_submissions_csv(&[submission]).unwrap();
        assert!(result.csv_content.contains("\"None\""));
    }

    #[test]
    fn test_embedded_quotes_are_escaped() {
        let service = ExportService::new();
        let mut submission = test_submission("Alice Smith", "2026-01-01T10:00:00+00:00");
        submission.allergies_medical_conditions = "Allergic to \"everything\"".to_string();

        let result = service.export_submissions_csv(&[submission]).unwrap();
        assert!(result
            .csv_content
            .contains("\"Allergic to \"\"everything\"\"\""));
    }

    #[test]
    fn test_filename_embeds_current_date() {
        let service = ExportService::new();
        let submission = test_submission("Alice Smith", "2026-01-01T10:00:00+00:00");

        let result = service.export_submissions_csv(&[submission]).unwrap();
        let expected = format!("consent_submissions_{}.csv", Utc::now().format("%Y%m%d"));
        assert_eq!(result.filename, expected);
    }
}
