//! # REST API for Data Export
//!
//! Endpoints for downloading submissions as CSV and individual submissions
//! as rendered consent PDFs.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::backend::AppState;

/// Create a router for export related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/csv", get(export_submissions_csv))
}

/// Export all submissions as a CSV download
pub async fn export_submissions_csv(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/export/csv");

    let submissions = match state.submission_service.list_submissions().await {
        Ok(submissions) => submissions,
        Err(e) => {
            error!("Failed to load submissions for export: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error loading submissions")
                .into_response();
        }
    };

    match state.export_service.export_submissions_csv(&submissions) {
        Ok(result) => {
            let headers = [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", result.filename),
                ),
            ];
            (StatusCode::OK, headers, result.csv_content).into_response()
        }
        Err(e) => {
            // Zero submissions: nothing to download
            error!("Failed to export CSV: {}", e);
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
    }
}

/// Render and download one submission as a consent PDF
pub async fn download_submission_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/submissions/{}/pdf", id);

    let submission = match state.submission_service.get_submission(&id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => return (StatusCode::NOT_FOUND, "Submission not found").into_response(),
        Err(e) => {
            error!("Failed to load submission for PDF export: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error loading submission")
                .into_response();
        }
    };

    match state.document_render_service.render_consent_pdf(&submission) {
        Ok(result) => {
            let headers = [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", result.filename),
                ),
            ];
            (StatusCode::OK, headers, result.bytes).into_response()
        }
        Err(e) => {
            error!("Failed to render consent PDF: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error rendering PDF").into_response()
        }
    }
}
