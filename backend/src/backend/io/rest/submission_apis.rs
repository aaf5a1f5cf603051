//! # REST API for Submissions
//!
//! Endpoints for creating, listing, retrieving, and deleting consent form
//! submissions, plus the dashboard summary stats.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{error, info};

use crate::backend::domain::commands::submissions::SubmissionListQuery;
use crate::backend::domain::submission_service::CreateSubmissionError;
use crate::backend::io::rest::mappers::submission_mapper::SubmissionMapper;
use crate::backend::AppState;
use shared::{
    CreateSubmissionRequest, PermissionFilter, SubmissionListResponse, SubmissionResponse,
    SubmissionSort, SubmissionStats,
};

/// Query parameters for the submission list endpoint
#[derive(Deserialize, Debug, Default)]
pub struct SubmissionListParams {
    pub search: Option<String>,
    pub permission: Option<PermissionFilter>,
    pub sort: Option<SubmissionSort>,
}

/// Create a new submission
pub async fn create_submission(
    State(state): State<AppState>,
    Json(request): Json<CreateSubmissionRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/submissions - child: {}",
        request.child_full_name.trim()
    );

    let command = SubmissionMapper::to_create_command(request);
    match state.submission_service.create_submission(command).await {
        Ok(submission) => {
            let response = SubmissionResponse {
                submission: SubmissionMapper::to_dto(submission),
                success_message: "Consent form submitted successfully".to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(CreateSubmissionError::Invalid(validation)) => {
            (StatusCode::BAD_REQUEST, Json(validation)).into_response()
        }
        Err(CreateSubmissionError::Storage(e)) => {
            error!("Failed to create submission: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error creating submission").into_response()
        }
    }
}

/// List submissions, with optional dashboard search/filter/sort
pub async fn list_submissions(
    State(state): State<AppState>,
    Query(params): Query<SubmissionListParams>,
) -> impl IntoResponse {
    info!("GET /api/submissions - params: {:?}", params);

    let query = SubmissionListQuery {
        search: params.search,
        permission: params.permission.unwrap_or_default(),
        sort: params.sort.unwrap_or_default(),
    };

    match state.submission_service.list_submissions().await {
        Ok(submissions) => {
            let listing = state.dashboard_service.derive_listing(submissions, &query);
            let response = SubmissionListResponse {
                submissions: listing.into_iter().map(SubmissionMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list submissions: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing submissions").into_response()
        }
    }
}

/// Get a submission by ID
pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/submissions/{}", id);

    match state.submission_service.get_submission(&id).await {
        Ok(Some(submission)) => {
            (StatusCode::OK, Json(SubmissionMapper::to_dto(submission))).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, "Submission not found").into_response(),
        Err(e) => {
            error!("Failed to get submission: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving submission").into_response()
        }
    }
}

/// Delete a submission
pub async fn delete_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/submissions/{}", id);

    match state.submission_service.delete_submission(&id).await {
        Ok(()) => (StatusCode::NO_CONTENT, "").into_response(),
        Err(e) => {
            error!("Failed to delete submission: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Summary counts for the dashboard cards
pub async fn get_submission_stats(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/submissions/stats");

    match state.submission_service.get_stats().await {
        Ok(stats) => {
            let response = SubmissionStats {
                total: stats.total,
                with_permissions: stats.with_permissions,
                with_photo_release: stats.with_photo_release,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to get stats: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving stats").into_response()
        }
    }
}
