//! # REST API for Admin Gating
//!
//! A single endpoint that verifies the shared dashboard password. The
//! response is informational UI gating only; no token or session is issued.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use crate::backend::domain::commands::admin::ValidateAdminPasswordCommand;
use crate::backend::AppState;
use shared::{AdminLoginRequest, AdminLoginResponse};

/// Verify the admin dashboard password
pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> impl IntoResponse {
    info!("POST /api/admin/login");

    let result = state
        .admin_auth_service
        .validate_password(ValidateAdminPasswordCommand {
            password: request.password,
        });

    let response = AdminLoginResponse {
        success: result.success,
        message: result.message,
    };

    (StatusCode::OK, Json(response)).into_response()
}
