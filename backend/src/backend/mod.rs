//! # Backend Module
//!
//! Contains all non-UI logic for the consent form application.
//!
//! This module serves as the orchestration layer that brings together:
//! - **Domain**: Business logic for submissions, validation, and exports
//! - **Storage**: Data persistence (SQLite)
//! - **IO**: Interface layer that exposes functionality to the UI
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! UI Layer (public form + admin dashboard)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (Business logic, services)
//!     ↓
//! Storage Layer (Database, persistence)
//! ```

pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::backend::domain::{
    AdminAuthService, DashboardService, DocumentRenderService, ExportService, SubmissionService,
};
use crate::backend::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub submission_service: SubmissionService,
    pub dashboard_service: DashboardService,
    pub admin_auth_service: AdminAuthService,
    pub export_service: ExportService,
    pub document_render_service: DocumentRenderService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend() -> Result<AppState> {
    info!("Setting up database");
    let db = Arc::new(DbConnection::init().await?);

    info!("Setting up domain services");
    let submission_service = SubmissionService::new(db);
    let dashboard_service = DashboardService::new();
    let admin_auth_service = AdminAuthService::from_env();
    let export_service = ExportService::new();
    let document_render_service = DocumentRenderService::new();

    Ok(AppState {
        submission_service,
        dashboard_service,
        admin_auth_service,
        export_service,
        document_render_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/submissions",
            get(io::rest::list_submissions).post(io::rest::create_submission),
        )
        .route("/submissions/stats", get(io::rest::get_submission_stats))
        .route(
            "/submissions/:id",
            get(io::rest::get_submission).delete(io::rest::delete_submission),
        )
        .route("/submissions/:id/pdf", get(io::rest::download_submission_pdf))
        .route("/admin/login", post(io::rest::admin_login))
        .nest("/export", io::rest::export_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::commands::admin::ValidateAdminPasswordCommand;
    use crate::backend::domain::commands::submissions::{
        CreateSubmissionCommand, SubmissionListQuery,
    };
    use shared::SignatureData;

    async fn setup_test_app_state() -> AppState {
        let db = Arc::new(
            DbConnection::init_test()
                .await
                .expect("Failed to create test database"),
        );
        AppState {
            submission_service: SubmissionService::new(db),
            dashboard_service: DashboardService::new(),
            admin_auth_service: AdminAuthService::with_password("test-password"),
            export_service: ExportService::new(),
            document_render_service: DocumentRenderService::new(),
        }
    }

    #[tokio::test]
    async fn test_full_flow() {
        let app_state = setup_test_app_state().await;

        // 1. A parent submits the consent form
        let command = CreateSubmissionCommand {
            child_full_name: "Alice Smith".to_string(),
            child_date_of_birth: "2020-06-15".to_string(),
            parent_full_name: "Dana Smith".to_string(),
            parent_phone_number: "555-1234".to_string(),
            emergency_contact_info: "Grandma, 555-0000".to_string(),
            allergies_medical_conditions: "Peanuts".to_string(),
            permission_to_participate: true,
            emergency_medical_auth: true,
            photo_video_release: false,
            signature: SignatureData::new("data:image/png;base64,iVBORw0KGgo="),
        };
        let created = app_state
            .submission_service
            .create_submission(command)
            .await
            .unwrap();

        // 2. The admin logs in and sees the record on the dashboard
        let login = app_state
            .admin_auth_service
            .validate_password(ValidateAdminPasswordCommand {
                password: "test-password".to_string(),
            });
        assert!(login.success);

        let submissions = app_state.submission_service.list_submissions().await.unwrap();
        let listing = app_state
            .dashboard_service
            .derive_listing(submissions, &SubmissionListQuery::default());
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].id, created.id);

        // 3. Stats, CSV export, and PDF export all reflect the record
        let stats = app_state.submission_service.get_stats().await.unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.with_permissions, 1);
        assert_eq!(stats.with_photo_release, 0);

        let submissions = app_state.submission_service.list_submissions().await.unwrap();
        let csv = app_state
            .export_service
            .export_submissions_csv(&submissions)
            .unwrap();
        assert_eq!(csv.submission_count, 1);

        let pdf = app_state
            .document_render_service
            .render_consent_pdf(&listing[0])
            .unwrap();
        assert!(pdf.bytes.starts_with(b"%PDF"));

        // 4. Deleting the record empties the next listing
        app_state
            .submission_service
            .delete_submission(&created.id)
            .await
            .unwrap();
        let remaining = app_state.submission_service.list_submissions().await.unwrap();
        assert!(remaining.is_empty());
    }
}
