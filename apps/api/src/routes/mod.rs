pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis;
use crate::cover_letters;
use crate::resumes;
use crate::state::AppState;

/// Multipart bodies may carry the 5 MB file cap plus form fields and
/// encoding overhead; the limit sits above that so oversized uploads reach
/// the application-level size check and its wire-contract error body.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/v1/resumes",
            get(resumes::handlers::handle_get_resume).post(resumes::handlers::handle_save_resume),
        )
        .route(
            "/api/v1/resumes/improve",
            post(resumes::handlers::handle_improve),
        )
        // ATS analysis API
        .route(
            "/api/v1/resumes/ats-analysis",
            get(analysis::handlers::handle_get_analysis).post(analysis::handlers::handle_analyze),
        )
        // Cover letter API
        .route(
            "/api/v1/cover-letters",
            get(cover_letters::handlers::handle_list).post(cover_letters::handlers::handle_generate),
        )
        .route(
            "/api/v1/cover-letters/:id",
            get(cover_letters::handlers::handle_get).delete(cover_letters::handlers::handle_delete),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
