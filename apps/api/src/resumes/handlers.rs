//! Axum route handlers for résumé content: save (upsert), fetch, and
//! AI-assisted improvement of a single section.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::llm_client::prompts::WRITER_SYSTEM;
use crate::models::resume::ResumeRow;
use crate::resumes::prompts::build_improve_prompt;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    pub content: String,
}

/// POST /api/v1/resumes
///
/// Upserts the caller's résumé content. One résumé per user.
pub async fn handle_save_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<SaveResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    let row: ResumeRow = sqlx::query_as(
        r#"
        INSERT INTO resumes (id, user_id, content)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id) DO UPDATE SET
            content = EXCLUDED.content,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth.user.id)
    .bind(&request.content)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// GET /api/v1/resumes
///
/// Returns the caller's résumé, including the denormalized ATS score.
pub async fn handle_get_resume(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ResumeRow>, AppError> {
    let resume: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE user_id = $1")
        .bind(auth.user.id)
        .fetch_optional(&state.db)
        .await?;

    resume
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))
}

#[derive(Debug, Deserialize)]
pub struct ImproveRequest {
    pub current: String,
    /// Which résumé section the content belongs to, e.g. "experience".
    pub section: String,
    pub company: String,
    pub position: String,
}

#[derive(Debug, Serialize)]
pub struct ImproveResponse {
    pub improved: String,
}

/// POST /api/v1/resumes/improve
///
/// Rewrites a résumé section via the model. Nothing is persisted — the
/// caller decides whether to keep the rewrite.
pub async fn handle_improve(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, AppError> {
    if request.current.trim().is_empty() {
        return Err(AppError::Validation("current cannot be empty".to_string()));
    }

    let industry = auth
        .user
        .industry
        .as_deref()
        .unwrap_or("professional")
        .to_string();

    let prompt = build_improve_prompt(
        &request.current,
        &request.section,
        &industry,
        &request.company,
        &request.position,
    );

    let improved = state
        .llm
        .complete(&prompt, WRITER_SYSTEM)
        .await
        .map_err(|e| {
            error!("Content improvement call failed: {e}");
            AppError::Llm("Failed to improve content".to_string())
        })?;

    Ok(Json(ImproveResponse { improved }))
}
