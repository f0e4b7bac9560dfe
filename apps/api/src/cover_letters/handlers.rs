//! Axum route handlers for cover letters: generate via the model, then
//! plain owner-scoped CRUD.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::cover_letters::prompts::build_cover_letter_prompt;
use crate::errors::AppError;
use crate::llm_client::prompts::WRITER_SYSTEM;
use crate::models::cover_letter::CoverLetterRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCoverLetterRequest {
    pub job_title: String,
    pub company_name: String,
    pub job_description: String,
}

/// POST /api/v1/cover-letters
///
/// Generates a cover letter from the job posting and the caller's profile,
/// persists it, and returns the stored record.
pub async fn handle_generate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<GenerateCoverLetterRequest>,
) -> Result<Json<CoverLetterRow>, AppError> {
    for (field, value) in [
        ("jobTitle", &request.job_title),
        ("companyName", &request.company_name),
        ("jobDescription", &request.job_description),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} cannot be empty")));
        }
    }

    let prompt = build_cover_letter_prompt(
        &auth.user,
        &request.job_title,
        &request.company_name,
        &request.job_description,
    );

    let content = state
        .llm
        .complete(&prompt, WRITER_SYSTEM)
        .await
        .map_err(|e| {
            error!("Cover letter generation call failed: {e}");
            AppError::Llm("Failed to generate cover letter".to_string())
        })?;

    let row: CoverLetterRow = sqlx::query_as(
        r#"
        INSERT INTO cover_letters
            (id, user_id, content, job_title, company_name, job_description)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth.user.id)
    .bind(&content)
    .bind(&request.job_title)
    .bind(&request.company_name)
    .bind(&request.job_description)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// GET /api/v1/cover-letters
///
/// Lists the caller's cover letters, most recent first.
pub async fn handle_list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<CoverLetterRow>>, AppError> {
    let rows: Vec<CoverLetterRow> =
        sqlx::query_as("SELECT * FROM cover_letters WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(auth.user.id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(rows))
}

/// GET /api/v1/cover-letters/:id
pub async fn handle_get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CoverLetterRow>, AppError> {
    let row: Option<CoverLetterRow> =
        sqlx::query_as("SELECT * FROM cover_letters WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(auth.user.id)
            .fetch_optional(&state.db)
            .await?;

    row.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Cover letter {id} not found")))
}

/// DELETE /api/v1/cover-letters/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM cover_letters WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(auth.user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Cover letter {id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
