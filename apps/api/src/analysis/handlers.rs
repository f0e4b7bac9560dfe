//! Axum route handlers for the ATS analysis API.

use axum::body::Bytes;
use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;
use tracing::{debug, error, warn};

use crate::analysis::extractor::extract_pdf_text;
use crate::analysis::prompts::{build_ats_prompt, ATS_ANALYSIS_SYSTEM};
use crate::analysis::report::{normalize_response, AtsAnalysis};
use crate::analysis::store::{get_analysis, save_analysis};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::state::AppState;

const MAX_PDF_BYTES: usize = 5 * 1024 * 1024;

/// Raw multipart fields as collected from the request body.
#[derive(Default)]
struct UploadFields {
    resume: Option<(Option<String>, Bytes)>,
    job_title: Option<String>,
    job_description: Option<String>,
    industry: Option<String>,
}

/// A validated upload, ready for the pipeline.
#[derive(Debug)]
struct Upload {
    pdf: Bytes,
    job_title: String,
    job_description: String,
    industry: Option<String>,
}

/// Intake validation: missing fields, then content type, then size.
/// Error messages are part of the wire contract.
fn validate_upload(fields: UploadFields) -> Result<Upload, AppError> {
    let missing = || AppError::Validation("Missing required fields".to_string());

    let (content_type, pdf) = fields.resume.ok_or_else(missing)?;
    let job_title = fields
        .job_title
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(missing)?;
    let job_description = fields
        .job_description
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(missing)?;

    if content_type.as_deref() != Some("application/pdf") {
        return Err(AppError::Validation(
            "Only PDF files are allowed".to_string(),
        ));
    }

    if pdf.len() > MAX_PDF_BYTES {
        return Err(AppError::Validation(
            "File size must be less than 5MB".to_string(),
        ));
    }

    Ok(Upload {
        pdf,
        job_title,
        job_description,
        industry: fields.industry,
    })
}

/// POST /api/v1/resumes/ats-analysis
///
/// Multipart intake: extract the résumé text, score it against the job
/// posting via the model, normalize the response, and persist it keyed by
/// the caller's résumé. Responds with the normalized analysis.
pub async fn handle_analyze(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<AtsAnalysis>, AppError> {
    let malformed = |_| AppError::Validation("Malformed multipart request".to_string());

    let mut fields = UploadFields::default();
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        match field.name() {
            Some("resume") => {
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(malformed)?;
                fields.resume = Some((content_type, data));
            }
            Some("jobTitle") => fields.job_title = Some(field.text().await.map_err(malformed)?),
            Some("jobDescription") => {
                fields.job_description = Some(field.text().await.map_err(malformed)?)
            }
            Some("industry") => fields.industry = Some(field.text().await.map_err(malformed)?),
            _ => {}
        }
    }

    let upload = validate_upload(fields)?;

    let resume_text = extract_pdf_text(&upload.pdf).map_err(|e| {
        warn!("Resume extraction failed: {e}");
        AppError::UnprocessableEntity(format!("Could not read resume PDF: {e}"))
    })?;

    let industry = upload
        .industry
        .filter(|s| !s.trim().is_empty())
        .or_else(|| auth.user.industry.clone())
        .unwrap_or_else(|| "General".to_string());

    let prompt = build_ats_prompt(
        &resume_text,
        &upload.job_title,
        &upload.job_description,
        &industry,
    );
    let raw = state
        .llm
        .complete(&prompt, ATS_ANALYSIS_SYSTEM)
        .await
        .map_err(|e| {
            error!("ATS analysis call failed: {e}");
            AppError::Llm("Failed to analyze resume".to_string())
        })?;

    let report = normalize_response(&raw).map_err(|e| {
        error!("ATS analysis response rejected: {e}");
        AppError::Llm("Failed to analyze resume".to_string())
    })?;

    let analysis = AtsAnalysis {
        report,
        job_title: upload.job_title,
        job_description: upload.job_description,
        industry,
        analyzed_at: Utc::now(),
    };

    // Persistence is keyed by the caller's résumé; without one there is
    // nothing to attach the report to and the caller still gets the result.
    let resume: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE user_id = $1")
        .bind(auth.user.id)
        .fetch_optional(&state.db)
        .await?;

    match resume {
        Some(resume) => {
            save_analysis(&state.db, resume.id, &analysis).await?;
        }
        None => debug!(
            "User {} has no saved resume; analysis not persisted",
            auth.user.id
        ),
    }

    Ok(Json(analysis))
}

/// GET /api/v1/resumes/ats-analysis
///
/// Returns the last saved analysis for the caller's résumé.
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<AtsAnalysis>, AppError> {
    let resume: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE user_id = $1")
        .bind(auth.user.id)
        .fetch_optional(&state.db)
        .await?;

    let resume = resume.ok_or_else(|| AppError::NotFound("No analysis found".to_string()))?;

    let row = get_analysis(&state.db, resume.id)
        .await?
        .ok_or_else(|| AppError::NotFound("No analysis found".to_string()))?;

    Ok(Json(row.into()))
}
