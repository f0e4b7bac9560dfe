//! Persistence gateway for analysis reports.
//!
//! One analysis per résumé, upserted on the `resume_id` unique key. The
//! upsert and the denormalized `ats_score` write on the résumé row happen
//! in a single transaction, so a crash cannot leave the score stale
//! relative to the analysis.

use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::report::{AtsAnalysis, AtsReport};
use crate::models::resume::AtsAnalysisRow;

/// Upserts the analysis for a résumé and refreshes the denormalized score.
pub async fn save_analysis(
    pool: &PgPool,
    resume_id: Uuid,
    analysis: &AtsAnalysis,
) -> Result<AtsAnalysisRow, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let row: AtsAnalysisRow = sqlx::query_as(
        r#"
        INSERT INTO ats_analyses
            (id, resume_id, overall_score, keyword_score, format_score,
             content_score, section_score, parsing_compatibility,
             matched_keywords, missing_keywords, section_analysis,
             improvement_tips, strengths, weaknesses, industry_benchmark,
             job_title, job_description, industry, analyzed_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19)
        ON CONFLICT (resume_id) DO UPDATE SET
            overall_score = EXCLUDED.overall_score,
            keyword_score = EXCLUDED.keyword_score,
            format_score = EXCLUDED.format_score,
            content_score = EXCLUDED.content_score,
            section_score = EXCLUDED.section_score,
            parsing_compatibility = EXCLUDED.parsing_compatibility,
            matched_keywords = EXCLUDED.matched_keywords,
            missing_keywords = EXCLUDED.missing_keywords,
            section_analysis = EXCLUDED.section_analysis,
            improvement_tips = EXCLUDED.improvement_tips,
            strengths = EXCLUDED.strengths,
            weaknesses = EXCLUDED.weaknesses,
            industry_benchmark = EXCLUDED.industry_benchmark,
            job_title = EXCLUDED.job_title,
            job_description = EXCLUDED.job_description,
            industry = EXCLUDED.industry,
            analyzed_at = EXCLUDED.analyzed_at,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(resume_id)
    .bind(analysis.report.overall_score)
    .bind(analysis.report.keyword_score)
    .bind(analysis.report.format_score)
    .bind(analysis.report.content_score)
    .bind(analysis.report.section_score)
    .bind(analysis.report.parsing_compatibility)
    .bind(Json(&analysis.report.matched_keywords))
    .bind(Json(&analysis.report.missing_keywords))
    .bind(Json(&analysis.report.section_analysis))
    .bind(&analysis.report.improvement_tips)
    .bind(&analysis.report.strengths)
    .bind(&analysis.report.weaknesses)
    .bind(Json(&analysis.report.industry_benchmark))
    .bind(&analysis.job_title)
    .bind(&analysis.job_description)
    .bind(&analysis.industry)
    .bind(analysis.analyzed_at)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE resumes SET ats_score = $2, updated_at = now() WHERE id = $1")
        .bind(resume_id)
        .bind(analysis.report.overall_score)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(
        "Saved ATS analysis for resume {resume_id} (overall score {})",
        analysis.report.overall_score
    );
    Ok(row)
}

/// Fetches the saved analysis for a résumé, if any.
pub async fn get_analysis(
    pool: &PgPool,
    resume_id: Uuid,
) -> Result<Option<AtsAnalysisRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM ats_analyses WHERE resume_id = $1")
        .bind(resume_id)
        .fetch_optional(pool)
        .await
}

impl From<AtsAnalysisRow> for AtsAnalysis {
    fn from(row: AtsAnalysisRow) -> Self {
        AtsAnalysis {
            report: AtsReport {
                overall_score: row.overall_score,
                keyword_score: row.keyword_score,
                format_score: row.format_score,
                content_score: row.content_score,
                section_score: row.section_score,
                parsing_compatibility: row.parsing_compatibility,
                matched_keywords: row.matched_keywords.0,
                missing_keywords: row.missing_keywords.0,
                section_analysis: row.section_analysis.0,
                improvement_tips: row.improvement_tips,
                strengths: row.strengths,
                weaknesses: row.weaknesses,
                industry_benchmark: row.industry_benchmark.0,
            },
            job_title: row.job_title,
            job_description: row.job_description,
            industry: row.industry,
            analyzed_at: row.analyzed_at,
        }
    }
}
