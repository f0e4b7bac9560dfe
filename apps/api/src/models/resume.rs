use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::analysis::report::{IndustryBenchmark, MatchedKeywords, MissingKeywords, SectionReport};

/// A user's résumé document. One per user (unique `user_id`).
/// `ats_score` is a denormalized copy of the latest analysis overall score,
/// rewritten whenever a new analysis is saved.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub ats_score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The last ATS analysis for a résumé. One per résumé (unique `resume_id`),
/// overwritten on each new analysis — no history is kept.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AtsAnalysisRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub overall_score: i32,
    pub keyword_score: i32,
    pub format_score: i32,
    pub content_score: i32,
    pub section_score: i32,
    pub parsing_compatibility: i32,
    pub matched_keywords: Json<MatchedKeywords>,
    pub missing_keywords: Json<MissingKeywords>,
    pub section_analysis: Json<std::collections::BTreeMap<String, SectionReport>>,
    pub improvement_tips: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub industry_benchmark: Json<IndustryBenchmark>,
    pub job_title: String,
    pub job_description: String,
    pub industry: String,
    pub analyzed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
