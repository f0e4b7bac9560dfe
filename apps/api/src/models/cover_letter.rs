use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A generated cover letter plus the job/company metadata that produced it.
/// Unlike résumés, a user may hold many of these.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub job_title: String,
    pub company_name: String,
    pub job_description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
