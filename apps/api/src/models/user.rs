use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user, linked to the external identity provider by
/// `external_id`. The profile attributes are free text and are used only
/// as prompt filler for cover-letter and improvement generation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub external_id: String,
    pub email: String,
    pub industry: Option<String>,
    /// Years of professional experience.
    pub experience: Option<i32>,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}
