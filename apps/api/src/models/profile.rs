use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A completed onboarding profile as stored by the Postgres submission sink.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobProfileRow {
    pub id: Uuid,
    pub location: String,
    pub target_job: String,
    pub data: Value,
    pub submitted_at: DateTime<Utc>,
}
