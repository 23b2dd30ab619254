//! Interaction database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for interactions table
#[derive(Debug, Clone, FromRow)]
pub struct InteractionModel {
    pub id: i64,
    pub event_id: i64,
    pub user_id: String,
    pub display_name: String,
    pub picture_url: Option<String>,
    pub kind: String,
    pub occurred_at: DateTime<Utc>,
    pub status: Option<String>,
    pub selected_options: Vec<String>,
    pub count: i32,
    pub note: Option<String>,
    pub content: Option<String>,
    pub clap_count: i32,
    pub cancelled_at: Option<DateTime<Utc>>,
}
