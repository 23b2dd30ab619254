//! Event database model

use chrono::{DateTime, Utc};
use liveboard_core::EventConfig;
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for events table
#[derive(Debug, Clone, FromRow)]
pub struct EventModel {
    pub id: i64,
    pub kind: String,
    pub title: String,
    pub is_active: bool,
    pub is_archived: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub config: Json<EventConfig>,
}
