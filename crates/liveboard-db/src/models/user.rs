//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: String,
    pub display_name: String,
    pub picture_url: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}
