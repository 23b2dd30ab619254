//! User entity and the verified caller identity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored user role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(format!("Invalid role: {other}")),
        }
    }
}

/// User entity, keyed by the identity provider's subject id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub picture_url: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the default role
    pub fn new(id: String, display_name: String, picture_url: Option<String>) -> Self {
        Self {
            id,
            display_name,
            picture_url,
            role: UserRole::User,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Verified `(user id, display name, picture)` triple supplied by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: String,
    pub display_name: String,
    pub picture_url: Option<String>,
}

impl Actor {
    pub fn new(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        picture_url: Option<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            picture_url,
        }
    }
}
