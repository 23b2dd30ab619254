//! Event entity - a live poll, sign-up queue, or comment wall

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::Snowflake;

/// Kind of a live event; interaction records carry the same kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    Vote,
    LineUp,
    Memo,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vote => "VOTE",
            Self::LineUp => "LINEUP",
            Self::Memo => "MEMO",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VOTE" => Ok(Self::Vote),
            "LINEUP" => Ok(Self::LineUp),
            "MEMO" => Ok(Self::Memo),
            other => Err(other.to_string()),
        }
    }
}

/// Kind-specific event settings
///
/// Stored as one document; fields that do not apply to the event's kind stay at their
/// zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventConfig {
    // VOTE
    pub allow_multi_select: bool,
    pub max_votes: i32,
    pub options: Vec<String>,

    // LINEUP
    pub max_participants: i32,
    pub waitlist_limit: i32,
    pub max_count_per_user: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,

    // MEMO
    pub max_comments_per_user: i32,
    pub allow_reaction: bool,
}

impl EventConfig {
    /// Line-up settings with the given capacity, waitlist size, and per-user quota
    pub fn lineup(max_participants: i32, waitlist_limit: i32, max_count_per_user: i32) -> Self {
        Self {
            max_participants,
            waitlist_limit,
            max_count_per_user,
            ..Self::default()
        }
    }

    pub fn vote(options: Vec<String>, max_votes: i32) -> Self {
        Self {
            options,
            max_votes,
            allow_multi_select: max_votes > 1,
            ..Self::default()
        }
    }

    pub fn memo(max_comments_per_user: i32, allow_reaction: bool) -> Self {
        Self {
            max_comments_per_user,
            allow_reaction,
            ..Self::default()
        }
    }

    /// Whether a full line-up may still queue people
    #[inline]
    pub fn has_waitlist(&self) -> bool {
        self.waitlist_limit > 0
    }
}

/// Event entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: Snowflake,
    pub kind: EventKind,
    pub title: String,
    pub is_active: bool,
    pub is_archived: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub config: EventConfig,
}

impl Event {
    /// Create a new, active event
    pub fn new(
        id: Snowflake,
        kind: EventKind,
        title: String,
        created_by: String,
        config: EventConfig,
    ) -> Self {
        Self {
            id,
            kind,
            title,
            is_active: true,
            is_archived: false,
            created_by,
            created_at: Utc::now(),
            config,
        }
    }
}
