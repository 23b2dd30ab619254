//! Interaction entity - one participant's record inside an event

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::event::EventKind;
use super::user::Actor;
use crate::value_objects::Snowflake;

/// Line-up slot status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InteractionStatus {
    Success,
    Waitlist,
    Cancelled,
}

impl InteractionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Waitlist => "WAITLIST",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for InteractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InteractionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUCCESS" => Ok(Self::Success),
            "WAITLIST" => Ok(Self::Waitlist),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(format!("Invalid interaction status: {other}")),
        }
    }
}

/// Interaction record
///
/// Records are owned by exactly one event partition and are never hard-deleted; line-up
/// cancellation is a soft delete through `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub id: Snowflake,
    pub event_id: Snowflake,
    pub user_id: String,
    pub display_name: String,
    pub picture_url: Option<String>,
    pub kind: EventKind,
    pub timestamp: DateTime<Utc>,
    pub status: Option<InteractionStatus>,
    pub selected_options: Vec<String>,
    pub count: i32,
    pub note: Option<String>,
    pub content: Option<String>,
    pub clap_count: i32,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Interaction {
    /// Create a bare record for `actor`; kind-specific fields start empty
    pub fn new(
        id: Snowflake,
        event_id: Snowflake,
        actor: &Actor,
        kind: EventKind,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            event_id,
            user_id: actor.user_id.clone(),
            display_name: actor.display_name.clone(),
            picture_url: actor.picture_url.clone(),
            kind,
            timestamp,
            status: None,
            selected_options: Vec::new(),
            count: 0,
            note: None,
            content: None,
            clap_count: 0,
            cancelled_at: None,
        }
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// A line-up record that still holds a slot (SUCCESS or WAITLIST)
    #[inline]
    pub fn is_active_lineup(&self) -> bool {
        self.kind == EventKind::LineUp && self.status != Some(InteractionStatus::Cancelled)
    }

    #[inline]
    pub fn is_waitlisted(&self) -> bool {
        self.kind == EventKind::LineUp && self.status == Some(InteractionStatus::Waitlist)
    }

    /// Ordering key for queue decisions: timestamp, then id for equal timestamps
    #[inline]
    pub fn queue_key(&self) -> (DateTime<Utc>, Snowflake) {
        (self.timestamp, self.id)
    }

    /// Soft-delete the slot; returns the status it held before
    pub fn cancel(&mut self, at: DateTime<Utc>) -> Option<InteractionStatus> {
        let prior = self.status;
        self.status = Some(InteractionStatus::Cancelled);
        self.cancelled_at = Some(at);
        prior
    }

    pub fn promote(&mut self) {
        self.status = Some(InteractionStatus::Success);
    }

    /// Add one clap unless the count already reached `ceiling`; never lowers the count
    pub fn clap(&mut self, ceiling: i32) {
        if self.clap_count < ceiling {
            self.clap_count += 1;
        }
    }
}
