//! Interaction entity <-> model mapper

use chrono::{DateTime, Utc};
use liveboard_core::{DomainError, EventKind, Interaction, InteractionStatus, Snowflake};

use crate::models::InteractionModel;

impl TryFrom<InteractionModel> for Interaction {
    type Error = DomainError;

    fn try_from(model: InteractionModel) -> Result<Self, Self::Error> {
        let kind = model
            .kind
            .parse::<EventKind>()
            .map_err(|k| DomainError::DatabaseError(format!("unknown interaction kind {k:?}")))?;
        let status = model
            .status
            .as_deref()
            .map(str::parse::<InteractionStatus>)
            .transpose()
            .map_err(DomainError::DatabaseError)?;

        Ok(Interaction {
            id: Snowflake::new(model.id),
            event_id: Snowflake::new(model.event_id),
            user_id: model.user_id,
            display_name: model.display_name,
            picture_url: model.picture_url,
            kind,
            timestamp: model.occurred_at,
            status,
            selected_options: model.selected_options,
            count: model.count,
            note: model.note,
            content: model.content,
            clap_count: model.clap_count,
            cancelled_at: model.cancelled_at,
        })
    }
}

/// Interaction values for insertion/update
pub struct InteractionInsert<'a> {
    pub id: i64,
    pub event_id: i64,
    pub user_id: &'a str,
    pub display_name: &'a str,
    pub picture_url: Option<&'a str>,
    pub kind: &'static str,
    pub occurred_at: DateTime<Utc>,
    pub status: Option<&'static str>,
    pub selected_options: &'a [String],
    pub count: i32,
    pub note: Option<&'a str>,
    pub content: Option<&'a str>,
    pub clap_count: i32,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl<'a> InteractionInsert<'a> {
    pub fn new(record: &'a Interaction) -> Self {
        Self {
            id: record.id.into_inner(),
            event_id: record.event_id.into_inner(),
            user_id: &record.user_id,
            display_name: &record.display_name,
            picture_url: record.picture_url.as_deref(),
            kind: record.kind.as_str(),
            occurred_at: record.timestamp,
            status: record.status.as_ref().map(InteractionStatus::as_str),
            selected_options: &record.selected_options,
            count: record.count,
            note: record.note.as_deref(),
            content: record.content.as_deref(),
            clap_count: record.clap_count,
            cancelled_at: record.cancelled_at,
        }
    }
}
