//! Event entity <-> model mapper

use liveboard_core::{DomainError, Event, EventConfig, EventKind, Snowflake};
use sqlx::types::Json;

use crate::models::EventModel;

impl TryFrom<EventModel> for Event {
    type Error = DomainError;

    fn try_from(model: EventModel) -> Result<Self, Self::Error> {
        let kind = model
            .kind
            .parse::<EventKind>()
            .map_err(|k| DomainError::DatabaseError(format!("unknown event kind {k:?}")))?;

        Ok(Event {
            id: Snowflake::new(model.id),
            kind,
            title: model.title,
            is_active: model.is_active,
            is_archived: model.is_archived,
            created_by: model.created_by,
            created_at: model.created_at,
            config: model.config.0,
        })
    }
}

/// Event values for insertion/update
pub struct EventInsert<'a> {
    pub id: i64,
    pub kind: &'static str,
    pub title: &'a str,
    pub is_active: bool,
    pub is_archived: bool,
    pub created_by: &'a str,
    pub config: Json<&'a EventConfig>,
}

impl<'a> EventInsert<'a> {
    pub fn new(event: &'a Event) -> Self {
        Self {
            id: event.id.into_inner(),
            kind: event.kind.as_str(),
            title: &event.title,
            is_active: event.is_active,
            is_archived: event.is_archived,
            created_by: &event.created_by,
            config: Json(&event.config),
        }
    }
}
