//! Aggregated, public view of an event's interactions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::EventKind;
use super::interaction::{Interaction, InteractionStatus};
use crate::value_objects::Snowflake;

/// One record as exposed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub user_id: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InteractionStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_options: Vec<String>,
    pub count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub clap_count: i32,
}

impl From<&Interaction> for RecordView {
    fn from(rec: &Interaction) -> Self {
        Self {
            id: rec.id,
            kind: rec.kind,
            user_id: rec.user_id.clone(),
            display_name: rec.display_name.clone(),
            picture_url: rec.picture_url.clone(),
            timestamp: rec.timestamp,
            status: rec.status,
            selected_options: rec.selected_options.clone(),
            count: rec.count,
            note: rec.note.clone(),
            content: rec.content.clone(),
            clap_count: rec.clap_count,
        }
    }
}

/// Full status of one event, as cached and served
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStatus {
    pub records: Vec<RecordView>,
}

impl EventStatus {
    /// Project every record of an event, ordered by timestamp then id
    pub fn project(records: &[Interaction]) -> Self {
        let mut views: Vec<RecordView> = records.iter().map(RecordView::from).collect();
        views.sort_by_key(|v| (v.timestamp, v.id));
        Self { records: views }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
