//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; bodies with free-form text also implement
//! `Validate`.

use liveboard_core::{EventConfig, EventKind};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Action Requests
// ============================================================================

/// Action submission: `{ "type": "LINEUP", "payload": { "count": 1 } }`
///
/// Decoded into a typed [`ActionPayload`](crate::dto::ActionPayload) before it reaches the
/// engine.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ActionRequest {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    #[validate(nested)]
    pub payload: ActionRequestPayload,
}

/// Untyped action payload; which fields matter depends on the action type
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequestPayload {
    #[serde(default)]
    pub selected_options: Option<Vec<String>>,

    #[serde(default)]
    pub count: Option<i32>,

    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    #[serde(default)]
    pub note: Option<String>,

    #[validate(length(max = 2000, message = "Content must be at most 2000 characters"))]
    #[serde(default)]
    pub content: Option<String>,
}

// ============================================================================
// Record Requests
// ============================================================================

/// Replace the note on an own line-up record
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateNoteRequest {
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: String,
}

/// Replace the content of an own memo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateContentRequest {
    #[validate(length(min = 1, max = 2000, message = "Content must be 1-2000 characters"))]
    pub content: String,
}

// ============================================================================
// Event Requests
// ============================================================================

/// Create event request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[serde(rename = "type")]
    pub kind: EventKind,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[serde(default)]
    pub config: EventConfig,
}

/// Update event request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    pub config: Option<EventConfig>,

    pub is_archived: Option<bool>,
}

/// Open or close an event
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetEventStatusRequest {
    pub is_active: bool,
}

/// Archive or restore an event
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveEventRequest {
    pub is_archived: bool,
}

/// Query parameters for listing events
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ListEventsQuery {
    #[serde(default = "default_list_limit")]
    pub limit: i64,
}

impl Default for ListEventsQuery {
    fn default() -> Self {
        Self {
            limit: default_list_limit(),
        }
    }
}

impl ListEventsQuery {
    /// Largest page a caller may ask for
    pub const MAX_LIMIT: i64 = 100;

    /// Requested limit clamped to `1..=MAX_LIMIT`
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, Self::MAX_LIMIT)
    }
}

fn default_list_limit() -> i64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_request_parses_wire_shape() {
        let req: ActionRequest = serde_json::from_str(
            r#"{"type": "VOTE", "payload": {"selectedOptions": ["A", "C"]}}"#,
        )
        .unwrap();
        assert_eq!(req.kind, "VOTE");
        assert_eq!(
            req.payload.selected_options,
            Some(vec!["A".to_string(), "C".to_string()])
        );
        assert!(req.payload.count.is_none());
    }

    #[test]
    fn test_action_request_validates_payload() {
        let req = ActionRequest {
            kind: "MEMO".into(),
            payload: ActionRequestPayload {
                content: Some("x".repeat(2001)),
                ..ActionRequestPayload::default()
            },
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_event_request() {
        let req: CreateEventRequest = serde_json::from_str(
            r#"{"type": "LINEUP", "title": "Futsal", "config": {"maxParticipants": 10}}"#,
        )
        .unwrap();
        assert_eq!(req.kind, EventKind::LineUp);
        assert_eq!(req.config.max_participants, 10);
        assert!(req.validate().is_ok());

        let empty_title = CreateEventRequest {
            title: String::new(),
            ..req
        };
        assert!(empty_title.validate().is_err());
    }

    #[test]
    fn test_list_limit_is_clamped() {
        let query: ListEventsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit(), 20);
        assert_eq!(ListEventsQuery { limit: 0 }.limit(), 1);
        assert_eq!(ListEventsQuery { limit: 1000 }.limit(), 100);
    }
}
