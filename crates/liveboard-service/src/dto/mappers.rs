//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use liveboard_core::entities::{Event, User};

use super::responses::{ActionResponse, EventResponse, UserResponse};
use crate::services::ActionOutcome;

// ============================================================================
// Event Mappers
// ============================================================================

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            kind: event.kind,
            title: event.title.clone(),
            is_active: event.is_active,
            is_archived: event.is_archived,
            created_by: event.created_by.clone(),
            created_at: event.created_at,
            config: event.config.clone(),
        }
    }
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self::from(&event)
    }
}

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            display_name: user.display_name.clone(),
            picture_url: user.picture_url.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Action Mappers
// ============================================================================

impl From<ActionOutcome> for ActionResponse {
    fn from(outcome: ActionOutcome) -> Self {
        Self {
            record_id: outcome.record_id,
            kind: outcome.kind,
            status: outcome.status,
            promoted_record_id: outcome.promoted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liveboard_core::{EventConfig, EventKind, Snowflake};

    #[test]
    fn test_event_response_wire_shape() {
        let event = Event::new(
            Snowflake::new(5),
            EventKind::LineUp,
            "Futsal".into(),
            "U1".into(),
            EventConfig::lineup(10, 2, 1),
        );

        let json = serde_json::to_value(EventResponse::from(&event)).unwrap();
        assert_eq!(json["id"], "5");
        assert_eq!(json["type"], "LINEUP");
        assert_eq!(json["isActive"], true);
        assert_eq!(json["createdBy"], "U1");
        assert_eq!(json["config"]["maxParticipants"], 10);
    }

    #[test]
    fn test_user_response() {
        let user = User::new("U1".into(), "Alice".into(), None);
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json["displayName"], "Alice");
        assert_eq!(json["role"], "user");
        assert!(json.get("pictureUrl").is_none());
    }
}
