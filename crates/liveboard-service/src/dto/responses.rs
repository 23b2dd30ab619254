//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize`; field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use liveboard_core::{EventConfig, EventKind, InteractionStatus, Snowflake, UserRole};
use serde::Serialize;

// Status views are served as-is
pub use liveboard_core::{EventStatus, RecordView};

// ============================================================================
// Action Responses
// ============================================================================

/// Result of an accepted action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub record_id: Snowflake,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InteractionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promoted_record_id: Option<Snowflake>,
}

// ============================================================================
// Event Responses
// ============================================================================

/// Event response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub title: String,
    pub is_active: bool,
    pub is_archived: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub config: EventConfig,
}

// ============================================================================
// User Responses
// ============================================================================

/// User profile response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub store: String,
    pub cache_entries: usize,
}

impl ReadinessResponse {
    pub fn ready(store_healthy: bool, cache_entries: usize) -> Self {
        Self {
            status: if store_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                store: if store_healthy { "healthy" } else { "unhealthy" }.to_string(),
                cache_entries,
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_response_serialization() {
        let response = ActionResponse {
            record_id: Snowflake::new(42),
            kind: EventKind::LineUp,
            status: Some(InteractionStatus::Waitlist),
            promoted_record_id: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["recordId"], "42");
        assert_eq!(json["type"], "LINEUP");
        assert_eq!(json["status"], "WAITLIST");
        assert!(json.get("promotedRecordId").is_none());
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::ready(true, 3);
        assert!(ready.is_ready());
        assert_eq!(ready.checks.store, "healthy");
        assert_eq!(ready.checks.cache_entries, 3);

        let not_ready = ReadinessResponse::ready(false, 0);
        assert_eq!(not_ready.status, "not_ready");
        assert_eq!(not_ready.checks.store, "unhealthy");
    }
}
