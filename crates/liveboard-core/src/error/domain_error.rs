//! Domain errors - error types for the engine and its stores

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Event not found: {0}")]
    EventNotFound(Snowflake),

    #[error("Record not found: {0}")]
    RecordNotFound(Snowflake),

    #[error("User not found: {0}")]
    UserNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid action type: {0}")]
    InvalidActionKind(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid count: {0} (expected +1 or -1)")]
    InvalidCount(i32),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the owner of this record")]
    NotRecordOwner,

    #[error("Admin role required")]
    AdminRequired,

    // =========================================================================
    // Capacity Errors
    // =========================================================================
    #[error("Registration limit reached for this user")]
    RegistrationLimitReached,

    #[error("Event is full")]
    EventFull,

    #[error("Waitlist is full")]
    WaitlistFull,

    #[error("Maximum comments reached")]
    MaxCommentsReached,

    // =========================================================================
    // State Errors
    // =========================================================================
    #[error("Event is not active")]
    EventNotActive,

    #[error("No active registration to cancel")]
    NoActiveRegistration,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Transaction aborted after {attempts} conflicting attempts")]
    TransactionConflict { attempts: u32 },

    #[error("Request deadline exceeded")]
    DeadlineExceeded,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::EventNotFound(_) => "UNKNOWN_EVENT",
            Self::RecordNotFound(_) => "UNKNOWN_RECORD",
            Self::UserNotFound(_) => "UNKNOWN_USER",

            // Validation
            Self::InvalidActionKind(_) => "INVALID_ACTION_TYPE",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidCount(_) => "INVALID_COUNT",

            // Authorization
            Self::NotRecordOwner => "NOT_RECORD_OWNER",
            Self::AdminRequired => "ADMIN_REQUIRED",

            // Capacity
            Self::RegistrationLimitReached => "REGISTRATION_LIMIT_REACHED",
            Self::EventFull => "EVENT_FULL",
            Self::WaitlistFull => "WAITLIST_FULL",
            Self::MaxCommentsReached => "MAX_COMMENTS_REACHED",

            // State
            Self::EventNotActive => "EVENT_NOT_ACTIVE",
            Self::NoActiveRegistration => "NO_ACTIVE_REGISTRATION",

            // Infrastructure
            Self::TransactionConflict { .. } => "TRANSACTION_CONFLICT",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EventNotFound(_) | Self::RecordNotFound(_) | Self::UserNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidActionKind(_) | Self::ValidationError(_) | Self::InvalidCount(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotRecordOwner | Self::AdminRequired)
    }

    /// Check if the event's bounded resource rejected the action
    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            Self::RegistrationLimitReached
                | Self::EventFull
                | Self::WaitlistFull
                | Self::MaxCommentsReached
        )
    }

    /// Check if this is a conflict with the event's current state
    pub fn is_conflict(&self) -> bool {
        self.is_capacity()
            || matches!(
                self,
                Self::EventNotActive
                    | Self::NoActiveRegistration
                    | Self::TransactionConflict { .. }
            )
    }
}
