//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - The typed [`Action`] decoded from an action request
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod action;
pub mod mappers;
pub mod requests;
pub mod responses;

pub use action::{Action, ActionPayload};

// Re-export commonly used request types
pub use requests::{
    ActionRequest, ActionRequestPayload, ArchiveEventRequest, CreateEventRequest,
    ListEventsQuery, SetEventStatusRequest, UpdateContentRequest, UpdateEventRequest,
    UpdateNoteRequest,
};

// Re-export commonly used response types
pub use responses::{
    ActionResponse, EventResponse, EventStatus, HealthChecks, HealthResponse, ReadinessResponse,
    RecordView, UserResponse,
};
