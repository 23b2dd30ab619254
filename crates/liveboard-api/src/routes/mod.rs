//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::{actions, events, health, records, users};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(event_routes())
        .merge(record_routes())
        .merge(user_routes())
}

/// Event management, status view, and actions
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(events::create_event).get(events::list_events))
        .route(
            "/events/:event_id",
            get(events::get_event).put(events::update_event),
        )
        .route(
            "/events/:event_id/status",
            get(events::get_event_status).put(events::set_event_status),
        )
        .route("/events/:event_id/archive", put(events::archive_event))
        .route("/events/:event_id/action", post(actions::submit_action))
}

/// Single-record edits
fn record_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events/:event_id/records/:record_id/note",
            patch(records::update_note),
        )
        .route(
            "/events/:event_id/records/:record_id/content",
            patch(records::update_content),
        )
        .route(
            "/events/:event_id/records/:record_id/clap",
            post(records::clap),
        )
}

/// Profile routes
fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/users/@me",
        get(users::get_current_user).put(users::sync_current_user),
    )
}
