//! Event handlers
//!
//! Event management (admin) and the public event and status views.

use std::sync::Arc;

use axum::{extract::State, Json};
use liveboard_service::dto::{
    ArchiveEventRequest, CreateEventRequest, EventResponse, EventStatus, ListEventsQuery,
    SetEventStatusRequest, UpdateEventRequest,
};
use liveboard_service::{EventService, StatusService};

use crate::extractors::{AuthUser, EventPath, QueryParams, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create event
///
/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> ApiResult<Created<Json<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.create_event(auth.user_id(), request).await?;
    Ok(Created(Json(response)))
}

/// List events, newest first
///
/// GET /events?limit=
pub async fn list_events(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<ListEventsQuery>,
) -> ApiResult<Json<Vec<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let events = service.list_events(auth.user_id(), query.limit()).await?;
    Ok(Json(events))
}

/// Get event by ID
///
/// GET /events/{event_id}
pub async fn get_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(path): SnowflakePath<EventPath>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service.get_event(path.event_id()?).await?;
    Ok(Json(response))
}

/// Update event
///
/// PUT /events/{event_id}
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<EventPath>,
    ValidatedJson(request): ValidatedJson<UpdateEventRequest>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service
        .update_event(auth.user_id(), path.event_id()?, request)
        .await?;
    Ok(Json(response))
}

/// Open or close an event
///
/// PUT /events/{event_id}/status
pub async fn set_event_status(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<EventPath>,
    Json(request): Json<SetEventStatusRequest>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service
        .set_active(auth.user_id(), path.event_id()?, request.is_active)
        .await?;
    Ok(Json(response))
}

/// Archive or restore an event
///
/// PUT /events/{event_id}/archive
pub async fn archive_event(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<EventPath>,
    Json(request): Json<ArchiveEventRequest>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service
        .set_archived(auth.user_id(), path.event_id()?, request.is_archived)
        .await?;
    Ok(Json(response))
}

/// Aggregated record view of an event
///
/// GET /events/{event_id}/status
pub async fn get_event_status(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(path): SnowflakePath<EventPath>,
) -> ApiResult<Json<Arc<EventStatus>>> {
    let service = StatusService::new(state.service_context());
    let status = service.get_event_status(path.event_id()?).await?;
    Ok(Json(status))
}
