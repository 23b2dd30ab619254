//! Action handler
//!
//! Single entry point for votes, line-up registrations and cancellations, and memos.

use axum::{extract::State, Json};
use liveboard_service::dto::{ActionRequest, ActionResponse};
use liveboard_service::{Action, ActionService};

use crate::extractors::{AuthUser, EventPath, SnowflakePath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Submit an action
///
/// POST /events/{event_id}/action
pub async fn submit_action(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<EventPath>,
    ValidatedJson(request): ValidatedJson<ActionRequest>,
) -> ApiResult<Json<ActionResponse>> {
    let event_id = path.event_id()?;
    let action = Action::from_request(auth.actor, request)?;

    let service = ActionService::new(state.service_context());
    let outcome = service.handle_action(event_id, action).await?;
    Ok(Json(ActionResponse::from(outcome)))
}
