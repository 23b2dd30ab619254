//! Record handlers
//!
//! Edits to a single record: note, memo content, and claps.

use axum::{extract::State, Json};
use liveboard_service::dto::{RecordView, UpdateContentRequest, UpdateNoteRequest};
use liveboard_service::RecordService;

use crate::extractors::{AuthUser, RecordPath, SnowflakePath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Update the note on the caller's record
///
/// PATCH /events/{event_id}/records/{record_id}/note
pub async fn update_note(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<RecordPath>,
    ValidatedJson(request): ValidatedJson<UpdateNoteRequest>,
) -> ApiResult<Json<RecordView>> {
    let service = RecordService::new(state.service_context());
    let record = service
        .update_note(path.event_id()?, path.record_id()?, auth.user_id(), request.note)
        .await?;
    Ok(Json(record))
}

/// Update the text of the caller's memo
///
/// PATCH /events/{event_id}/records/{record_id}/content
pub async fn update_content(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<RecordPath>,
    ValidatedJson(request): ValidatedJson<UpdateContentRequest>,
) -> ApiResult<Json<RecordView>> {
    let service = RecordService::new(state.service_context());
    let record = service
        .update_memo_content(
            path.event_id()?,
            path.record_id()?,
            auth.user_id(),
            request.content,
        )
        .await?;
    Ok(Json(record))
}

/// Clap for a record
///
/// POST /events/{event_id}/records/{record_id}/clap
pub async fn clap(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(path): SnowflakePath<RecordPath>,
) -> ApiResult<Json<RecordView>> {
    let service = RecordService::new(state.service_context());
    let record = service
        .increment_clap(path.event_id()?, path.record_id()?)
        .await?;
    Ok(Json(record))
}
