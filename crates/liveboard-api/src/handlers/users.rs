//! User handlers

use axum::{extract::State, Json};
use liveboard_service::dto::UserResponse;
use liveboard_service::UserService;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Store the caller's display name and picture from the verified token
///
/// PUT /users/@me
pub async fn sync_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.sync_profile(&auth.actor).await?;
    Ok(Json(response))
}

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user(auth.user_id()).await?;
    Ok(Json(response))
}
