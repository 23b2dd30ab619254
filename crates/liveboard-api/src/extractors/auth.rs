//! Authentication extractor
//!
//! Verifies the identity provider's bearer token and yields the caller's identity.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use liveboard_core::Actor;

use crate::response::ApiError;
use crate::state::AppState;

/// Caller identity taken from a verified token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub actor: Actor,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(actor: Actor) -> Self {
        Self { actor }
    }

    /// Identity provider's user id
    pub fn user_id(&self) -> &str {
        &self.actor.user_id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let actor = app_state.identity().actor(bearer.token()).map_err(|e| {
            tracing::warn!(error = %e, "Rejected bearer token");
            ApiError::App(e)
        })?;

        Ok(AuthUser::new(actor))
    }
}
