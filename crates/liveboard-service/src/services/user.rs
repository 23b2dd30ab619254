//! User service
//!
//! Keeps stored profiles in step with the identity provider.

use liveboard_core::entities::User;
use liveboard_core::{Actor, DomainError, UserRole};
use tracing::{info, instrument};

use crate::dto::UserResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Store the verified display name and picture
    ///
    /// With a configured admin list, the role is reset on every sync: `admin` for listed
    /// users, `user` for everyone else. Without one, new users get the `user` role and an
    /// existing role is kept.
    #[instrument(skip(self, actor), fields(user_id = %actor.user_id))]
    pub async fn sync_profile(&self, actor: &Actor) -> ServiceResult<UserResponse> {
        let mut profile = User::new(
            actor.user_id.clone(),
            actor.display_name.clone(),
            actor.picture_url.clone(),
        );

        let admin_ids = self.ctx.admin_ids();
        let stored = if admin_ids.is_empty() {
            self.ctx.user_repo().upsert(&profile).await?
        } else {
            profile.role = if admin_ids.contains(&actor.user_id) {
                UserRole::Admin
            } else {
                UserRole::User
            };
            self.ctx.user_repo().upsert_with_role(&profile).await?
        };

        info!(role = stored.role.as_str(), "Profile synced");
        Ok(UserResponse::from(stored))
    }

    /// Get the stored profile of a user
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: &str) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.to_string()))?;

        Ok(UserResponse::from(user))
    }
}
