//! User entity <-> model mapper

use liveboard_core::{DomainError, User, UserRole};

use crate::models::UserModel;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let role = model
            .role
            .parse::<UserRole>()
            .map_err(DomainError::DatabaseError)?;

        Ok(User {
            id: model.id,
            display_name: model.display_name,
            picture_url: model.picture_url,
            role,
            created_at: model.created_at,
        })
    }
}
