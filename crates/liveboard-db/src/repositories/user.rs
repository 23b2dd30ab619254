//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use liveboard_core::traits::{RepoResult, UserRepository};
use liveboard_core::User;

use crate::models::UserModel;

use super::error::map_db_error;

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, display_name, picture_url, role, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn upsert(&self, user: &User) -> RepoResult<User> {
        // Role and created_at of an existing row are left alone
        let model = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (id, display_name, picture_url, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET display_name = EXCLUDED.display_name, picture_url = EXCLUDED.picture_url
            RETURNING id, display_name, picture_url, role, created_at
            ",
        )
        .bind(&user.id)
        .bind(&user.display_name)
        .bind(user.picture_url.as_deref())
        .bind(user.role.as_str())
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        User::try_from(model)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id, role = user.role.as_str()))]
    async fn upsert_with_role(&self, user: &User) -> RepoResult<User> {
        let model = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (id, display_name, picture_url, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET display_name = EXCLUDED.display_name,
                picture_url = EXCLUDED.picture_url,
                role = EXCLUDED.role
            RETURNING id, display_name, picture_url, role, created_at
            ",
        )
        .bind(&user.id)
        .bind(&user.display_name)
        .bind(user.picture_url.as_deref())
        .bind(user.role.as_str())
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        User::try_from(model)
    }
}
