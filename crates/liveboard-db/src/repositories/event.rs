//! PostgreSQL implementation of EventRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use liveboard_core::traits::{EventRepository, RepoResult};
use liveboard_core::{DomainError, Event, Snowflake};

use crate::mappers::EventInsert;
use crate::models::EventModel;

use super::error::{event_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of EventRepository
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Event>> {
        let result = sqlx::query_as::<_, EventModel>(
            r"
            SELECT id, kind, title, is_active, is_archived, created_by, created_at, config
            FROM events
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Event::try_from).transpose()
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn create(&self, event: &Event) -> RepoResult<()> {
        let row = EventInsert::new(event);
        sqlx::query(
            r"
            INSERT INTO events (id, kind, title, is_active, is_archived, created_by, created_at, config)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(row.id)
        .bind(row.kind)
        .bind(row.title)
        .bind(row.is_active)
        .bind(row.is_archived)
        .bind(row.created_by)
        .bind(event.created_at)
        .bind(row.config)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::InternalError(format!("event {} already exists", event.id))
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn update(&self, event: &Event) -> RepoResult<()> {
        let row = EventInsert::new(event);
        let result = sqlx::query(
            r"
            UPDATE events
            SET kind = $2, title = $3, is_active = $4, is_archived = $5, config = $6
            WHERE id = $1
            ",
        )
        .bind(row.id)
        .bind(row.kind)
        .bind(row.title)
        .bind(row.is_active)
        .bind(row.is_archived)
        .bind(row.config)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(event_not_found(event.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_active(&self, id: Snowflake, active: bool) -> RepoResult<()> {
        let result = sqlx::query("UPDATE events SET is_active = $2 WHERE id = $1")
            .bind(id.into_inner())
            .bind(active)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(event_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: i64) -> RepoResult<Vec<Event>> {
        let results = sqlx::query_as::<_, EventModel>(
            r"
            SELECT id, kind, title, is_active, is_archived, created_by, created_at, config
            FROM events
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            ",
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Event::try_from).collect()
    }

    async fn health_check(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
