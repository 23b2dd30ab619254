//! PostgreSQL implementation of InteractionRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::{debug, instrument, warn};

use liveboard_core::traits::{
    InteractionRepository, PartitionOp, PartitionTx, RecordWrite, RepoResult,
};
use liveboard_core::{DomainError, Event, EventKind, Interaction, Snowflake};

use crate::mappers::InteractionInsert;
use crate::models::{EventModel, InteractionModel};

use super::error::{event_not_found, is_retryable, map_db_error};

const SELECT_COLUMNS: &str = r"
    SELECT id, event_id, user_id, display_name, picture_url, kind, occurred_at, status,
           selected_options, count, note, content, clap_count, cancelled_at
    FROM interactions
";

/// Default number of attempts for `run_atomic`
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Why a single transaction attempt failed
enum AttemptError {
    Db(sqlx::Error),
    Domain(DomainError),
}

impl From<sqlx::Error> for AttemptError {
    fn from(e: sqlx::Error) -> Self {
        Self::Db(e)
    }
}

impl From<DomainError> for AttemptError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

/// PostgreSQL implementation of InteractionRepository
#[derive(Clone)]
pub struct PgInteractionRepository {
    pool: PgPool,
    max_attempts: u32,
}

impl PgInteractionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// One attempt: lock the event row, read the partition, run `op`, write, commit
    async fn attempt(
        &self,
        event_id: Snowflake,
        op: &PartitionOp<'_>,
    ) -> Result<Vec<RecordWrite>, AttemptError> {
        let mut tx = self.pool.begin().await?;

        let event = sqlx::query_as::<_, EventModel>(
            r"
            SELECT id, kind, title, is_active, is_archived, created_by, created_at, config
            FROM events
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(event_id.into_inner())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| event_not_found(event_id))?;
        let event = Event::try_from(event)?;

        let records = sqlx::query_as::<_, InteractionModel>(&format!(
            "{SELECT_COLUMNS} WHERE event_id = $1 ORDER BY occurred_at, id"
        ))
        .bind(event_id.into_inner())
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(Interaction::try_from)
        .collect::<RepoResult<Vec<_>>>()?;

        let mut partition = PartitionTx::new(event, records);
        op(&mut partition)?;

        let writes = partition.into_writes();
        for write in &writes {
            match write {
                RecordWrite::Create(record) => insert(&mut *tx, record).await?,
                RecordWrite::Update(record) => update(&mut *tx, record).await?,
            }
        }

        tx.commit().await?;
        Ok(writes)
    }
}

async fn insert(conn: &mut PgConnection, record: &Interaction) -> Result<(), sqlx::Error> {
    let row = InteractionInsert::new(record);
    sqlx::query(
        r"
        INSERT INTO interactions (id, event_id, user_id, display_name, picture_url, kind,
                                  occurred_at, status, selected_options, count, note, content,
                                  clap_count, cancelled_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        ",
    )
    .bind(row.id)
    .bind(row.event_id)
    .bind(row.user_id)
    .bind(row.display_name)
    .bind(row.picture_url)
    .bind(row.kind)
    .bind(row.occurred_at)
    .bind(row.status)
    .bind(row.selected_options)
    .bind(row.count)
    .bind(row.note)
    .bind(row.content)
    .bind(row.clap_count)
    .bind(row.cancelled_at)
    .execute(conn)
    .await?;
    Ok(())
}

async fn update(conn: &mut PgConnection, record: &Interaction) -> Result<(), sqlx::Error> {
    let row = InteractionInsert::new(record);
    sqlx::query(
        r"
        UPDATE interactions
        SET user_id = $3, display_name = $4, picture_url = $5, kind = $6, occurred_at = $7,
            status = $8, selected_options = $9, count = $10, note = $11, content = $12,
            clap_count = $13, cancelled_at = $14
        WHERE id = $1 AND event_id = $2
        ",
    )
    .bind(row.id)
    .bind(row.event_id)
    .bind(row.user_id)
    .bind(row.display_name)
    .bind(row.picture_url)
    .bind(row.kind)
    .bind(row.occurred_at)
    .bind(row.status)
    .bind(row.selected_options)
    .bind(row.count)
    .bind(row.note)
    .bind(row.content)
    .bind(row.clap_count)
    .bind(row.cancelled_at)
    .execute(conn)
    .await?;
    Ok(())
}

#[async_trait]
impl InteractionRepository for PgInteractionRepository {
    #[instrument(skip(self))]
    async fn find_by_event(&self, event_id: Snowflake) -> RepoResult<Vec<Interaction>> {
        let results = sqlx::query_as::<_, InteractionModel>(&format!(
            "{SELECT_COLUMNS} WHERE event_id = $1 ORDER BY occurred_at, id"
        ))
        .bind(event_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Interaction::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_user_and_kind(
        &self,
        event_id: Snowflake,
        user_id: &str,
        kind: EventKind,
    ) -> RepoResult<Vec<Interaction>> {
        let results = sqlx::query_as::<_, InteractionModel>(&format!(
            "{SELECT_COLUMNS} WHERE event_id = $1 AND user_id = $2 AND kind = $3 \
             ORDER BY occurred_at, id"
        ))
        .bind(event_id.into_inner())
        .bind(user_id)
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Interaction::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_id(
        &self,
        event_id: Snowflake,
        record_id: Snowflake,
    ) -> RepoResult<Option<Interaction>> {
        let result = sqlx::query_as::<_, InteractionModel>(&format!(
            "{SELECT_COLUMNS} WHERE event_id = $1 AND id = $2"
        ))
        .bind(event_id.into_inner())
        .bind(record_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Interaction::try_from).transpose()
    }

    #[instrument(skip(self, record), fields(event_id = %record.event_id, record_id = %record.id))]
    async fn create(&self, record: &Interaction) -> RepoResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        insert(&mut *conn, record).await.map_err(map_db_error)
    }

    #[instrument(skip(self, op))]
    async fn run_atomic(
        &self,
        event_id: Snowflake,
        op: &PartitionOp<'_>,
    ) -> RepoResult<Vec<RecordWrite>> {
        for attempt in 1..=self.max_attempts {
            match self.attempt(event_id, op).await {
                Ok(writes) => return Ok(writes),
                Err(AttemptError::Domain(e)) => return Err(e),
                Err(AttemptError::Db(e)) if is_retryable(&e) => {
                    debug!(attempt, error = %e, "Partition transaction conflicted, retrying");
                }
                Err(AttemptError::Db(e)) => return Err(map_db_error(e)),
            }
        }

        warn!(attempts = self.max_attempts, "Partition transaction gave up");
        Err(DomainError::TransactionConflict {
            attempts: self.max_attempts,
        })
    }
}
