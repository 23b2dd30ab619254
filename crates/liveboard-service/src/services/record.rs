//! Record mutations
//!
//! Edits to a single existing record: the note on a registration, the text of a memo, and
//! the clap counter. Each edit is a partition transaction followed by a cache invalidation.

use liveboard_core::traits::PartitionTx;
use liveboard_core::{DomainError, EventKind, Interaction, RecordView, Snowflake};
use tracing::{info, instrument};

use super::action::committed_record;
use super::context::ServiceContext;
use super::error::ServiceResult;

type Mutation<'m> = dyn Fn(&mut Interaction) -> Result<(), DomainError> + Send + Sync + 'm;

/// Record service
pub struct RecordService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RecordService<'a> {
    /// Create a new RecordService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Replace the note on the caller's own record; an empty note clears it
    #[instrument(skip(self, note))]
    pub async fn update_note(
        &self,
        event_id: Snowflake,
        record_id: Snowflake,
        user_id: &str,
        note: String,
    ) -> ServiceResult<RecordView> {
        self.mutate(event_id, record_id, &|record: &mut Interaction| {
            ensure_owner(record, user_id)?;
            record.note = (!note.is_empty()).then(|| note.clone());
            Ok(())
        })
        .await
    }

    /// Replace the text of the caller's own memo
    #[instrument(skip(self, content))]
    pub async fn update_memo_content(
        &self,
        event_id: Snowflake,
        record_id: Snowflake,
        user_id: &str,
        content: String,
    ) -> ServiceResult<RecordView> {
        self.mutate(event_id, record_id, &|record: &mut Interaction| {
            ensure_owner(record, user_id)?;
            if record.kind != EventKind::Memo {
                return Err(DomainError::ValidationError(
                    "only memo records have content".into(),
                ));
            }
            record.content = Some(content.clone());
            Ok(())
        })
        .await
    }

    /// Add one clap, saturating at the configured ceiling. Anyone may clap.
    #[instrument(skip(self))]
    pub async fn increment_clap(
        &self,
        event_id: Snowflake,
        record_id: Snowflake,
    ) -> ServiceResult<RecordView> {
        let ceiling = self.ctx.engine().clap_ceiling;
        self.mutate(event_id, record_id, &|record: &mut Interaction| {
            record.clap(ceiling);
            Ok(())
        })
        .await
    }

    async fn mutate(
        &self,
        event_id: Snowflake,
        record_id: Snowflake,
        mutation: &Mutation<'_>,
    ) -> ServiceResult<RecordView> {
        let writes = self
            .ctx
            .run_atomic(event_id, &|tx: &mut PartitionTx| {
                let mut record = tx
                    .record(record_id)
                    .cloned()
                    .ok_or(DomainError::RecordNotFound(record_id))?;
                mutation(&mut record)?;
                tx.update(record)
            })
            .await?;

        let record = committed_record(writes)?;
        self.ctx.invalidate_status(event_id);
        info!(event_id = %event_id, record_id = %record_id, "Record updated");
        Ok(RecordView::from(&record))
    }
}

fn ensure_owner(record: &Interaction, user_id: &str) -> Result<(), DomainError> {
    if record.is_owned_by(user_id) {
        Ok(())
    } else {
        Err(DomainError::NotRecordOwner)
    }
}
