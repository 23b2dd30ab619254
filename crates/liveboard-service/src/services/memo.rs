//! Memo handler
//!
//! Comment wall with a per-participant quota.

use chrono::{DateTime, Utc};
use liveboard_common::MemoQuotaMode;
use liveboard_core::traits::PartitionTx;
use liveboard_core::{Actor, DomainError, EventConfig, EventKind, Interaction, Snowflake};
use tracing::{info, instrument};

use super::action::{committed_record, ensure_open, ActionOutcome};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Memo service
pub struct MemoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemoService<'a> {
    /// Create a new MemoService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append a memo unless the caller already used up the quota
    #[instrument(skip(self, actor, content), fields(user_id = %actor.user_id))]
    pub async fn post(
        &self,
        event_id: Snowflake,
        actor: &Actor,
        content: String,
        now: DateTime<Utc>,
    ) -> ServiceResult<ActionOutcome> {
        let record_id = self.ctx.generate_id();
        let mut memo = Interaction::new(record_id, event_id, actor, EventKind::Memo, now);
        memo.content = Some(content);

        let memo = match self.ctx.engine().memo_quota_mode {
            MemoQuotaMode::Atomic => self.post_atomic(memo).await?,
            MemoQuotaMode::BestEffort => self.post_best_effort(memo).await?,
        };

        info!(record_id = %memo.id, "Memo posted");
        Ok(ActionOutcome::from(&memo))
    }

    /// Count and append in one partition transaction
    async fn post_atomic(&self, memo: Interaction) -> ServiceResult<Interaction> {
        let writes = self
            .ctx
            .run_atomic(memo.event_id, &|tx: &mut PartitionTx| {
                ensure_open(tx.event(), EventKind::Memo)?;
                let posted = tx
                    .records()
                    .iter()
                    .filter(|r| r.kind == EventKind::Memo && r.is_owned_by(&memo.user_id))
                    .count();
                within_quota(&tx.event().config, posted)?;
                tx.create(memo.clone())
            })
            .await?;

        committed_record(writes)
    }

    /// Count with a query, then insert outside any transaction
    ///
    /// Two concurrent posts by one participant can both pass the count.
    async fn post_best_effort(&self, memo: Interaction) -> ServiceResult<Interaction> {
        let event = self
            .ctx
            .event_repo()
            .find_by_id(memo.event_id)
            .await?
            .ok_or(DomainError::EventNotFound(memo.event_id))?;
        ensure_open(&event, EventKind::Memo)?;

        let posted = self
            .ctx
            .interaction_repo()
            .find_by_user_and_kind(memo.event_id, &memo.user_id, EventKind::Memo)
            .await?;
        within_quota(&event.config, posted.len())?;

        self.ctx.interaction_repo().create(&memo).await?;
        Ok(memo)
    }
}

fn within_quota(config: &EventConfig, posted: usize) -> Result<(), DomainError> {
    let quota = usize::try_from(config.max_comments_per_user).unwrap_or(0);
    if posted >= quota {
        return Err(DomainError::MaxCommentsReached);
    }
    Ok(())
}
