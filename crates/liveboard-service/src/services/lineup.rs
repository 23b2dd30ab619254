//! Line-up handler
//!
//! Capacity-bounded sign-up queue with a bounded waitlist. Registration and cancellation
//! each run as one partition transaction; a cancelled confirmed slot promotes the oldest
//! waitlisted record in the same commit.

use chrono::{DateTime, Utc};
use liveboard_core::traits::{PartitionTx, RecordWrite};
use liveboard_core::{
    Actor, DomainError, EventConfig, EventKind, Interaction, InteractionStatus, Snowflake,
};
use tracing::{info, instrument, warn};

use super::action::{committed_record, ensure_open, ActionOutcome};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Line-up service
pub struct LineUpService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LineUpService<'a> {
    /// Create a new LineUpService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register for `count > 0`, cancel for `count < 0`
    pub async fn handle(
        &self,
        event_id: Snowflake,
        actor: &Actor,
        count: i32,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> ServiceResult<ActionOutcome> {
        match count {
            c if c > 0 => self.register(event_id, actor, note, now).await,
            c if c < 0 => self.cancel(event_id, actor, now).await,
            c => Err(DomainError::InvalidCount(c).into()),
        }
    }

    /// Take a slot, or a waitlist place when the line-up is full
    #[instrument(skip(self, actor, note), fields(user_id = %actor.user_id))]
    pub async fn register(
        &self,
        event_id: Snowflake,
        actor: &Actor,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> ServiceResult<ActionOutcome> {
        let is_admin = self.is_admin(&actor.user_id).await;
        let record_id = self.ctx.generate_id();

        let writes = self
            .ctx
            .run_atomic(event_id, &|tx: &mut PartitionTx| {
                ensure_open(tx.event(), EventKind::LineUp)?;
                let status = admit(&tx.event().config, tx.records(), &actor.user_id, is_admin)?;

                let mut record = Interaction::new(record_id, event_id, actor, EventKind::LineUp, now);
                record.status = Some(status);
                record.count = 1;
                record.note.clone_from(&note);
                tx.create(record)
            })
            .await?;

        let record = committed_record(writes)?;
        info!(record_id = %record.id, status = ?record.status, "Line-up registration");
        Ok(ActionOutcome::from(&record))
    }

    /// Cancel the caller's most recent active registration
    #[instrument(skip(self, actor), fields(user_id = %actor.user_id))]
    pub async fn cancel(
        &self,
        event_id: Snowflake,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> ServiceResult<ActionOutcome> {
        let writes = self
            .ctx
            .run_atomic(event_id, &|tx: &mut PartitionTx| {
                ensure_open(tx.event(), EventKind::LineUp)?;
                let plan = plan_cancellation(tx.records(), &actor.user_id)?;

                let mut cancelled = tx
                    .record(plan.cancel)
                    .cloned()
                    .ok_or(DomainError::RecordNotFound(plan.cancel))?;
                cancelled.cancel(now);
                tx.update(cancelled)?;

                if let Some(id) = plan.promote {
                    let mut promoted = tx
                        .record(id)
                        .cloned()
                        .ok_or(DomainError::RecordNotFound(id))?;
                    promoted.promote();
                    tx.update(promoted)?;
                }
                Ok(())
            })
            .await?;

        let promoted = writes
            .iter()
            .map(RecordWrite::record)
            .find(|r| r.status == Some(InteractionStatus::Success))
            .map(|r| r.id);
        let cancelled = writes
            .into_iter()
            .map(RecordWrite::into_record)
            .find(|r| r.status == Some(InteractionStatus::Cancelled))
            .ok_or_else(|| ServiceError::internal("cancellation committed no cancelled record"))?;

        info!(record_id = %cancelled.id, promoted = ?promoted, "Line-up cancellation");
        Ok(ActionOutcome {
            promoted,
            ..ActionOutcome::from(&cancelled)
        })
    }

    /// Stored admin role; any lookup failure counts as non-admin
    async fn is_admin(&self, user_id: &str) -> bool {
        match self.ctx.user_repo().find_by_id(user_id).await {
            Ok(Some(user)) => user.is_admin(),
            Ok(None) => false,
            Err(e) => {
                warn!(user_id, error = %e, "Role lookup failed, treating caller as non-admin");
                false
            }
        }
    }
}

/// Decide the status of a new registration by `user_id`
///
/// `records` is the event's full record set. Active means SUCCESS or WAITLIST.
pub fn admit(
    config: &EventConfig,
    records: &[Interaction],
    user_id: &str,
    is_admin: bool,
) -> Result<InteractionStatus, DomainError> {
    let mut total = 0usize;
    let mut own = 0usize;
    let mut waitlisted = 0usize;
    for record in records.iter().filter(|r| r.is_active_lineup()) {
        total += 1;
        if record.is_owned_by(user_id) {
            own += 1;
        }
        if record.is_waitlisted() {
            waitlisted += 1;
        }
    }

    let per_user = limit(config.max_count_per_user);
    if !is_admin && per_user > 0 && own >= per_user {
        return Err(DomainError::RegistrationLimitReached);
    }

    if total < limit(config.max_participants) {
        return Ok(InteractionStatus::Success);
    }
    if !config.has_waitlist() {
        return Err(DomainError::EventFull);
    }
    if waitlisted >= limit(config.waitlist_limit) {
        return Err(DomainError::WaitlistFull);
    }
    Ok(InteractionStatus::Waitlist)
}

/// Records touched by a cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancellationPlan {
    pub cancel: Snowflake,
    pub promote: Option<Snowflake>,
}

/// Pick the caller's newest active record, and the oldest waitlisted record to promote
/// when the cancelled one held a confirmed slot
pub fn plan_cancellation(
    records: &[Interaction],
    user_id: &str,
) -> Result<CancellationPlan, DomainError> {
    let target = records
        .iter()
        .filter(|r| r.is_active_lineup() && r.is_owned_by(user_id))
        .max_by_key(|r| r.queue_key())
        .ok_or(DomainError::NoActiveRegistration)?;

    let promote = if target.status == Some(InteractionStatus::Success) {
        records
            .iter()
            .filter(|r| r.is_waitlisted())
            .min_by_key(|r| r.queue_key())
            .map(|r| r.id)
    } else {
        None
    };

    Ok(CancellationPlan {
        cancel: target.id,
        promote,
    })
}

fn limit(value: i32) -> usize {
    usize::try_from(value).unwrap_or(0)
}
