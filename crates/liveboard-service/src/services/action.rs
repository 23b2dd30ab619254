//! Action dispatcher
//!
//! Routes a decoded action to the handler for its kind and invalidates the event's cached
//! status once the handler's transaction has committed.

use chrono::Utc;
use liveboard_core::traits::RecordWrite;
use liveboard_core::{DomainError, Event, EventKind, Interaction, InteractionStatus, Snowflake};
use tracing::{debug, info, instrument};

use crate::dto::{Action, ActionPayload};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::lineup::LineUpService;
use super::memo::MemoService;
use super::vote::VoteService;

/// What an accepted action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Record created, replaced, or cancelled by the action
    pub record_id: Snowflake,
    pub kind: EventKind,
    pub status: Option<InteractionStatus>,
    /// Waitlisted record moved up by a cancellation
    pub promoted: Option<Snowflake>,
}

impl From<&Interaction> for ActionOutcome {
    fn from(record: &Interaction) -> Self {
        Self {
            record_id: record.id,
            kind: record.kind,
            status: record.status,
            promoted: None,
        }
    }
}

/// Action dispatcher
pub struct ActionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ActionService<'a> {
    /// Create a new ActionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply `action` to an event
    ///
    /// Handler errors are returned unchanged. On success the event's cached status is
    /// dropped before returning.
    #[instrument(skip(self, action), fields(user_id = %action.actor.user_id, kind = %action.kind()))]
    pub async fn handle_action(
        &self,
        event_id: Snowflake,
        action: Action,
    ) -> ServiceResult<ActionOutcome> {
        let now = Utc::now();
        let Action { actor, payload } = action;

        let result = match payload {
            ActionPayload::Vote { selected_options } => {
                VoteService::new(self.ctx)
                    .submit(event_id, &actor, selected_options, now)
                    .await
            }
            ActionPayload::LineUp { count, note } => {
                LineUpService::new(self.ctx)
                    .handle(event_id, &actor, count, note, now)
                    .await
            }
            ActionPayload::Memo { content } => {
                MemoService::new(self.ctx)
                    .post(event_id, &actor, content, now)
                    .await
            }
        };

        match result {
            Ok(outcome) => {
                self.ctx.invalidate_status(event_id);
                info!(
                    event_id = %event_id,
                    record_id = %outcome.record_id,
                    status = ?outcome.status,
                    "Action applied"
                );
                Ok(outcome)
            }
            Err(e) => {
                debug!(event_id = %event_id, error = %e, "Action rejected");
                Err(e)
            }
        }
    }
}

/// Reject actions of the wrong kind and actions against a closed event
pub(crate) fn ensure_open(event: &Event, kind: EventKind) -> Result<(), DomainError> {
    if !event.is_active {
        return Err(DomainError::EventNotActive);
    }
    if event.kind != kind {
        return Err(DomainError::ValidationError(format!(
            "{kind} action sent to a {} event",
            event.kind
        )));
    }
    Ok(())
}

/// The single record written by a committed transaction
pub(crate) fn committed_record(writes: Vec<RecordWrite>) -> ServiceResult<Interaction> {
    writes
        .into_iter()
        .next()
        .map(RecordWrite::into_record)
        .ok_or_else(|| ServiceError::internal("transaction committed no writes"))
}
