//! Vote handler
//!
//! One ballot per participant and event; resubmitting replaces the ballot in place.

use chrono::{DateTime, Utc};
use liveboard_core::traits::PartitionTx;
use liveboard_core::{Actor, EventKind, Interaction, Snowflake};
use tracing::{debug, instrument};

use super::action::{committed_record, ensure_open, ActionOutcome};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Vote service
pub struct VoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteService<'a> {
    /// Create a new VoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create or fully replace the caller's ballot
    ///
    /// Last write wins. Selections are not checked against the event's options or
    /// `maxVotes`.
    #[instrument(skip(self, actor, selected_options), fields(user_id = %actor.user_id))]
    pub async fn submit(
        &self,
        event_id: Snowflake,
        actor: &Actor,
        selected_options: Vec<String>,
        now: DateTime<Utc>,
    ) -> ServiceResult<ActionOutcome> {
        let fresh_id = self.ctx.generate_id();

        let writes = self
            .ctx
            .run_atomic(event_id, &|tx: &mut PartitionTx| {
                ensure_open(tx.event(), EventKind::Vote)?;

                let existing = tx
                    .records()
                    .iter()
                    .find(|r| r.kind == EventKind::Vote && r.is_owned_by(&actor.user_id))
                    .map(|r| r.id);

                let mut ballot = Interaction::new(
                    existing.unwrap_or(fresh_id),
                    event_id,
                    actor,
                    EventKind::Vote,
                    now,
                );
                ballot.selected_options.clone_from(&selected_options);

                match existing {
                    Some(_) => tx.update(ballot),
                    None => tx.create(ballot),
                }
            })
            .await?;

        let ballot = committed_record(writes)?;
        debug!(record_id = %ballot.id, options = ballot.selected_options.len(), "Ballot stored");
        Ok(ActionOutcome::from(&ballot))
    }
}
