//! Status aggregator
//!
//! Serves the public view of an event's records through the status cache.

use std::sync::Arc;

use liveboard_core::{EventStatus, Snowflake};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Status service
pub struct StatusService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatusService<'a> {
    /// Create a new StatusService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Cached status when fresh, otherwise re-aggregated from the store and cached
    ///
    /// An unknown event yields an empty record list. A recompute that overlaps a write to
    /// the same event is returned but not cached.
    #[instrument(skip(self))]
    pub async fn get_event_status(&self, event_id: Snowflake) -> ServiceResult<Arc<EventStatus>> {
        let cache = self.ctx.status_cache();
        if let Some(status) = cache.get(&event_id) {
            debug!(records = status.len(), "Status cache hit");
            return Ok(status);
        }

        let token = cache.begin_fill();
        let records = self.ctx.interaction_repo().find_by_event(event_id).await?;
        let status = Arc::new(EventStatus::project(&records));
        let cached = cache.set_if_current(event_id, Arc::clone(&status), token);

        debug!(records = status.len(), cached, "Status cache miss, recomputed");
        Ok(status)
    }
}
