//! Event status cache

use std::sync::Arc;

use liveboard_core::{EventStatus, Snowflake};

use crate::ttl_cache::TtlCache;

/// Aggregated status per event; values are shared snapshots
pub type StatusCache = TtlCache<Snowflake, Arc<EventStatus>>;
