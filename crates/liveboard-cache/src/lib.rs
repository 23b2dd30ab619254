//! # liveboard-cache
//!
//! In-process, TTL-bounded caching of aggregated event status.
//!
//! ## Features
//!
//! - **TtlCache**: generic read-through cache behind a reader/writer lock; expired entries
//!   are never returned
//! - **StatusCache**: the cache keyed by event id holding `EventStatus` snapshots
//! - **Sweeper**: background task purging expired entries, stopped through its handle
//!
//! ## Example
//!
//! ```ignore
//! use liveboard_cache::{spawn_sweeper, StatusCache};
//!
//! let cache = Arc::new(StatusCache::new(Duration::from_secs(30)));
//! let sweep = spawn_sweeper(Arc::clone(&cache), Duration::from_secs(60));
//!
//! let token = cache.begin_fill();
//! cache.set_if_current(event_id, Arc::new(status), token);
//! let hit = cache.get(&event_id);
//! cache.invalidate(&event_id);
//!
//! sweep.stop().await;
//! ```

mod status;
mod sweeper;
mod ttl_cache;

pub use status::StatusCache;
pub use sweeper::{spawn_sweeper, SweepHandle};
pub use ttl_cache::{CacheStats, FillToken, TtlCache};
