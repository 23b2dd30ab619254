//! Repository traits (ports) - define the interface for data access
//!
//! The engine only relies on what is declared here. Drivers (in-memory, PostgreSQL) live in
//! the infrastructure crates.

use async_trait::async_trait;

use super::partition::{PartitionTx, RecordWrite};
use crate::entities::{Event, EventKind, Interaction, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Body of an atomic partition transaction
///
/// Invoked once per attempt with a fresh snapshot, so it must be free of side effects
/// outside the transaction it is handed.
pub type PartitionOp<'a> = dyn Fn(&mut PartitionTx) -> RepoResult<()> + Send + Sync + 'a;

// ============================================================================
// Event Repository
// ============================================================================

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Find event by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Event>>;

    /// Create a new event
    async fn create(&self, event: &Event) -> RepoResult<()>;

    /// Replace an existing event's mutable fields
    async fn update(&self, event: &Event) -> RepoResult<()>;

    /// Open or close an event for new actions
    async fn set_active(&self, id: Snowflake, active: bool) -> RepoResult<()>;

    /// Most recently created events first
    async fn list(&self, limit: i64) -> RepoResult<Vec<Event>>;

    /// Verify the backing store is reachable
    async fn health_check(&self) -> RepoResult<()> {
        Ok(())
    }
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by identity-provider subject id
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>>;

    /// Insert the user, or refresh display name and picture of an existing one.
    /// An existing role and creation time are kept. Returns the stored row.
    async fn upsert(&self, user: &User) -> RepoResult<User>;

    /// Like `upsert`, but the stored role is overwritten with `user.role`
    async fn upsert_with_role(&self, user: &User) -> RepoResult<User>;
}

// ============================================================================
// Interaction Repository
// ============================================================================

#[async_trait]
pub trait InteractionRepository: Send + Sync {
    /// Every record of one event, in no particular order
    async fn find_by_event(&self, event_id: Snowflake) -> RepoResult<Vec<Interaction>>;

    /// Records of one user and kind inside an event
    async fn find_by_user_and_kind(
        &self,
        event_id: Snowflake,
        user_id: &str,
        kind: EventKind,
    ) -> RepoResult<Vec<Interaction>>;

    /// Find a record inside its owning event
    async fn find_by_id(
        &self,
        event_id: Snowflake,
        record_id: Snowflake,
    ) -> RepoResult<Option<Interaction>>;

    /// Plain, non-transactional insert
    async fn create(&self, record: &Interaction) -> RepoResult<()>;

    /// Run `op` against a consistent snapshot of the event and all of its records, then
    /// commit the staged writes only if the partition did not change underneath.
    ///
    /// Conflicting attempts are retried with a fresh snapshot; after the store's attempt
    /// budget is spent the call fails with `TransactionConflict`. An error returned by `op`
    /// aborts without writing anything. Fails with `EventNotFound` for an unknown event.
    async fn run_atomic(
        &self,
        event_id: Snowflake,
        op: &PartitionOp<'_>,
    ) -> RepoResult<Vec<RecordWrite>>;
}
