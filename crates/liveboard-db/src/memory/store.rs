//! In-memory implementation of all three repositories
//!
//! Each event owns a partition holding its records and a version counter. `run_atomic`
//! snapshots the partition, runs the transaction body without holding any lock, and commits
//! only if the version is unchanged; otherwise it retries with a fresh snapshot.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use tracing::{debug, instrument, warn};

use liveboard_core::traits::{
    EventRepository, InteractionRepository, PartitionOp, PartitionTx, RecordWrite, RepoResult,
    UserRepository,
};
use liveboard_core::{DomainError, Event, EventKind, Interaction, Snowflake, User};

/// Default number of attempts for `run_atomic`
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, Default)]
struct Partition {
    version: u64,
    records: Vec<Interaction>,
}

/// In-memory store for events, users, and interaction partitions
#[derive(Debug)]
pub struct MemoryStore {
    events: RwLock<HashMap<Snowflake, Event>>,
    users: RwLock<HashMap<String, User>>,
    partitions: DashMap<Snowflake, Partition>,
    max_attempts: u32,
    queries: AtomicU64,
    pending_conflicts: AtomicU32,
    fail_user_lookups: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_max_attempts(DEFAULT_MAX_ATTEMPTS)
    }

    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            events: RwLock::new(HashMap::new()),
            users: RwLock::new(HashMap::new()),
            partitions: DashMap::new(),
            max_attempts: max_attempts.max(1),
            queries: AtomicU64::new(0),
            pending_conflicts: AtomicU32::new(0),
            fail_user_lookups: AtomicBool::new(false),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Number of interaction read queries served so far
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::Relaxed)
    }

    /// Make the next `n` commits fail as if another writer got there first
    pub fn inject_conflicts(&self, n: u32) {
        self.pending_conflicts.store(n, Ordering::SeqCst);
    }

    /// Make user lookups fail with a database error
    pub fn fail_user_lookups(&self, fail: bool) {
        self.fail_user_lookups.store(fail, Ordering::SeqCst);
    }

    /// Insert or replace a user verbatim, including role
    pub fn insert_user(&self, user: User) {
        self.users.write().insert(user.id.clone(), user);
    }

    /// Insert a record directly, bypassing transactions
    pub fn seed_record(&self, record: Interaction) {
        let mut partition = self.partitions.entry(record.event_id).or_default();
        partition.records.push(record);
        partition.version += 1;
    }

    /// Current records of an event, without counting as a query
    pub fn records(&self, event_id: Snowflake) -> Vec<Interaction> {
        self.partitions
            .get(&event_id)
            .map(|p| p.records.clone())
            .unwrap_or_default()
    }

    fn count_query(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self, event_id: Snowflake) -> (u64, Vec<Interaction>) {
        self.partitions
            .get(&event_id)
            .map(|p| (p.version, p.records.clone()))
            .unwrap_or_default()
    }

    /// Fail in-flight transactions on this event's partition
    fn bump_version(&self, event_id: Snowflake) {
        self.partitions.entry(event_id).or_default().version += 1;
    }

    fn take_injected_conflict(&self) -> bool {
        self.pending_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    /// Apply `writes` if the partition is still at `version`
    fn try_commit(&self, event_id: Snowflake, version: u64, writes: &[RecordWrite]) -> bool {
        if self.take_injected_conflict() {
            return false;
        }

        let mut partition = self.partitions.entry(event_id).or_default();
        if partition.version != version {
            return false;
        }

        for write in writes {
            match write {
                RecordWrite::Create(record) => partition.records.push(record.clone()),
                RecordWrite::Update(record) => {
                    if let Some(slot) = partition.records.iter_mut().find(|r| r.id == record.id) {
                        *slot = record.clone();
                    }
                }
            }
        }
        partition.version += 1;
        true
    }
}

// ============================================================================
// Event Repository
// ============================================================================

#[async_trait]
impl EventRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Event>> {
        Ok(self.events.read().get(&id).cloned())
    }

    async fn create(&self, event: &Event) -> RepoResult<()> {
        let mut events = self.events.write();
        if events.contains_key(&event.id) {
            return Err(DomainError::InternalError(format!(
                "event {} already exists",
                event.id
            )));
        }
        events.insert(event.id, event.clone());
        Ok(())
    }

    async fn update(&self, event: &Event) -> RepoResult<()> {
        {
            let mut events = self.events.write();
            let stored = events
                .get_mut(&event.id)
                .ok_or(DomainError::EventNotFound(event.id))?;
            *stored = event.clone();
        }
        self.bump_version(event.id);
        Ok(())
    }

    async fn set_active(&self, id: Snowflake, active: bool) -> RepoResult<()> {
        {
            let mut events = self.events.write();
            let stored = events.get_mut(&id).ok_or(DomainError::EventNotFound(id))?;
            stored.is_active = active;
        }
        self.bump_version(id);
        Ok(())
    }

    async fn list(&self, limit: i64) -> RepoResult<Vec<Event>> {
        let mut events: Vec<Event> = self.events.read().values().cloned().collect();
        events.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        events.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(events)
    }
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        if self.fail_user_lookups.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("user store unavailable".into()));
        }
        Ok(self.users.read().get(id).cloned())
    }

    async fn upsert(&self, user: &User) -> RepoResult<User> {
        let mut users = self.users.write();
        let stored = users
            .entry(user.id.clone())
            .and_modify(|existing| {
                existing.display_name.clone_from(&user.display_name);
                existing.picture_url.clone_from(&user.picture_url);
            })
            .or_insert_with(|| user.clone());
        Ok(stored.clone())
    }

    async fn upsert_with_role(&self, user: &User) -> RepoResult<User> {
        let mut users = self.users.write();
        let stored = users
            .entry(user.id.clone())
            .and_modify(|existing| {
                existing.display_name.clone_from(&user.display_name);
                existing.picture_url.clone_from(&user.picture_url);
                existing.role = user.role;
            })
            .or_insert_with(|| user.clone());
        Ok(stored.clone())
    }
}

// ============================================================================
// Interaction Repository
// ============================================================================

#[async_trait]
impl InteractionRepository for MemoryStore {
    async fn find_by_event(&self, event_id: Snowflake) -> RepoResult<Vec<Interaction>> {
        self.count_query();
        Ok(self.records(event_id))
    }

    async fn find_by_user_and_kind(
        &self,
        event_id: Snowflake,
        user_id: &str,
        kind: EventKind,
    ) -> RepoResult<Vec<Interaction>> {
        self.count_query();
        Ok(self
            .partitions
            .get(&event_id)
            .map(|p| {
                p.records
                    .iter()
                    .filter(|r| r.user_id == user_id && r.kind == kind)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_by_id(
        &self,
        event_id: Snowflake,
        record_id: Snowflake,
    ) -> RepoResult<Option<Interaction>> {
        self.count_query();
        Ok(self
            .partitions
            .get(&event_id)
            .and_then(|p| p.records.iter().find(|r| r.id == record_id).cloned()))
    }

    async fn create(&self, record: &Interaction) -> RepoResult<()> {
        self.seed_record(record.clone());
        Ok(())
    }

    #[instrument(skip(self, op))]
    async fn run_atomic(
        &self,
        event_id: Snowflake,
        op: &PartitionOp<'_>,
    ) -> RepoResult<Vec<RecordWrite>> {
        for attempt in 1..=self.max_attempts {
            // version before event: an event write in between then fails the commit
            let (version, records) = self.snapshot(event_id);
            let event = self
                .events
                .read()
                .get(&event_id)
                .cloned()
                .ok_or(DomainError::EventNotFound(event_id))?;

            let mut tx = PartitionTx::new(event, records);
            op(&mut tx)?;

            if !tx.has_writes() {
                return Ok(Vec::new());
            }
            if self.try_commit(event_id, version, tx.writes()) {
                return Ok(tx.into_writes());
            }

            debug!(attempt, "Partition changed during transaction, retrying");
            tokio::task::yield_now().await;
        }

        warn!(attempts = self.max_attempts, "Partition transaction gave up");
        Err(DomainError::TransactionConflict {
            attempts: self.max_attempts,
        })
    }
}
