//! Service context - dependency container for services
//!
//! Holds the repositories, the status cache, the id generator, and the engine tunables.

use std::collections::HashSet;
use std::sync::Arc;

use liveboard_cache::{spawn_sweeper, StatusCache, SweepHandle};
use liveboard_common::EngineConfig;
use liveboard_core::traits::{
    EventRepository, InteractionRepository, PartitionOp, RecordWrite, UserRepository,
};
use liveboard_core::{DomainError, Snowflake, SnowflakeGenerator};
use liveboard_db::MemoryStore;
use tracing::warn;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every field is shared.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    event_repo: Arc<dyn EventRepository>,
    user_repo: Arc<dyn UserRepository>,
    interaction_repo: Arc<dyn InteractionRepository>,

    // Cache
    status_cache: Arc<StatusCache>,

    snowflake_generator: Arc<SnowflakeGenerator>,
    engine: EngineConfig,
    admin_ids: Arc<HashSet<String>>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        event_repo: Arc<dyn EventRepository>,
        user_repo: Arc<dyn UserRepository>,
        interaction_repo: Arc<dyn InteractionRepository>,
        status_cache: Arc<StatusCache>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        engine: EngineConfig,
    ) -> Self {
        Self {
            event_repo,
            user_repo,
            interaction_repo,
            status_cache,
            snowflake_generator,
            engine,
            admin_ids: Arc::default(),
        }
    }

    // === Repositories ===

    /// Get the event repository
    pub fn event_repo(&self) -> &dyn EventRepository {
        self.event_repo.as_ref()
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the interaction repository
    pub fn interaction_repo(&self) -> &dyn InteractionRepository {
        self.interaction_repo.as_ref()
    }

    // === Cache ===

    pub fn status_cache(&self) -> &StatusCache {
        self.status_cache.as_ref()
    }

    /// Drop the cached status of an event
    pub fn invalidate_status(&self, event_id: Snowflake) {
        self.status_cache.invalidate(&event_id);
    }

    /// Start the background purge of expired status entries
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_cache_sweeper(&self) -> SweepHandle {
        spawn_sweeper(
            Arc::clone(&self.status_cache),
            self.engine.cache_sweep_interval(),
        )
    }

    // === Roles ===

    /// Users whose role is decided by the configured admin list; empty leaves stored
    /// roles untouched
    pub fn admin_ids(&self) -> &HashSet<String> {
        self.admin_ids.as_ref()
    }

    // === Engine ===

    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    /// Run a partition transaction under the request deadline
    ///
    /// An expired deadline drops the in-flight attempt, so nothing it staged is committed.
    pub async fn run_atomic(
        &self,
        event_id: Snowflake,
        op: &PartitionOp<'_>,
    ) -> Result<Vec<RecordWrite>, DomainError> {
        let deadline = self.engine.request_timeout();
        match tokio::time::timeout(deadline, self.interaction_repo.run_atomic(event_id, op)).await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(event_id = %event_id, ?deadline, "Partition transaction deadline exceeded");
                Err(DomainError::DeadlineExceeded)
            }
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("status_cache", &self.status_cache.stats())
            .field("snowflake_generator", &self.snowflake_generator)
            .field("engine", &self.engine)
            .field("admin_ids", &self.admin_ids.len())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
///
/// The status cache defaults to one sized by the engine TTL; the id generator defaults to
/// worker 0.
#[derive(Default)]
pub struct ServiceContextBuilder {
    event_repo: Option<Arc<dyn EventRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    interaction_repo: Option<Arc<dyn InteractionRepository>>,
    status_cache: Option<Arc<StatusCache>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    engine: Option<EngineConfig>,
    admin_ids: HashSet<String>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_repo(mut self, repo: Arc<dyn EventRepository>) -> Self {
        self.event_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn interaction_repo(mut self, repo: Arc<dyn InteractionRepository>) -> Self {
        self.interaction_repo = Some(repo);
        self
    }

    /// Use one in-memory store for all three repositories
    pub fn memory_store(self, store: Arc<MemoryStore>) -> Self {
        self.event_repo(store.clone())
            .user_repo(store.clone())
            .interaction_repo(store)
    }

    pub fn status_cache(mut self, cache: Arc<StatusCache>) -> Self {
        self.status_cache = Some(cache);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn engine(mut self, engine: EngineConfig) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn admin_ids<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.admin_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let engine = self.engine.unwrap_or_default();
        let status_cache = self
            .status_cache
            .unwrap_or_else(|| Arc::new(StatusCache::new(engine.cache_ttl())));

        let mut ctx = ServiceContext::new(
            self.event_repo
                .ok_or_else(|| ServiceError::validation("event_repo is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.interaction_repo
                .ok_or_else(|| ServiceError::validation("interaction_repo is required"))?,
            status_cache,
            self.snowflake_generator.unwrap_or_default(),
            engine,
        );
        ctx.admin_ids = Arc::new(self.admin_ids);
        Ok(ctx)
    }
}
