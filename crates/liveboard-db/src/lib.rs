//! # liveboard-db
//!
//! Storage layer implementing the repository traits of `liveboard-core`.
//!
//! Two drivers are provided:
//!
//! - [`MemoryStore`]: in-process store with versioned event partitions and an optimistic,
//!   retrying `run_atomic`. Used for tests and single-node deployments.
//! - PostgreSQL repositories via SQLx, where `run_atomic` serializes writers on the event
//!   row (`SELECT ... FOR UPDATE`).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use liveboard_db::{create_pool, run_migrations, PgInteractionRepository, PoolConfig};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::from_env()).await?;
//!     run_migrations(&pool).await?;
//!     let interactions = PgInteractionRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{PgEventRepository, PgInteractionRepository, PgUserRepository};
