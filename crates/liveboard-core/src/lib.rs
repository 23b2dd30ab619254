//! # liveboard-core
//!
//! Domain layer: events, interaction records, the error taxonomy, and the store traits
//! the engine is written against. No infrastructure dependencies live here.

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Actor, Event, EventConfig, EventKind, EventStatus, Interaction, InteractionStatus,
    RecordView, User, UserRole,
};
pub use error::DomainError;
pub use traits::{
    EventRepository, InteractionRepository, PartitionOp, PartitionTx, RecordWrite, RepoResult,
    UserRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
