//! Repository traits (ports) and the partition transaction surface

mod partition;
mod repositories;

pub use partition::{PartitionTx, RecordWrite};
pub use repositories::{
    EventRepository, InteractionRepository, PartitionOp, RepoResult, UserRepository,
};
