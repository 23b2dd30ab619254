//! Domain entities - core business objects

mod event;
mod interaction;
mod status;
mod user;

pub use event::{Event, EventConfig, EventKind};
pub use interaction::{Interaction, InteractionStatus};
pub use status::{EventStatus, RecordView};
pub use user::{Actor, User, UserRole};
