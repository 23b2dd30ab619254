//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in liveboard-core.

mod error;
mod event;
mod interaction;
mod user;

pub use event::PgEventRepository;
pub use interaction::PgInteractionRepository;
pub use user::PgUserRepository;
