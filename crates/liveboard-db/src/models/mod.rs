//! Database models - SQLx-compatible structs for PostgreSQL tables

mod event;
mod interaction;
mod user;

pub use event::EventModel;
pub use interaction::InteractionModel;
pub use user::UserModel;
