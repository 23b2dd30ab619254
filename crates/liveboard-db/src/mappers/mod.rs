//! Entity to model mappers
//!
//! - `TryFrom<Model> for Entity`: convert database rows to domain objects; enum columns are
//!   stored as text, so a row with an unknown value is reported as a database error
//! - `*Insert` structs: borrow entity data for binding

mod event;
mod interaction;
mod user;

pub use event::EventInsert;
pub use interaction::InteractionInsert;
