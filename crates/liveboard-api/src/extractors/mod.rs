//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, path and query parameters.

mod auth;
mod path;
mod query;
mod validated;

pub use auth::AuthUser;
pub use path::{EventPath, RecordPath, SnowflakePath};
pub use query::QueryParams;
pub use validated::ValidatedJson;
