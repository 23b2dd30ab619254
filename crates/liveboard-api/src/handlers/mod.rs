//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod actions;
pub mod events;
pub mod health;
pub mod records;
pub mod users;
