//! Integration test utilities for the Liveboard server
//!
//! Spawns the full HTTP stack on an in-memory store and drives it with `reqwest`.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
