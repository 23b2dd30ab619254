//! In-process store driver

mod store;

pub use store::MemoryStore;
