//! Identity verification

mod identity;

pub use identity::{IdentityClaims, IdentityVerifier};
