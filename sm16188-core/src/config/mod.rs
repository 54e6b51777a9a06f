//! Configuration types
//!
//! Board-agnostic panel configuration, optionally persisted as postcard
//! binary data.

#[cfg(feature = "serde")]
pub mod persist;
pub mod types;

pub use types::*;
