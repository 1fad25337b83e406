//! Lockfile types and persistence.
//!
//! Represents the resolved package, version, and alias of every provider.

pub mod store;
pub mod types;

pub use store::{LOCKFILE_NAME, LockfileStore};
pub use types::{LockEntry, ProviderLock};
