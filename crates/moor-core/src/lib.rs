//! Moor Core Library
//!
//! Resolves declared infrastructure providers to registry packages, keeps a
//! provider lock in sync with the declaration, drives the package manager,
//! and emits the manifest and type stubs the config compiler consumes.

pub mod config;
pub mod emit;
pub mod error;
pub mod fs;
pub mod install;
pub mod lockfile;
pub mod project;
pub mod reconcile;
pub mod registry;
pub mod status;
pub mod types;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{ConfigStore, InstallSettings, MoorConfig, ProviderDecl};

    // Errors
    pub use crate::error::{InstallError, Result};

    // Lock
    pub use crate::lockfile::{LockEntry, LockfileStore, ProviderLock};

    // Resolution
    pub use crate::reconcile::{LockReconciler, ReconcileState, needs_install};
    pub use crate::registry::{NpmRegistry, PackageRegistry, RegistryPackage, RegistryResolver};

    // Install
    pub use crate::install::{InstallDriver, InstallerConfig};
    pub use crate::project::Project;

    // Status
    pub use crate::status::{ProviderState, ProviderStatus, StatusReport};

    pub use crate::types::ProviderSpec;
}
