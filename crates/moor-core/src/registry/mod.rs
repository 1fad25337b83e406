//! Package registry collaborator and namespace resolution.
//!
//! `PackageRegistry` abstracts registry lookups so resolution can be tested
//! without the network. `NpmRegistry` talks to an npm-compatible registry.

pub mod npm;
pub mod resolver;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use npm::{DEFAULT_REGISTRY_URL, NpmRegistry};
pub use resolver::{DEFAULT_NAMESPACES, RegistryResolver};

/// A package version the registry confirmed exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryPackage {
    /// Canonical package name reported by the registry.
    pub name: String,
    /// Concrete version the selector pointed at. Logged only; the lock keeps
    /// the declared selector.
    #[serde(default)]
    pub version: String,
}

/// Looks up `package@version` in a registry.
///
/// `Ok(None)` means the registry answered and the package or version does not
/// exist. `Err` means the registry could not be asked. Callers treat both the
/// same way.
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    async fn get(&self, package: &str, version: &str) -> anyhow::Result<Option<RegistryPackage>>;
}
