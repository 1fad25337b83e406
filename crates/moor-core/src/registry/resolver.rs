//! Namespace search for provider packages.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{InstallError, Result};

use super::PackageRegistry;

/// Namespace prefixes in priority order: curated scope, upstream scope, bare name.
pub const DEFAULT_NAMESPACES: [&str; 3] = ["@sst-provider/", "@pulumi/", ""];

/// Maps a logical provider name to the first namespace that publishes it.
#[derive(Clone)]
pub struct RegistryResolver {
    registry: Arc<dyn PackageRegistry>,
    namespaces: Vec<String>,
}

impl RegistryResolver {
    pub fn new(registry: Arc<dyn PackageRegistry>) -> Self {
        Self {
            registry,
            namespaces: DEFAULT_NAMESPACES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    /// Resolve `name@version` to a fully namespaced package name.
    ///
    /// Prefixes are tried in order and the first hit wins; a lookup error is
    /// treated like a miss.
    pub async fn resolve(&self, name: &str, version: &str) -> Result<String> {
        for prefix in &self.namespaces {
            let candidate = format!("{}{}", prefix, name);
            match self.registry.get(&candidate, version).await {
                Ok(Some(package)) => {
                    debug!(
                        provider = name,
                        package = %package.name,
                        version,
                        resolved = %package.version,
                        "resolved provider"
                    );
                    return Ok(package.name);
                }
                Ok(None) => {
                    debug!(provider = name, candidate = %candidate, "not in namespace");
                }
                Err(e) => {
                    warn!(provider = name, candidate = %candidate, error = %e, "registry lookup failed");
                }
            }
        }

        Err(InstallError::Unresolved {
            name: name.to_string(),
        })
    }
}

impl std::fmt::Debug for RegistryResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryResolver")
            .field("namespaces", &self.namespaces)
            .finish_non_exhaustive()
    }
}
