//! Configuration schema for moor.toml
//!
//! ```toml
//! [install]
//! platform_dir = ".sst/platform"
//! installer = "bun"
//!
//! [providers]
//! aws = {}
//! cloudflare = { version = "5.37.1" }
//! random = true
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::install::{DEFAULT_INSTALLER, FALLBACK_INSTALLER};
use crate::registry::DEFAULT_REGISTRY_URL;
use crate::types::ProviderSpec;

/// Root configuration structure for moor.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MoorConfig {
    /// Install settings
    #[serde(default)]
    pub install: InstallSettings,

    /// Declared providers, keyed by logical name
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderDecl>,
}

/// `[install]` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstallSettings {
    /// Directory holding package.json, the lock and node_modules,
    /// relative to the project root
    #[serde(default = "default_platform_dir")]
    pub platform_dir: PathBuf,

    /// Package manager executable
    #[serde(default = "default_installer")]
    pub installer: String,

    /// Package manager used when NO_BUN is set
    #[serde(default = "default_fallback_installer")]
    pub fallback_installer: String,

    /// npm-compatible registry base URL
    #[serde(default = "default_registry")]
    pub registry: String,
}

impl Default for InstallSettings {
    fn default() -> Self {
        Self {
            platform_dir: default_platform_dir(),
            installer: default_installer(),
            fallback_installer: default_fallback_installer(),
            registry: default_registry(),
        }
    }
}

fn default_platform_dir() -> PathBuf {
    PathBuf::from(".sst").join("platform")
}

fn default_installer() -> String {
    DEFAULT_INSTALLER.to_string()
}

fn default_fallback_installer() -> String {
    FALLBACK_INSTALLER.to_string()
}

fn default_registry() -> String {
    DEFAULT_REGISTRY_URL.to_string()
}

/// A declared provider: either a boolean toggle or an argument table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ProviderDecl {
    Toggle(bool),
    Args(ProviderArgs),
}

/// Provider arguments. Only `version` is read here; the rest belongs to the
/// downstream compiler.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProviderArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(flatten)]
    pub extra: toml::Table,
}

impl ProviderDecl {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, ProviderDecl::Toggle(false))
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            ProviderDecl::Toggle(_) => None,
            ProviderDecl::Args(args) => args.version.as_deref(),
        }
    }
}

impl MoorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enabled providers in name order.
    pub fn provider_specs(&self) -> Vec<ProviderSpec> {
        self.providers
            .iter()
            .filter(|(_, decl)| decl.is_enabled())
            .map(|(name, decl)| ProviderSpec {
                name: name.clone(),
                version_selector: decl.version().map(str::to_string),
            })
            .collect()
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        for name in self.providers.keys() {
            if name.is_empty() {
                anyhow::bail!("Provider name cannot be empty");
            }
            if name.chars().any(char::is_whitespace) {
                anyhow::bail!("Provider name cannot contain whitespace: '{}'", name);
            }
            if !is_valid_provider_name(name) {
                anyhow::bail!(
                    "Invalid provider name '{}': use letters, digits, '.', '_' or '-', not starting with '.'",
                    name
                );
            }
        }
        if self.install.installer.trim().is_empty() {
            anyhow::bail!("install.installer cannot be empty");
        }
        if self.install.fallback_installer.trim().is_empty() {
            anyhow::bail!("install.fallback_installer cannot be empty");
        }
        Ok(())
    }
}

/// Provider names become package path segments and TypeScript string keys,
/// so only npm-safe characters are allowed.
fn is_valid_provider_name(name: &str) -> bool {
    !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_false_disables_provider() {
        let mut config = MoorConfig::new();
        config
            .providers
            .insert("aws".to_string(), ProviderDecl::Toggle(true));
        config
            .providers
            .insert("gcp".to_string(), ProviderDecl::Toggle(false));

        let specs = config.provider_specs();

        assert_eq!(specs, vec![ProviderSpec::new("aws")]);
    }

    #[test]
    fn test_args_version_becomes_selector() {
        let mut config = MoorConfig::new();
        config.providers.insert(
            "cloudflare".to_string(),
            ProviderDecl::Args(ProviderArgs {
                version: Some("5.37.1".to_string()),
                extra: toml::Table::new(),
            }),
        );

        let specs = config.provider_specs();

        assert_eq!(specs[0].effective_version(), "5.37.1");
    }

    #[test]
    fn test_default_install_settings() {
        let settings = InstallSettings::default();
        assert_eq!(settings.platform_dir, PathBuf::from(".sst/platform"));
        assert_eq!(settings.installer, "bun");
        assert_eq!(settings.fallback_installer, "npm");
        assert_eq!(settings.registry, "https://registry.npmjs.org/");
    }

    #[test]
    fn test_validate_rejects_whitespace_name() {
        let mut config = MoorConfig::new();
        config
            .providers
            .insert("my provider".to_string(), ProviderDecl::Toggle(true));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_npm_safe_names() {
        let mut config = MoorConfig::new();
        for name in ["aws", "aws-native", "azure_native", "cloudflare.v2", "Tls2"] {
            config
                .providers
                .insert(name.to_string(), ProviderDecl::Toggle(true));
        }
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unsafe_names() {
        for name in ["a\"b", "../escape", "scope/aws", ".hidden", "..", "aws@6"] {
            let mut config = MoorConfig::new();
            config
                .providers
                .insert(name.to_string(), ProviderDecl::Toggle(true));
            assert!(config.validate().is_err(), "accepted {:?}", name);
        }
    }
}
