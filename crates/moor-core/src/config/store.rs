//! Config store for loading and saving moor.toml.

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{MoorConfig, parser};

/// Config file name at the project root.
pub const CONFIG_FILE_NAME: &str = "moor.toml";

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
    project_root: PathBuf,
}

impl ConfigStore {
    pub fn from_current_dir() -> anyhow::Result<Self> {
        let project_root = std::env::current_dir()?;
        Ok(Self::from_project_root(project_root))
    }

    pub fn from_project_root(project_root: PathBuf) -> Self {
        Self {
            config_path: project_root.join(CONFIG_FILE_NAME),
            project_root,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    /// Load moor.toml. A missing file is an error: there is nothing to install.
    pub fn load(&self) -> anyhow::Result<MoorConfig> {
        if !self.config_path.exists() {
            anyhow::bail!(
                "No {} found in {}",
                CONFIG_FILE_NAME,
                self.project_root.display()
            );
        }
        parser::parse_moor_toml(&self.config_path)
    }

    pub fn save(&self, config: &MoorConfig) -> anyhow::Result<()> {
        let content = parser::to_toml(config).context("Failed to serialize config to TOML")?;
        std::fs::write(&self.config_path, content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;
        Ok(())
    }

    /// Absolute platform directory for a loaded config.
    pub fn platform_dir(&self, config: &MoorConfig) -> PathBuf {
        self.project_root.join(&config.install.platform_dir)
    }
}
