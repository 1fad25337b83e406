//! Package-manager subprocess and post-install alias discovery.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::info;

use crate::error::{InstallError, Result};
use crate::lockfile::ProviderLock;

use super::alias::{artifact_path, discover_alias};

/// Default package manager.
pub const DEFAULT_INSTALLER: &str = "bun";

/// Package manager used when the default is switched off.
pub const FALLBACK_INSTALLER: &str = "npm";

/// Which package-manager executable to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerConfig {
    pub program: String,
    pub fallback_program: String,
    pub use_fallback: bool,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_INSTALLER.to_string(),
            fallback_program: FALLBACK_INSTALLER.to_string(),
            use_fallback: false,
        }
    }
}

impl InstallerConfig {
    /// A config that always runs `program`.
    pub fn program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn with_fallback(mut self, use_fallback: bool) -> Self {
        self.use_fallback = use_fallback;
        self
    }

    /// The executable that will actually run.
    pub fn selected(&self) -> &str {
        if self.use_fallback {
            &self.fallback_program
        } else {
            &self.program
        }
    }
}

/// Materializes a lock into `node_modules` and fills in aliases.
#[derive(Debug, Clone)]
pub struct InstallDriver {
    platform_dir: PathBuf,
    installer: InstallerConfig,
}

impl InstallDriver {
    pub fn new(platform_dir: PathBuf, installer: InstallerConfig) -> Self {
        Self {
            platform_dir,
            installer,
        }
    }

    pub fn platform_dir(&self) -> &Path {
        &self.platform_dir
    }

    pub fn installer(&self) -> &InstallerConfig {
        &self.installer
    }

    /// Run the installer, then populate every entry's alias.
    ///
    /// Alias discovery starts only after the installer has exited. Only the
    /// `alias` field of each entry is written.
    pub async fn fetch(&self, lock: &mut ProviderLock) -> Result<()> {
        self.run_installer().await?;

        for entry in lock.entries_mut() {
            let path = artifact_path(&self.platform_dir, &entry.package);
            entry.alias = discover_alias(&path, &entry.package)?;
        }
        Ok(())
    }

    /// Run `<installer> install` in the platform directory.
    pub async fn run_installer(&self) -> Result<()> {
        let program = self.installer.selected();
        info!(installer = program, dir = %self.platform_dir.display(), "fetching deps");

        let output = Command::new(program)
            .arg("install")
            .current_dir(&self.platform_dir)
            .output()
            .await
            .map_err(|e| InstallError::InstallFailed {
                installer: program.to_string(),
                output: e.to_string(),
            })?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(InstallError::InstallFailed {
                installer: program.to_string(),
                output: combined,
            });
        }
        Ok(())
    }
}
