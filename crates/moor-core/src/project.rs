//! Project-level install orchestration.
//!
//! Ties the reconciler, install driver, and emitters together for one
//! platform directory. The lock file is the last thing written, so any
//! failure leaves the previous lock on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::config::{ConfigStore, MoorConfig};
use crate::emit::{MANIFEST_NAME, TYPE_STUBS_NAME, write_manifest, write_type_stubs};
use crate::error::Result;
use crate::install::{InstallDriver, InstallerConfig};
use crate::lockfile::{LockfileStore, ProviderLock};
use crate::reconcile::{LockReconciler, ReconcileState};
use crate::registry::{NpmRegistry, RegistryResolver};
use crate::status::{StatusReport, collect_status};
use crate::types::ProviderSpec;

/// One platform directory and its declared providers.
#[derive(Debug)]
pub struct Project {
    platform_dir: PathBuf,
    providers: Vec<ProviderSpec>,
    lock: ProviderLock,
    lock_store: LockfileStore,
    reconciler: LockReconciler,
    driver: InstallDriver,
}

impl Project {
    /// Create a project and load its current lock.
    pub fn new(
        platform_dir: PathBuf,
        providers: Vec<ProviderSpec>,
        resolver: RegistryResolver,
        installer: InstallerConfig,
    ) -> Result<Self> {
        let lock_store = LockfileStore::new(&platform_dir);
        let lock = lock_store.load()?;

        Ok(Self {
            driver: InstallDriver::new(platform_dir.clone(), installer),
            reconciler: LockReconciler::new(resolver),
            platform_dir,
            providers,
            lock,
            lock_store,
        })
    }

    /// Build a project from moor.toml against the configured npm registry.
    ///
    /// `use_fallback` selects the fallback installer.
    pub fn from_config(
        store: &ConfigStore,
        config: &MoorConfig,
        use_fallback: bool,
    ) -> anyhow::Result<Self> {
        let registry = NpmRegistry::new(&config.install.registry)?;
        let installer = InstallerConfig {
            program: config.install.installer.clone(),
            fallback_program: config.install.fallback_installer.clone(),
            use_fallback,
        };

        let project = Self::new(
            store.platform_dir(config),
            config.provider_specs(),
            RegistryResolver::new(Arc::new(registry)),
            installer,
        )?;
        Ok(project)
    }

    pub fn platform_dir(&self) -> &Path {
        &self.platform_dir
    }

    pub fn providers(&self) -> &[ProviderSpec] {
        &self.providers
    }

    pub fn lock(&self) -> &ProviderLock {
        &self.lock
    }

    pub fn state(&self) -> ReconcileState {
        self.reconciler.state()
    }

    pub fn installer(&self) -> &InstallerConfig {
        self.driver.installer()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.platform_dir.join(MANIFEST_NAME)
    }

    pub fn type_stubs_path(&self) -> PathBuf {
        self.platform_dir.join(TYPE_STUBS_NAME)
    }

    pub fn lock_path(&self) -> &Path {
        self.lock_store.path()
    }

    /// Whether the declared providers drifted from the lock.
    pub fn needs_install(&mut self) -> bool {
        self.reconciler.check(&self.providers, &self.lock)
    }

    /// Per-provider comparison of declaration and lock.
    pub fn status(&self) -> StatusReport {
        collect_status(&self.platform_dir, &self.providers, &self.lock)
    }

    /// Resolve, install, and persist every declared provider.
    ///
    /// Steps run strictly in order: resolve, manifest, installer + aliases,
    /// type stubs, lock. The first error aborts the rest.
    pub async fn install(&mut self) -> Result<()> {
        info!(dir = %self.platform_dir.display(), "installing deps");

        match self.run_install().await {
            Ok(()) => {
                self.reconciler.mark_installed();
                info!(providers = self.lock.len(), "install complete");
                Ok(())
            }
            Err(e) => {
                self.reconciler.mark_failed();
                Err(e)
            }
        }
    }

    async fn run_install(&mut self) -> Result<()> {
        self.lock = self.reconciler.resolve(&self.providers).await?;

        write_manifest(&self.manifest_path(), &self.lock)?;
        self.driver.fetch(&mut self.lock).await?;
        write_type_stubs(&self.type_stubs_path(), &self.lock)?;

        info!(path = %self.lock_store.path().display(), "writing provider lock");
        self.lock_store.save(&self.lock)
    }
}
