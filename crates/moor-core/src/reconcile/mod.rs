//! Lock reconciliation.
//!
//! Decides whether the declared providers still match the recorded lock and,
//! when they don't, resolves a fresh lock.
//!
//! ## States
//!
//! ```text
//! Unchecked ──check──▶ UpToDate
//!     │
//!     └──────check──▶ NeedsInstall ──resolve──▶ Resolving ──▶ Installed
//!                                                   │
//!                                                   └──────▶ Failed
//! ```

mod fanout;

use tracing::debug;

use crate::error::Result;
use crate::lockfile::ProviderLock;
use crate::registry::RegistryResolver;
use crate::types::ProviderSpec;

pub use fanout::resolve_all;

/// Where a reconciler is in its check/resolve lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileState {
    Unchecked,
    NeedsInstall,
    UpToDate,
    Resolving,
    Installed,
    Failed,
}

/// Whether `providers` drifted from `lock`.
///
/// True when the counts differ, a provider has no entry, or a provider's
/// effective version differs from the recorded one. Purely local.
pub fn needs_install(providers: &[ProviderSpec], lock: &ProviderLock) -> bool {
    if providers.len() != lock.len() {
        return true;
    }

    providers.iter().any(|spec| {
        let version = spec.effective_version();
        match lock.get(&spec.name) {
            Some(entry) => {
                debug!(name = %spec.name, version, compare = %entry.version, "checking provider");
                entry.version != version
            }
            None => {
                debug!(name = %spec.name, "provider missing from lock");
                true
            }
        }
    })
}

/// Drives the check → resolve transitions for one session.
#[derive(Debug)]
pub struct LockReconciler {
    resolver: RegistryResolver,
    state: ReconcileState,
}

impl LockReconciler {
    pub fn new(resolver: RegistryResolver) -> Self {
        Self {
            resolver,
            state: ReconcileState::Unchecked,
        }
    }

    pub fn state(&self) -> ReconcileState {
        self.state
    }

    pub fn resolver(&self) -> &RegistryResolver {
        &self.resolver
    }

    /// Run the drift check and record the outcome.
    pub fn check(&mut self, providers: &[ProviderSpec], lock: &ProviderLock) -> bool {
        let needed = needs_install(providers, lock);
        self.state = if needed {
            ReconcileState::NeedsInstall
        } else {
            ReconcileState::UpToDate
        };
        needed
    }

    /// Resolve every provider concurrently into a new lock (aliases empty).
    pub async fn resolve(&mut self, providers: &[ProviderSpec]) -> Result<ProviderLock> {
        self.state = ReconcileState::Resolving;
        match resolve_all(&self.resolver, providers).await {
            Ok(lock) => Ok(lock),
            Err(e) => {
                self.state = ReconcileState::Failed;
                Err(e)
            }
        }
    }

    /// Record that the resolved lock made it through install and persistence.
    pub fn mark_installed(&mut self) {
        self.state = ReconcileState::Installed;
    }

    /// Record a failure after resolution (install, emit, or persist).
    pub fn mark_failed(&mut self) {
        self.state = ReconcileState::Failed;
    }
}
