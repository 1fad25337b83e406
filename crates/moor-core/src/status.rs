//! Lock status reporting.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::lockfile::ProviderLock;
use crate::reconcile::needs_install;
use crate::types::ProviderSpec;

/// How a single provider compares to the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderState {
    /// Declared and locked at the same version.
    Ok,
    /// Declared with a different version than locked.
    Outdated,
    /// Declared but not in the lock.
    Missing,
    /// Locked but no longer declared.
    Orphaned,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    pub name: String,
    pub declared_version: Option<String>,
    pub locked_version: Option<String>,
    pub package: Option<String>,
    pub alias: Option<String>,
    pub state: ProviderState,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub platform_dir: PathBuf,
    pub needs_install: bool,
    pub providers: Vec<ProviderStatus>,
}

impl StatusReport {
    /// Number of providers not in the `Ok` state.
    pub fn issues(&self) -> usize {
        self.providers
            .iter()
            .filter(|p| p.state != ProviderState::Ok)
            .count()
    }
}

/// Compare declared providers with the lock, declared ones first.
pub fn collect_status(
    platform_dir: &Path,
    providers: &[ProviderSpec],
    lock: &ProviderLock,
) -> StatusReport {
    let mut rows: Vec<ProviderStatus> = providers
        .iter()
        .map(|spec| {
            let declared = spec.effective_version().to_string();
            match lock.get(&spec.name) {
                Some(entry) => ProviderStatus {
                    name: spec.name.clone(),
                    state: if entry.version == declared {
                        ProviderState::Ok
                    } else {
                        ProviderState::Outdated
                    },
                    declared_version: Some(declared),
                    locked_version: Some(entry.version.clone()),
                    package: Some(entry.package.clone()),
                    alias: (!entry.alias.is_empty()).then(|| entry.alias.clone()),
                },
                None => ProviderStatus {
                    name: spec.name.clone(),
                    declared_version: Some(declared),
                    locked_version: None,
                    package: None,
                    alias: None,
                    state: ProviderState::Missing,
                },
            }
        })
        .collect();

    for entry in lock {
        if providers.iter().all(|spec| spec.name != entry.name) {
            rows.push(ProviderStatus {
                name: entry.name.clone(),
                declared_version: None,
                locked_version: Some(entry.version.clone()),
                package: Some(entry.package.clone()),
                alias: (!entry.alias.is_empty()).then(|| entry.alias.clone()),
                state: ProviderState::Orphaned,
            });
        }
    }

    StatusReport {
        platform_dir: platform_dir.to_path_buf(),
        needs_install: needs_install(providers, lock),
        providers: rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lockfile::LockEntry;

    #[test]
    fn test_status_classifies_each_provider() {
        let providers = vec![
            ProviderSpec::new("aws"),
            ProviderSpec::new("cloudflare").with_version("5.37.1"),
            ProviderSpec::new("tls"),
        ];
        let lock = ProviderLock::from_entries(vec![
            LockEntry::new("aws", "@pulumi/aws", "latest").with_alias("aws"),
            LockEntry::new("cloudflare", "@pulumi/cloudflare", "5.0.0").with_alias("cloudflare"),
            LockEntry::new("random", "@pulumi/random", "latest").with_alias("random"),
        ]);

        let report = collect_status(Path::new("/p"), &providers, &lock);

        let states: Vec<_> = report
            .providers
            .iter()
            .map(|p| (p.name.as_str(), p.state))
            .collect();
        assert_eq!(
            states,
            vec![
                ("aws", ProviderState::Ok),
                ("cloudflare", ProviderState::Outdated),
                ("tls", ProviderState::Missing),
                ("random", ProviderState::Orphaned),
            ]
        );
        assert!(report.needs_install);
        assert_eq!(report.issues(), 3);
    }

    #[test]
    fn test_status_in_sync() {
        let providers = vec![ProviderSpec::new("aws")];
        let lock = ProviderLock::from_entries(vec![
            LockEntry::new("aws", "@pulumi/aws", "latest").with_alias("aws"),
        ]);

        let report = collect_status(Path::new("/p"), &providers, &lock);

        assert!(!report.needs_install);
        assert_eq!(report.issues(), 0);
        assert_eq!(report.providers[0].alias.as_deref(), Some("aws"));
    }
}
