//! Concurrent provider resolution.
//!
//! One task per provider feeds a single collector through a channel that
//! holds at most one entry, so producers wait on the collector. Entries land
//! in completion order.

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::error::{InstallError, Result};
use crate::lockfile::{LockEntry, ProviderLock};
use crate::registry::RegistryResolver;
use crate::types::ProviderSpec;

/// Resolve every provider into a fresh lock.
///
/// The first failing task decides the error. Tasks still in flight are
/// detached rather than aborted; whatever they produce afterwards is dropped.
pub async fn resolve_all(
    resolver: &RegistryResolver,
    providers: &[ProviderSpec],
) -> Result<ProviderLock> {
    info!(count = providers.len(), "resolving providers");

    let expected = providers.len();
    let (tx, mut rx) = mpsc::channel::<LockEntry>(1);

    let mut tasks = JoinSet::new();
    for spec in providers {
        let resolver = resolver.clone();
        let tx = tx.clone();
        let name = spec.name.clone();
        let version = spec.effective_version().to_string();

        tasks.spawn(async move {
            let package = resolver.resolve(&name, &version).await?;
            // A closed channel means the collector already finished.
            let _ = tx.send(LockEntry::new(name, package, version)).await;
            Ok::<(), InstallError>(())
        });
    }
    drop(tx);

    let collector = tokio::spawn(async move {
        let mut lock = ProviderLock::new();
        while lock.len() < expected {
            match rx.recv().await {
                Some(entry) => {
                    debug!(name = %entry.name, package = %entry.package, "collected");
                    lock.push(entry);
                }
                None => break,
            }
        }
        lock
    });

    while let Some(joined) = tasks.join_next().await {
        let outcome = joined
            .map_err(|e| InstallError::Task(e.to_string()))
            .and_then(|r| r);
        if let Err(e) = outcome {
            tasks.detach_all();
            return Err(e);
        }
    }

    collector
        .await
        .map_err(|e| InstallError::Task(e.to_string()))
}
