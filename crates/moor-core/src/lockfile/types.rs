//! Provider lock data model.

use serde::{Deserialize, Serialize};

/// A resolved provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockEntry {
    /// Logical provider name as declared.
    pub name: String,

    /// Fully namespaced registry identifier (e.g. `@pulumi/aws`).
    pub package: String,

    /// Exact selector string used for resolution and lock comparison.
    pub version: String,

    /// Identifier derived from the installed artifact; empty until installed.
    #[serde(default)]
    pub alias: String,
}

impl LockEntry {
    pub fn new(
        name: impl Into<String>,
        package: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            version: version.into(),
            alias: String::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }
}

/// Ordered set of lock entries, persisted as a bare JSON array.
///
/// Rebuilt wholesale on every install; never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderLock {
    entries: Vec<LockEntry>,
}

impl ProviderLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<LockEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LockEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [LockEntry] {
        &mut self.entries
    }

    pub fn push(&mut self, entry: LockEntry) {
        self.entries.push(entry);
    }

    /// Find the entry recorded for a provider name.
    pub fn get(&self, name: &str) -> Option<&LockEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LockEntry> {
        self.entries.iter()
    }

    /// Whether every entry has a discovered alias.
    pub fn is_installed(&self) -> bool {
        self.entries.iter().all(|e| !e.alias.is_empty())
    }
}

impl<'a> IntoIterator for &'a ProviderLock {
    type Item = &'a LockEntry;
    type IntoIter = std::slice::Iter<'a, LockEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
