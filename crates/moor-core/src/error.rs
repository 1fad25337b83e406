//! Error taxonomy for provider resolution and installation.
//!
//! Every variant is terminal for an install: nothing is retried and the
//! previous lock stays on disk.

use std::path::PathBuf;

/// Errors raised while resolving, installing, or persisting providers.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    /// No namespace prefix matched the provider in the registry.
    #[error("provider {name} not found")]
    Unresolved { name: String },

    /// The package-manager subprocess exited non-zero or could not be spawned.
    #[error("failed to run {installer} install\n{output}")]
    InstallFailed { installer: String, output: String },

    /// The installed artifact has no type-identifier line or cannot be read.
    #[error("failed to find __pulumiType for {package}")]
    AliasNotFound { package: String },

    /// The manifest is missing, unparseable, or lacks a `dependencies` object.
    #[error("malformed manifest {}: {detail}", path.display())]
    MalformedManifest { path: PathBuf, detail: String },

    /// The lock file exists but does not parse.
    #[error("malformed provider lock {}: {detail}", path.display())]
    MalformedLock { path: PathBuf, detail: String },

    /// File-system failure on a file this subsystem owns.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A resolution task panicked or was cancelled by the runtime.
    #[error("resolution task failed: {0}")]
    Task(String),
}

impl InstallError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for install operations.
pub type Result<T> = std::result::Result<T, InstallError>;
