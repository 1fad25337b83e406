//! Install driver: runs the package manager and discovers provider aliases.

pub mod alias;
pub mod driver;

pub use alias::{ARTIFACT_ENTRY, alias_from_identifier, artifact_path, discover_alias};
pub use driver::{DEFAULT_INSTALLER, FALLBACK_INSTALLER, InstallDriver, InstallerConfig};
