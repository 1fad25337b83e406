//! Manifest (`package.json`) dependency updates.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{InstallError, Result};
use crate::fs::write_atomic;
use crate::lockfile::ProviderLock;

/// Manifest file name inside the platform directory.
pub const MANIFEST_NAME: &str = "package.json";

/// Set `dependencies[package] = version` for every lock entry and rewrite.
///
/// The manifest must already exist and hold a `dependencies` object. Keys we
/// don't own are left as they are. Returns the written document.
pub fn write_manifest(path: &Path, lock: &ProviderLock) -> Result<Map<String, Value>> {
    info!(path = %path.display(), "writing manifest");

    let mut root = load_manifest(path)?;
    let dependencies = match root.get_mut("dependencies") {
        Some(Value::Object(map)) => map,
        Some(_) => return Err(malformed(path, "'dependencies' is not a JSON object")),
        None => return Err(malformed(path, "missing 'dependencies' object")),
    };

    for entry in lock {
        debug!(name = %entry.name, package = %entry.package, version = %entry.version, "adding dependency");
        dependencies.insert(entry.package.clone(), Value::String(entry.version.clone()));
    }

    let bytes = serde_json::to_vec_pretty(&root)
        .map_err(|e| malformed(path, &format!("failed to serialize: {}", e)))?;
    write_atomic(path, &bytes)?;
    Ok(root)
}

fn load_manifest(path: &Path) -> Result<Map<String, Value>> {
    let bytes = std::fs::read(path).map_err(|e| malformed(path, &e.to_string()))?;
    let value: Value =
        serde_json::from_slice(&bytes).map_err(|e| malformed(path, &e.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(malformed(path, "expected JSON object at root")),
    }
}

fn malformed(path: &Path, detail: &str) -> InstallError {
    InstallError::MalformedManifest {
        path: path.to_path_buf(),
        detail: detail.to_string(),
    }
}
