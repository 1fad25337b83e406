//! Whole-file replacement via temp file + rename.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{InstallError, Result};

/// Replace `path` with `bytes` atomically (tmp + rename).
///
/// The temp file lives next to the target so the rename never crosses a
/// filesystem boundary.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| InstallError::io(&dir, e))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let tmp_path = dir.join(format!(".{}.{}.tmp", file_name, std::process::id()));

    fs::write(&tmp_path, bytes).map_err(|e| InstallError::io(&tmp_path, e))?;

    // Windows refuses to rename over an existing file.
    #[cfg(windows)]
    if path.exists() {
        fs::remove_file(path).map_err(|e| InstallError::io(path, e))?;
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(InstallError::io(path, e));
    }
    Ok(())
}
