//! Alias discovery from installed provider artifacts.
//!
//! Each provider package ships a `provider.js` that assigns its type token,
//! e.g. `Provider.__pulumiType = "aws-native";`. The alias is that token with
//! hyphens removed (`awsnative`).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::bytes::Regex;
use tracing::debug;

use crate::error::{InstallError, Result};

/// Entry file scanned inside each installed package.
pub const ARTIFACT_ENTRY: &str = "provider.js";

fn pulumi_type_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"Provider\.__pulumiType = ['"]([^'"]+)['"]"#)
            .expect("type identifier pattern is valid")
    })
}

/// Path of a package's entry file under `node_modules`.
pub fn artifact_path(platform_dir: &Path, package: &str) -> PathBuf {
    let mut path = platform_dir.join("node_modules");
    for segment in package.split('/') {
        path.push(segment);
    }
    path.join(ARTIFACT_ENTRY)
}

/// Return the first type identifier found in `reader`, stopping at that line.
///
/// Lines are matched as raw bytes, so non-UTF-8 content elsewhere in the file
/// does not hide the marker. Only read failures are errors.
pub fn scan_type_identifier<R: BufRead>(mut reader: R) -> std::io::Result<Option<String>> {
    let pattern = pulumi_type_pattern();
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        if let Some(caps) = pattern.captures(&line) {
            return Ok(Some(String::from_utf8_lossy(&caps[1]).into_owned()));
        }
    }
}

/// Strip hyphens from a type identifier.
pub fn alias_from_identifier(identifier: &str) -> String {
    identifier.replace('-', "")
}

/// Read the artifact at `path` and derive the alias for `package`.
///
/// A missing file, an unreadable file, or a file without a match are all
/// `AliasNotFound`.
pub fn discover_alias(path: &Path, package: &str) -> Result<String> {
    let not_found = || InstallError::AliasNotFound {
        package: package.to_string(),
    };

    let file = File::open(path).map_err(|e| {
        debug!(path = %path.display(), error = %e, "cannot open provider artifact");
        not_found()
    })?;

    match scan_type_identifier(BufReader::new(file)) {
        Ok(Some(identifier)) => {
            let alias = alias_from_identifier(&identifier);
            if alias.is_empty() {
                return Err(not_found());
            }
            debug!(package, identifier = %identifier, alias = %alias, "discovered alias");
            Ok(alias)
        }
        Ok(None) => Err(not_found()),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "failed reading provider artifact");
            Err(not_found())
        }
    }
}
