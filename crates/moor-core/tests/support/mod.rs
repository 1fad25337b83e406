#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use moor_core::registry::{PackageRegistry, RegistryPackage, RegistryResolver};

/// In-memory registry answering from a fixed `(package, version)` list.
#[derive(Default)]
pub struct StaticRegistry {
    published: Vec<(String, String)>,
    calls: Mutex<Vec<String>>,
}

impl StaticRegistry {
    pub fn new(published: &[(&str, &str)]) -> Self {
        Self {
            published: published
                .iter()
                .map(|(p, v)| (p.to_string(), v.to_string()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PackageRegistry for StaticRegistry {
    async fn get(&self, package: &str, version: &str) -> anyhow::Result<Option<RegistryPackage>> {
        self.calls.lock().unwrap().push(format!("{}@{}", package, version));
        Ok(self
            .published
            .iter()
            .find(|(p, v)| p == package && v == version)
            .map(|(p, v)| RegistryPackage {
                name: p.clone(),
                version: v.clone(),
            }))
    }
}

pub fn resolver(published: &[(&str, &str)]) -> RegistryResolver {
    RegistryResolver::new(Arc::new(StaticRegistry::new(published)))
}

/// Create a platform dir with a `package.json` holding `manifest`.
pub fn platform_dir(root: &Path, manifest: &str) -> PathBuf {
    let dir = root.join(".sst").join("platform");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("package.json"), manifest).unwrap();
    dir
}

/// Pretend the package manager installed `package` with the given type token.
pub fn install_artifact(platform_dir: &Path, package: &str, pulumi_type: &str) {
    let mut dir = platform_dir.join("node_modules");
    for segment in package.split('/') {
        dir.push(segment);
    }
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("provider.js"),
        format!(
            "\"use strict\";\nclass Provider extends pulumi.ProviderResource {{}}\nexports.Provider = Provider;\nProvider.__pulumiType = \"{}\";\n",
            pulumi_type
        ),
    )
    .unwrap();
}
