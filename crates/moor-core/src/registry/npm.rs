//! npm registry client.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use super::{PackageRegistry, RegistryPackage};

/// Public npm registry.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org/";

/// Registry client issuing `GET {base}/{package}/{version}`.
#[derive(Debug, Clone)]
pub struct NpmRegistry {
    base: Url,
    client: reqwest::Client,
}

impl NpmRegistry {
    pub fn new(base: &str) -> anyhow::Result<Self> {
        // A base without a trailing slash would have its last segment
        // replaced by Url::join.
        let base = if base.ends_with('/') {
            Url::parse(base)
        } else {
            Url::parse(&format!("{}/", base))
        }
        .with_context(|| format!("Invalid registry URL: {}", base))?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("moor/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { base, client })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Build the version document URL for a package.
    ///
    /// Scoped names keep their `@` but escape the slash, as npm expects.
    pub fn package_url(&self, package: &str, version: &str) -> anyhow::Result<Url> {
        let escaped = package.replace('/', "%2f");
        self.base
            .join(&format!("{}/{}", escaped, version))
            .with_context(|| format!("Invalid package reference: {}@{}", package, version))
    }
}

#[async_trait]
impl PackageRegistry for NpmRegistry {
    async fn get(&self, package: &str, version: &str) -> anyhow::Result<Option<RegistryPackage>> {
        let url = self.package_url(package, version)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to query registry: {}", url))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if !status.is_success() => {
                anyhow::bail!("Registry returned HTTP {} for {}", status, url)
            }
            _ => {
                let package = response
                    .json::<RegistryPackage>()
                    .await
                    .with_context(|| format!("Failed to parse registry response from {}", url))?;
                Ok(Some(package))
            }
        }
    }
}
