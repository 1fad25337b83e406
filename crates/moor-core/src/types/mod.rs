//! Shared domain types.

/// Version selector used when a provider declares none.
pub const LATEST: &str = "latest";

/// A declared provider: logical name plus optional version selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    pub name: String,
    pub version_selector: Option<String>,
}

impl ProviderSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_selector: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version_selector = Some(version.into());
        self
    }

    /// The selector used for resolution and lock comparison.
    ///
    /// Absent and empty selectors both collapse to [`LATEST`].
    pub fn effective_version(&self) -> &str {
        normalize_version(self.version_selector.as_deref())
    }
}

/// Collapse an absent or empty selector to [`LATEST`].
pub fn normalize_version(selector: Option<&str>) -> &str {
    match selector {
        Some(v) if !v.is_empty() => v,
        _ => LATEST,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_selector_is_latest() {
        assert_eq!(ProviderSpec::new("aws").effective_version(), "latest");
    }

    #[test]
    fn test_empty_selector_is_latest() {
        let spec = ProviderSpec::new("aws").with_version("");
        assert_eq!(spec.effective_version(), "latest");
    }

    #[test]
    fn test_explicit_selector_kept() {
        let spec = ProviderSpec::new("aws").with_version("6.1.0");
        assert_eq!(spec.effective_version(), "6.1.0");
    }
}
