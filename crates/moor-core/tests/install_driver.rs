//! Install driver tests against real child processes.

#![cfg(unix)]

mod support;

use tempfile::TempDir;

use moor_core::error::InstallError;
use moor_core::install::{InstallDriver, InstallerConfig};
use moor_core::lockfile::{LockEntry, ProviderLock};

/// `sh install` runs the `install` script in the platform directory, which
/// stands in for the package manager.
fn sh_driver(dir: &std::path::Path, script: &str) -> InstallDriver {
    std::fs::write(dir.join("install"), script).unwrap();
    InstallDriver::new(dir.to_path_buf(), InstallerConfig::program("sh"))
}

#[tokio::test]
async fn installer_runs_in_platform_dir() {
    let temp = TempDir::new().unwrap();
    let dir = support::platform_dir(temp.path(), r#"{"dependencies":{}}"#);
    let driver = sh_driver(&dir, "touch installed.marker\n");

    driver.run_installer().await.unwrap();

    assert!(dir.join("installed.marker").exists());
}

#[tokio::test]
async fn failed_installer_reports_combined_output() {
    let temp = TempDir::new().unwrap();
    let dir = support::platform_dir(temp.path(), r#"{"dependencies":{}}"#);
    let driver = sh_driver(
        &dir,
        "echo 'resolving packages'\necho 'error: 404 @pulumi/nope' >&2\nexit 1\n",
    );

    let err = driver.run_installer().await.unwrap_err();

    match err {
        InstallError::InstallFailed { installer, output } => {
            assert_eq!(installer, "sh");
            assert!(output.contains("resolving packages"));
            assert!(output.contains("error: 404 @pulumi/nope"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn failed_installer_message_includes_output() {
    let temp = TempDir::new().unwrap();
    let dir = support::platform_dir(temp.path(), r#"{"dependencies":{}}"#);
    let driver = sh_driver(&dir, "echo 'lockfile is frozen'\nexit 2\n");

    let err = driver.run_installer().await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "failed to run sh install\nlockfile is frozen\n"
    );
}

#[tokio::test]
async fn missing_installer_program_is_install_failed() {
    let temp = TempDir::new().unwrap();
    let dir = support::platform_dir(temp.path(), r#"{"dependencies":{}}"#);
    let driver = InstallDriver::new(
        dir,
        InstallerConfig::program("moor-test-no-such-package-manager"),
    );

    let err = driver.run_installer().await.unwrap_err();

    assert!(matches!(err, InstallError::InstallFailed { .. }));
}

#[tokio::test]
async fn fetch_fills_aliases_after_installer_exits() {
    let temp = TempDir::new().unwrap();
    let dir = support::platform_dir(temp.path(), r#"{"dependencies":{}}"#);
    // The artifact only exists once the installer has run.
    let driver = sh_driver(
        &dir,
        "mkdir -p node_modules/@pulumi/aws-native\n\
         printf 'Provider.__pulumiType = \"aws-native\";\\n' > node_modules/@pulumi/aws-native/provider.js\n",
    );
    let mut lock = ProviderLock::from_entries(vec![LockEntry::new(
        "aws-native",
        "@pulumi/aws-native",
        "latest",
    )]);

    driver.fetch(&mut lock).await.unwrap();

    let entry = &lock.entries()[0];
    assert_eq!(entry.alias, "awsnative");
    assert_eq!(entry.name, "aws-native");
    assert_eq!(entry.package, "@pulumi/aws-native");
    assert_eq!(entry.version, "latest");
}

#[tokio::test]
async fn fetch_stops_at_first_missing_alias() {
    let temp = TempDir::new().unwrap();
    let dir = support::platform_dir(temp.path(), r#"{"dependencies":{}}"#);
    support::install_artifact(&dir, "@pulumi/aws", "aws");
    let driver = InstallDriver::new(dir, InstallerConfig::program("true"));
    let mut lock = ProviderLock::from_entries(vec![
        LockEntry::new("aws", "@pulumi/aws", "latest"),
        LockEntry::new("tls", "@pulumi/tls", "latest"),
    ]);

    let err = driver.fetch(&mut lock).await.unwrap_err();

    assert!(matches!(err, InstallError::AliasNotFound { ref package } if package == "@pulumi/tls"));
}
