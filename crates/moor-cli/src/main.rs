//! Moor - provider install orchestration
//!
//! Usage:
//!   moor install      # Resolve and install declared providers
//!   moor status       # Compare moor.toml with the provider lock
//!   moor list         # Show the provider lock

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moor_core::config::ConfigStore;
use moor_core::lockfile::ProviderLock;
use moor_core::project::Project;
use moor_core::status::{ProviderState, StatusReport};

/// Non-empty value selects the fallback installer.
const NO_BUN_ENV: &str = "NO_BUN";

#[derive(Parser)]
#[command(name = "moor")]
#[command(about = "Provider lock resolution and install orchestration", long_about = None)]
struct Cli {
    /// Project root containing moor.toml (defaults to the current directory)
    #[arg(long, short = 'C', global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve declared providers and install them
    Install {
        /// Reinstall even when the lock matches moor.toml
        #[arg(long, short)]
        force: bool,
    },

    /// Show whether the provider lock matches moor.toml
    Status {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List locked providers
    #[command(alias = "ls")]
    List,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
    /// Only show issues (non-zero exit if an install is needed)
    Quiet,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moor=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let store = match cli.project {
        Some(root) => ConfigStore::from_project_root(root),
        None => ConfigStore::from_current_dir()?,
    };

    match cli.command {
        Commands::Install { force } => run_install(&store, force).await,
        Commands::Status { format } => run_status(&store, format),
        Commands::List => run_list(&store),
    }
}

fn use_fallback_installer() -> bool {
    std::env::var_os(NO_BUN_ENV).is_some_and(|v| !v.is_empty())
}

fn open_project(store: &ConfigStore) -> Result<Project> {
    let config = store.load()?;
    Project::from_config(store, &config, use_fallback_installer()).with_context(|| {
        format!(
            "Failed to open platform directory for {}",
            store.project_root().display()
        )
    })
}

async fn run_install(store: &ConfigStore, force: bool) -> Result<()> {
    let mut project = open_project(store)?;

    if !force && !project.needs_install() {
        println!("Providers up to date ({} locked)", project.lock().len());
        return Ok(());
    }

    project.install().await?;

    println!(
        "{} Installed {} provider(s) with {}",
        style("✓").green(),
        project.lock().len(),
        project.installer().selected()
    );
    print_lock(project.lock());
    Ok(())
}

fn run_status(store: &ConfigStore, format: OutputFormat) -> Result<()> {
    let project = open_project(store)?;
    let report = project.status();

    match format {
        OutputFormat::Table => print_table(&report),
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Quiet => {
            let exit_code = print_quiet(&report);
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn run_list(store: &ConfigStore) -> Result<()> {
    let project = open_project(store)?;

    if project.lock().is_empty() {
        println!("No providers locked.");
        println!("Run 'moor install' to resolve the providers in moor.toml.");
        return Ok(());
    }

    println!("Lock: {}", project.lock_path().display());
    print_lock(project.lock());
    Ok(())
}

// =============================================================================
// Output
// =============================================================================

fn print_lock(lock: &ProviderLock) {
    println!(
        "  {:<20} {:<30} {:<12} Alias",
        "Name", "Package", "Version"
    );
    println!("  {}", "-".repeat(72));

    for entry in lock {
        let alias = if entry.alias.is_empty() {
            "-"
        } else {
            entry.alias.as_str()
        };
        println!(
            "  {:<20} {:<30} {:<12} {}",
            truncate(&entry.name, 20),
            truncate(&entry.package, 30),
            truncate(&entry.version, 12),
            alias
        );
    }
}

fn print_table(report: &StatusReport) {
    println!("Platform: {}", report.platform_dir.display());
    println!();

    if report.providers.is_empty() {
        println!("No providers declared.");
        println!("Add a [providers] table to moor.toml to get started.");
        return;
    }

    println!("Providers ({}):", report.providers.len());
    println!(
        "  {:<20} {:<12} {:<12} {:<30} Status",
        "Name", "Declared", "Locked", "Package"
    );
    println!("  {}", "-".repeat(84));

    for provider in &report.providers {
        println!(
            "  {:<20} {:<12} {:<12} {:<30} {}",
            truncate(&provider.name, 20),
            truncate(provider.declared_version.as_deref().unwrap_or("-"), 12),
            truncate(provider.locked_version.as_deref().unwrap_or("-"), 12),
            truncate(provider.package.as_deref().unwrap_or("-"), 30),
            state_symbol(provider.state)
        );
    }
    println!();

    if report.needs_install {
        println!(
            "Summary: {} issues (run 'moor install' to resolve)",
            report.issues()
        );
    } else {
        println!("Summary: {} providers, all OK", report.providers.len());
    }
}

fn print_json(report: &StatusReport) -> Result<()> {
    let output = serde_json::json!({
        "schema_version": 1,
        "platform_dir": report.platform_dir,
        "needs_install": report.needs_install,
        "providers": report.providers,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_quiet(report: &StatusReport) -> i32 {
    if report.needs_install {
        println!("{} issues found", report.issues());
        1
    } else {
        0
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn state_symbol(state: ProviderState) -> String {
    match state {
        ProviderState::Ok => style("OK").green().to_string(),
        ProviderState::Outdated => style("Outdated").yellow().to_string(),
        ProviderState::Missing => style("Missing").red().to_string(),
        ProviderState::Orphaned => style("Orphaned").dim().to_string(),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
