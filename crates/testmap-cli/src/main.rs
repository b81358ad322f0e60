//! testmap - attribute CI test results to owning components
//!
//! ## Commands
//!
//! - `resolve`: show every component match and the arbitrated owner of one test
//! - `map`: map a corpus of tests into a JSON report
//! - `namespaces`: list the namespaces each component owns
//! - `rename`: follow test renames back to the oldest known name

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, Level};

use testmap_core::{
    load_components, map_corpus, ComponentRegistry, MappingError, TestInfo, TestOwnership,
};

#[derive(Parser)]
#[command(name = "testmap")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Attribute CI test results to owning components", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Component configuration file or directory
    #[arg(short, long, global = true, env = "TESTMAP_CONFIG", default_value = "components")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a single test against every component
    Resolve {
        /// Full test name
        name: String,

        /// Suite the test ran in
        #[arg(short, long, default_value = "")]
        suite: String,
    },

    /// Map a corpus of tests (JSON array of {"name", "suite"}) into a report
    Map {
        /// Input corpus file
        #[arg(short, long)]
        tests: PathBuf,

        /// Output report path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of parallel mapping workers
        #[arg(long, default_value = "4")]
        concurrency: usize,
    },

    /// List owned namespaces per component
    Namespaces,

    /// Show the oldest known name of a renamed test
    Rename {
        /// Current test name
        name: String,
    },
}

/// Output of the `resolve` command.
#[derive(Serialize)]
struct ResolveOutput {
    test: TestInfo,
    matches: Vec<TestOwnership>,
    owner: Option<TestOwnership>,
    ambiguous: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    testmap_core::init_tracing(cli.json, level);

    let registry = load_registry(&cli.config)?;

    match cli.command {
        Commands::Resolve { name, suite } => cmd_resolve(&registry, TestInfo::new(name, suite)),
        Commands::Map {
            tests,
            output,
            concurrency,
        } => cmd_map(registry, &tests, output.as_deref(), concurrency).await,
        Commands::Namespaces => print_json(&registry.list_namespaces()),
        Commands::Rename { name } => {
            println!("{}", registry.oldest_name(&name));
            Ok(())
        }
    }
}

fn load_registry(config: &Path) -> Result<ComponentRegistry> {
    let components = load_components(config)
        .with_context(|| format!("Failed to load components from {:?}", config))?;
    ComponentRegistry::new(components).context("Invalid component registry")
}

/// Resolve one test and print every match plus the arbitrated owner.
fn cmd_resolve(registry: &ComponentRegistry, test: TestInfo) -> Result<()> {
    let matches = registry.find_matches(&test);
    let (owner, ambiguous) = match registry.identify(&test) {
        Ok(owner) => (owner, Vec::new()),
        Err(MappingError::AmbiguousOwnership { components, .. }) => (None, components),
        Err(e) => return Err(e.into()),
    };

    print_json(&ResolveOutput {
        test,
        matches,
        owner,
        ambiguous,
    })
}

/// Map a corpus file and write the report.
async fn cmd_map(
    registry: ComponentRegistry,
    tests_path: &Path,
    output: Option<&Path>,
    concurrency: usize,
) -> Result<()> {
    let raw = tokio::fs::read_to_string(tests_path)
        .await
        .with_context(|| format!("Failed to read test corpus {:?}", tests_path))?;
    let tests: Vec<TestInfo> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid test corpus {:?}", tests_path))?;

    info!("Mapping {} tests with {} workers", tests.len(), concurrency);
    let report = map_corpus(Arc::new(registry), tests, concurrency).await?;

    let rendered = serde_json::to_string_pretty(&report)?;
    match output {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("Failed to write report {:?}", path))?;
            info!(
                "Wrote report to {:?}: {} owned, {} unowned, {} ambiguous",
                path, report.summary.owned, report.summary.unowned, report.summary.ambiguous
            );
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
