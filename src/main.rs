//! Job-Scout main entry point
//!
//! This is the command-line interface for Job-Scout. Results are printed as
//! pretty JSON on stdout; logs go to stderr.

use anyhow::Context;
use clap::{Parser, Subcommand};
use job_scout::config::load_config;
use job_scout::{Scout, SearchRequest};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Job-Scout: job listing retrieval through a residential proxy
///
/// Proxy credentials are read from SCOUT_PROXY_SERVER, SCOUT_PROXY_USERNAME
/// and SCOUT_PROXY_PASSWORD (a `.env` file is honoured), or from the
/// `[proxy]` section of the configuration file.
#[derive(Parser, Debug)]
#[command(name = "job-scout")]
#[command(version)]
#[command(about = "Job listing retrieval through a residential proxy", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search a job source
    Search {
        /// Free-text query, e.g. "rust developer"
        query: String,

        /// Location to search in
        #[arg(short, long, default_value = "")]
        location: String,

        /// Maximum number of results (clamped to the configured range)
        #[arg(short = 'n', long)]
        limit: Option<i64>,

        /// Source identifier (see `info`)
        #[arg(short, long)]
        source: Option<String>,
    },

    /// Check that the proxy works and show the exit IP
    TestProxy,

    /// Describe the proxy setup
    ProxyInfo,

    /// Describe the registered sources and limits
    Info,

    /// Run a named operation with JSON arguments
    Invoke {
        /// Operation name, e.g. search_jobs
        operation: String,

        /// Arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => {
            tracing::info!(proxy = ?config.proxy, "Configuration loaded");
            config
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let scout = Scout::new(config).context("failed to initialize the HTTP client")?;

    match cli.command {
        Command::Search {
            query,
            location,
            limit,
            source,
        } => {
            let mut request = SearchRequest::new(query).location(location);
            if let Some(limit) = limit {
                request = request.limit(limit);
            }
            if let Some(source) = source {
                request = request.source(source);
            }
            print_json(&scout.search_jobs(request).await)?;
        }
        Command::TestProxy => print_json(&scout.test_proxy().await)?,
        Command::ProxyInfo => print_json(&scout.proxy_info())?,
        Command::Info => print_json(&scout.scraper_info())?,
        Command::Invoke { operation, args } => {
            let arguments: serde_json::Value =
                serde_json::from_str(&args).context("--args must be a JSON value")?;
            print_json(&scout.invoke(&operation, arguments).await)?;
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("job_scout=info,warn"),
            1 => EnvFilter::new("job_scout=debug,info"),
            2 => EnvFilter::new("job_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
