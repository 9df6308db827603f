//! Tidings main entry point
//!
//! This is the command-line interface for the Tidings news harvester.

use clap::Parser;
use std::path::PathBuf;
use tidings::config::load_config_with_hash;
use tracing_subscriber::EnvFilter;

/// Tidings: a social-feed news harvester
///
/// Tidings walks a social platform's paginated search feed, fetches the
/// outbound links it finds, and writes one JSON article record per line to
/// stdout for every page that looks like genuine news content. Logs go to
/// stderr. The walk has no natural end; stop it with --limit or a signal.
#[derive(Parser, Debug)]
#[command(name = "tidings")]
#[command(version = "0.1.0")]
#[command(about = "A social-feed news harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without fetching
    #[arg(long)]
    dry_run: bool,

    /// Stop after emitting this many article records
    #[arg(long, value_name = "N")]
    limit: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_harvest(config, cli.limit).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs are written to stderr; stdout is reserved for article records.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tidings=info,warn"),
            1 => EnvFilter::new("tidings=debug,info"),
            2 => EnvFilter::new("tidings=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &tidings::Config) {
    println!("=== Tidings Dry Run ===\n");

    println!("Search:");
    println!("  Query: ({})", config.search.keywords.join(" OR "));

    println!("\nPlatform:");
    println!("  Base URL: {}", config.platform.base_url);
    println!("  Own domain: {}", config.platform.domain);

    println!("\nFetch:");
    println!("  Queue capacity: {}", config.fetch.queue_capacity);
    println!("  Fetch workers: {}", config.fetch.fetch_workers);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.name);
    println!("  Version: {}", config.user_agent.version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would walk the feed for {} keywords",
        config.search.keywords.len()
    );
}

/// Handles the main harvest operation
async fn handle_harvest(config: tidings::Config, limit: Option<u64>) -> anyhow::Result<()> {
    tracing::info!("Searching for: ({})", config.search.keywords.join(" OR "));

    let mut stream = tidings::harvest(config)?;
    let mut emitted: u64 = 0;

    while let Some(result) = stream.next().await {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::error!("Harvest failed: {}", e);
                return Err(e.into());
            }
        };

        tracing::info!("Article found: {} ({})", record.title, record.source_url);
        println!("{}", serde_json::to_string(&record)?);

        emitted += 1;
        if let Some(max) = limit {
            if emitted >= max {
                tracing::info!("Reached limit of {} records, stopping", max);
                break;
            }
        }
    }

    tracing::info!("Harvest ended after {} records", emitted);
    Ok(())
}
