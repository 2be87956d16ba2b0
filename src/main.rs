//! Shelf-Press main entry point
//!
//! This is the command-line interface for the Shelf-Press bookshelf crawler.

use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_press::config::{load_config_with_hash, validate, Config};
use shelf_press::crawler::crawl;
use shelf_press::leagues::convert_path;
use shelf_press::output::{rebuild_index, FsLibrary};
use shelf_press::storage::{open_state_store, StateStore};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shelf-Press: a resumable bookshelf crawler
///
/// Each run fetches a few books from a paginated catalog, saves their plain
/// text, renders a styled HTML page per book and refreshes the site index.
/// Progress is checkpointed so the next run picks up where this one stopped.
#[derive(Parser, Debug)]
#[command(name = "shelf-press")]
#[command(version = "1.0.0")]
#[command(about = "A resumable bookshelf crawler and static library builder", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the next few books (default)
    Crawl {
        /// Start again from the first listing page, ignoring the checkpoint
        #[arg(long)]
        fresh: bool,
    },

    /// Rebuild the site index from the rendered pages and exit
    Index,

    /// Show the checkpoint and exit
    Status,

    /// Convert CSV/TSV player profiles into per-league JSON documents
    Leagues {
        /// Input file, or a directory of .csv/.txt files
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory receiving the league documents
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load(cli.config.as_ref())?;

    let result = match cli.command.unwrap_or(Command::Crawl { fresh: false }) {
        Command::Crawl { fresh } => handle_crawl(&config, config_hash.as_deref(), fresh).await,
        Command::Index => handle_index(&config),
        Command::Status => handle_status(&config),
        Command::Leagues { input, output_dir } => handle_leagues(&config, input, output_dir),
    };

    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    result
}

/// Loads the configuration file, or validated defaults when none is given
fn load(path: Option<&PathBuf>) -> anyhow::Result<(Config, Option<String>)> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::debug!("Configuration loaded (hash: {})", hash);
            Ok((config, Some(hash)))
        }
        None => {
            let config = Config::default();
            validate(&config).context("built-in defaults are invalid")?;
            Ok((config, None))
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelf_press=info,warn"),
            1 => EnvFilter::new("shelf_press=debug,info"),
            2 => EnvFilter::new("shelf_press=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the crawl command
async fn handle_crawl(config: &Config, config_hash: Option<&str>, fresh: bool) -> anyhow::Result<()> {
    if fresh {
        tracing::info!("Starting fresh crawl (ignoring previous state)");
    }

    let report = crawl(config, config_hash, fresh)
        .await
        .context("crawl failed; progress from this run was not checkpointed")?;

    if report.idle {
        println!("Bookshelf already fully crawled. Use --fresh to start over.");
    } else {
        println!(
            "Rendered {} book(s){}",
            report.rendered.len(),
            if report.finished { "; bookshelf complete" } else { "" }
        );
        for slug in &report.rendered {
            println!("  - {}.html", slug);
        }
    }

    Ok(())
}

/// Handles the index command
fn handle_index(config: &Config) -> anyhow::Result<()> {
    let mut library = FsLibrary::open(&config.output).context("failed to open output directories")?;
    let count = rebuild_index(&mut library, &config.site).context("failed to rebuild index")?;

    println!(
        "✓ Index {} lists {} book(s)",
        config.output.index_path.display(),
        count
    );
    Ok(())
}

/// Handles the status command
fn handle_status(config: &Config) -> anyhow::Result<()> {
    let store = open_state_store(config);
    let state = store
        .load()
        .with_context(|| format!("failed to read {}", store.path().display()))?;

    println!("=== Shelf-Press Status ===\n");
    println!("Checkpoint: {}", store.path().display());
    println!("  Current page: {}", state.current_page_url);
    println!("  Next item: {}", state.page_index);
    println!("  Finished: {}", if state.finished { "yes" } else { "no" });
    if let Some(updated) = state.updated_at {
        println!("  Last run: {}", updated.to_rfc3339());
    }

    Ok(())
}

/// Handles the leagues command
fn handle_leagues(config: &Config, input: PathBuf, output_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let output_dir = output_dir.unwrap_or_else(|| config.leagues.output_dir.clone());

    let summaries = convert_path(&input, &output_dir, &config.leagues)
        .with_context(|| format!("failed to convert {}", input.display()))?;

    for summary in &summaries {
        println!(
            "✓ {} → {} players saved to {}",
            summary.league,
            summary.players,
            summary.output.display()
        );
    }
    println!("All leagues processed ({} file(s))", summaries.len());

    Ok(())
}
