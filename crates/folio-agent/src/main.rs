//! Folio: weekly economics reading list.
//! Entry point for the `folio` binary.
//!
//! ```bash
//! folio ingest exports/2026-10-18.yaml
//! folio picks --dry-run
//! folio picks
//! folio backlog
//! ```

mod commands;
mod config;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::commands::picks::PicksArgs;

/// Weekly reading-list curation over a backlog of economics papers
#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file (default: $FOLIO_CONFIG or ./folio.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a JSON or YAML metadata export into the paper store
    Ingest {
        /// Export file (.json, .yaml or .yml)
        file: PathBuf,
    },

    /// Select this week's papers and write the reading list
    Picks {
        /// Plan and print the reading list without changing the store
        #[arg(long)]
        dry_run: bool,

        /// First day of the reading week (default: tomorrow)
        #[arg(long, value_name = "YYYY-MM-DD")]
        week_of: Option<NaiveDate>,

        /// Output directory (default: output.weekly_picks_dir)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },

    /// Show the candidate pool and what the next run would pick
    Backlog,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("folio=debug,info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Folio {}", env!("CARGO_PKG_VERSION"));

    let (config, source) = config::load(cli.config.as_deref())?;
    info!(source = ?source, db = %config.database.path.display(), "Configuration loaded");

    let now = Utc::now();
    match cli.command {
        Commands::Ingest { file } => {
            let summary = commands::ingest::run(&config, &file)?;
            commands::ingest::print(&summary, cli.json)?;
        }
        Commands::Picks { dry_run, week_of, out_dir } => {
            let args = PicksArgs { dry_run, week_of, out_dir };
            let outcome = commands::picks::run(&config, &args, now)?;
            commands::picks::print(&outcome, cli.json)?;
        }
        Commands::Backlog => {
            let preview = commands::backlog::run(&config, now)?;
            commands::backlog::print(&preview, cli.json)?;
        }
    }

    Ok(())
}
