//! Command-line parsing for the bookstore statistics dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the normalization/transform code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bookstats", version, about = "Bookstore admin dashboard statistics")]
pub struct Cli {
    /// Log pipeline stages and cache activity to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch statistics from the backend and print the dashboard.
    Show(ReportArgs),
    /// Print the dashboard for a statistics payload saved as JSON.
    Inspect(InspectArgs),
    /// Re-render the dashboard periodically, refetching once the cached payload is stale.
    Watch(WatchArgs),
}

/// Options shared by every command that renders a dashboard.
#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    /// Number of books in the ranking.
    #[arg(long, default_value_t = crate::transform::TOP_BOOKS_LIMIT)]
    pub top: usize,

    /// Characters of a book title shown before it is cut.
    #[arg(long, default_value_t = crate::transform::TITLE_MAX_CHARS)]
    pub title_max: usize,

    /// Show raw status codes instead of display labels.
    #[arg(long)]
    pub raw_status: bool,

    /// Disable the terminal charts (series are printed as tables instead).
    #[arg(long)]
    pub no_plot: bool,

    /// Chart width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 12)]
    pub height: usize,

    /// Export every chart's data to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,

    /// Export the book ranking to CSV.
    #[arg(long = "export-csv")]
    pub export_csv: Option<PathBuf>,

    /// Seconds a fetched payload stays fresh.
    #[arg(long, default_value_t = 300)]
    pub stale_secs: u64,
}

/// Options for rendering a saved payload.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Statistics payload JSON, as returned by the admin API.
    #[arg(long, value_name = "JSON")]
    pub payload: PathBuf,

    #[command(flatten)]
    pub report: ReportArgs,
}

/// Options for periodic rendering.
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between renders.
    #[arg(long, default_value_t = 60)]
    pub interval: u64,

    /// Stop after this many renders (runs until interrupted when omitted).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub iterations: Option<u64>,

    #[command(flatten)]
    pub report: ReportArgs,
}
