//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and installs logging
//! - picks the payload source (backend, file, cached backend)
//! - runs the dashboard pipeline
//! - prints the dashboard and writes optional exports

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::{Command, InspectArgs, ReportArgs, WatchArgs};
use crate::data::{HttpStatisticsSource, QueryCache, StaticSource};
use crate::domain::{DashboardConfig, StatusLabels};
use crate::error::{AppError, EXIT_FETCH};

pub mod pipeline;

use pipeline::DashboardRun;

/// Entry point for the `bookstats` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Show(args) => handle_show(args),
        Command::Inspect(args) => handle_inspect(args),
        Command::Watch(args) => handle_watch(args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A second init (e.g. from tests) is harmless; keep the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn handle_show(args: ReportArgs) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args);
    let source = HttpStatisticsSource::from_env()?;
    let run = pipeline::run_dashboard(&source, &config)?;
    emit(&run, &config)
}

fn handle_inspect(args: InspectArgs) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args.report);
    let payload = crate::io::read_payload_json(&args.payload)?;
    let run = pipeline::run_dashboard(&StaticSource::new(payload), &config)?;
    emit(&run, &config)
}

fn handle_watch(args: WatchArgs) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args.report);
    let cache = QueryCache::new(HttpStatisticsSource::from_env()?, config.freshness);
    let interval = Duration::from_secs(args.interval);
    tracing::debug!(
        interval_secs = args.interval,
        stale_secs = cache.freshness().as_secs(),
        "watching dashboard statistics"
    );

    let mut rendered = 0u64;
    loop {
        match pipeline::run_dashboard_cached(&cache, &config) {
            Ok(run) => emit(&run, &config)?,
            // A failed fetch is reported and left to the next tick.
            Err(err) if err.exit_code() == EXIT_FETCH => {
                tracing::error!(error = %err, "statistics fetch failed");
            }
            Err(err) => return Err(err),
        }

        rendered += 1;
        if args.iterations.is_some_and(|n| rendered >= n) {
            return Ok(());
        }
        std::thread::sleep(interval);
    }
}

/// Print the dashboard and write any requested exports.
fn emit(run: &DashboardRun, config: &DashboardConfig) -> Result<(), AppError> {
    println!(
        "{}",
        crate::report::format_dashboard(&run.summary, &run.charts, &run.warnings, config)
    );

    if let Some(path) = &config.export_json {
        crate::io::write_charts_json(path, &run.charts)?;
    }
    if let Some(path) = &config.export_csv {
        crate::io::write_ranking_csv(path, &run.charts.top_books)?;
    }

    Ok(())
}

pub fn dashboard_config_from_args(args: &ReportArgs) -> DashboardConfig {
    DashboardConfig {
        top_n: args.top,
        title_max_chars: args.title_max,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_json: args.export_json.clone(),
        export_csv: args.export_csv.clone(),
        status_labels: if args.raw_status {
            StatusLabels::empty()
        } else {
            StatusLabels::default()
        },
        freshness: Duration::from_secs(args.stale_secs),
    }
}
