//! Shared dashboard pipeline used by every CLI command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> validate -> normalize -> transform -> summarize
//!
//! The commands can then focus on where the payload comes from and how often.

use serde_json::Value;

use crate::data::{QueryCache, STATISTICS_KEY, StatisticsSource};
use crate::domain::{DashboardConfig, NormalizedStatistics, RawStatistics};
use crate::error::{AppError, ParseWarning};
use crate::normalize::{Normalized, normalize_with_warnings};
use crate::report::{DashboardSummary, summarize};
use crate::transform::{ChartSet, RankingOptions, build_charts};

/// All computed outputs of a single dashboard render.
#[derive(Debug, Clone)]
pub struct DashboardRun {
    pub stats: NormalizedStatistics,
    pub warnings: Vec<ParseWarning>,
    pub charts: ChartSet,
    pub summary: DashboardSummary,
}

/// Fetch once from `source` and run the pipeline.
pub fn run_dashboard<S: StatisticsSource>(source: &S, config: &DashboardConfig) -> Result<DashboardRun, AppError> {
    let payload = source.fetch_statistics()?;
    run_dashboard_with_payload(payload, config)
}

/// Run the pipeline on the payload held by `cache`, fetching only when stale.
pub fn run_dashboard_cached<S: StatisticsSource>(
    cache: &QueryCache<S>,
    config: &DashboardConfig,
) -> Result<DashboardRun, AppError> {
    let payload = cache.get(STATISTICS_KEY)?;
    run_dashboard_with_payload(payload, config)
}

/// Run the pipeline on an already fetched payload.
pub fn run_dashboard_with_payload(payload: Value, config: &DashboardConfig) -> Result<DashboardRun, AppError> {
    let raw = RawStatistics::from_value(payload)?;
    let Normalized { stats, warnings } = normalize_with_warnings(&raw)?;
    for w in &warnings {
        tracing::warn!(field = %w.field, raw = %w.raw, "{}", w.reason);
    }

    let ranking = RankingOptions {
        limit: config.top_n,
        title_max_chars: config.title_max_chars,
    };
    let charts = build_charts(&stats, &config.status_labels, ranking);
    let summary = summarize(&stats);

    Ok(DashboardRun {
        stats,
        warnings,
        charts,
        summary,
    })
}
