//! Chart data transforms.
//!
//! Four independent, stateless transforms over a [`NormalizedStatistics`]
//! record. Each allocates a fresh output and never mutates its input.

pub mod ranking;
pub mod status;
pub mod time_series;

use serde::{Deserialize, Serialize};

use crate::domain::{BookRankEntry, NormalizedStatistics, OrderTrendPoint, RevenuePoint, StatusLabels, StatusSlice};

pub use ranking::*;
pub use status::*;
pub use time_series::*;

/// Every chart of the dashboard, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSet {
    pub revenue: Vec<RevenuePoint>,
    pub orders: Vec<OrderTrendPoint>,
    pub statuses: Vec<StatusSlice>,
    pub top_books: Vec<BookRankEntry>,
}

/// Run all four transforms.
pub fn build_charts(stats: &NormalizedStatistics, labels: &StatusLabels, ranking: RankingOptions) -> ChartSet {
    ChartSet {
        revenue: to_time_series(&stats.revenue_trend),
        orders: to_time_series(&stats.order_trend),
        statuses: to_status_slices(&stats.order_status_counts, labels),
        top_books: to_ranking_with(&stats.top_selling_books, ranking),
    }
}
