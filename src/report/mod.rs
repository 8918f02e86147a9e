//! Reporting utilities: summary totals and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::NormalizedStatistics;

/// Headline numbers of the dashboard, computed from the normalized record.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// Sum of all revenue points.
    pub total_revenue: f64,
    /// Sum of all order-trend points.
    pub total_orders: i64,
    /// Sum of all status counts (including zero and unknown statuses).
    pub orders_by_status: i64,
    pub books_sold: i64,
    pub top_sellers_revenue: f64,
    /// Date and amount of the highest revenue point (first one on ties).
    pub best_day: Option<(String, f64)>,
}

/// Compute summary totals.
pub fn summarize(stats: &NormalizedStatistics) -> DashboardSummary {
    let best_day = stats
        .revenue_trend
        .iter()
        .fold(None::<(&str, f64)>, |best, p| match best {
            Some((_, amount)) if amount >= p.amount => best,
            _ => Some((p.date.as_str(), p.amount)),
        })
        .map(|(date, amount)| (date.to_string(), amount));

    DashboardSummary {
        total_revenue: stats.revenue_trend.iter().map(|p| p.amount).sum(),
        total_orders: saturating_sum(stats.order_trend.iter().map(|p| p.count)),
        orders_by_status: saturating_sum(stats.order_status_counts.values().copied()),
        books_sold: saturating_sum(stats.top_selling_books.iter().map(|b| b.quantity)),
        top_sellers_revenue: stats.top_selling_books.iter().map(|b| b.revenue).sum(),
        best_day,
    }
}

/// Sum of counts, pinned at the `i64` bounds instead of overflowing.
pub(crate) fn saturating_sum(values: impl IntoIterator<Item = i64>) -> i64 {
    values.into_iter().fold(0, i64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_value;
    use serde_json::json;

    #[test]
    fn summarize_adds_up_every_section() {
        let stats = normalize_value(json!({
            "revenueTrend": [
                { "date": "2024-03-01", "amount": "1500" },
                { "date": "2024-03-02", "amount": 2500.5 },
                { "date": "2024-03-03", "amount": "2500.5" }
            ],
            "orderStatusCounts": { "PENDING": 5, "CANCELLED": 0, "REFUNDED": "2" },
            "topSellingBooks": [
                { "title": "A", "quantity": 3, "revenue": "300" },
                { "title": "B", "quantity": "4", "revenue": 400 }
            ],
            "orderTrend": [{ "date": "2024-03-01", "count": 2 }, { "date": "2024-03-02", "count": "3" }]
        }))
        .unwrap();

        let summary = summarize(&stats);
        assert_eq!(summary.total_revenue, 6501.0);
        assert_eq!(summary.total_orders, 5);
        assert_eq!(summary.orders_by_status, 7);
        assert_eq!(summary.books_sold, 7);
        assert_eq!(summary.top_sellers_revenue, 700.0);
        assert_eq!(summary.best_day, Some(("2024-03-02".to_string(), 2500.5)));
    }

    #[test]
    fn summarize_empty_record() {
        let summary = summarize(&NormalizedStatistics::default());
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.best_day, None);
    }

    #[test]
    fn clamped_counts_do_not_overflow_totals() {
        let stats = normalize_value(json!({
            "orderStatusCounts": { "PENDING": u64::MAX, "SHIPPED": 1 },
            "topSellingBooks": [{ "quantity": i64::MAX }, { "quantity": 5 }],
            "orderTrend": [{ "count": i64::MIN }, { "count": -1 }]
        }))
        .unwrap();

        let summary = summarize(&stats);
        assert_eq!(summary.orders_by_status, i64::MAX);
        assert_eq!(summary.books_sold, i64::MAX);
        assert_eq!(summary.total_orders, i64::MIN);
    }
}
