//! Formatted terminal output for the dashboard.
//!
//! We keep formatting code in one place so:
//! - the normalization/transform code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{BookRankEntry, DashboardConfig, OrderTrendPoint, RevenuePoint, StatusSlice};
use crate::error::ParseWarning;
use crate::report::DashboardSummary;
use crate::transform::{ChartSet, percentage, slice_total};

/// Format the headline numbers.
pub fn format_summary(summary: &DashboardSummary, warnings: &[ParseWarning]) -> String {
    let mut out = String::new();

    out.push_str("=== Bookstore dashboard ===\n");
    out.push_str(&format!("Revenue: {}\n", fmt_money(summary.total_revenue)));
    out.push_str(&format!("Orders: {}\n", fmt_count(summary.total_orders)));
    out.push_str(&format!("Orders by status: {}\n", fmt_count(summary.orders_by_status)));
    out.push_str(&format!(
        "Top sellers: {} books | {}\n",
        fmt_count(summary.books_sold),
        fmt_money(summary.top_sellers_revenue)
    ));
    if let Some((date, amount)) = &summary.best_day {
        out.push_str(&format!("Best day: {date} ({})\n", fmt_money(*amount)));
    }
    if !warnings.is_empty() {
        out.push_str(&format!("Payload warnings: {} field(s) defaulted\n", warnings.len()));
    }

    out
}

/// Format the status distribution with render-time percentages.
pub fn format_status_table(slices: &[StatusSlice]) -> String {
    let total = slice_total(slices);
    let mut out = String::new();
    out.push_str(&format!("{:<18} {:<16} {:>8} {:>7}\n", "status", "label", "orders", "share"));
    out.push_str(&format!("{:-<18} {:-<16} {:-<8} {:-<7}\n", "", "", "", ""));
    for s in slices {
        out.push_str(&format!(
            "{:<18} {} {:>8} {:>6.1}%\n",
            s.original_status,
            pad_right(&s.label, 16),
            fmt_count(s.value),
            percentage(s.value, total)
        ));
    }
    out
}

/// Format the book ranking.
pub fn format_ranking(entries: &[BookRankEntry]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>3} {:<43} {:>8}\n", "#", "title", "quantity"));
    out.push_str(&format!("{:-<3} {:-<43} {:-<8}\n", "", "", ""));
    for (idx, e) in entries.iter().enumerate() {
        out.push_str(&format!(
            "{:>3} {} {:>8}\n",
            idx + 1,
            pad_right(&e.title, 43),
            fmt_count(e.quantity)
        ));
    }
    out
}

pub fn format_revenue_table(points: &[RevenuePoint]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<12} {:>18}\n", "date", "revenue"));
    for p in points {
        out.push_str(&format!("{:<12} {:>18}\n", display_date(&p.date), fmt_money(p.amount)));
    }
    out
}

pub fn format_orders_table(points: &[OrderTrendPoint]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<12} {:>8}\n", "date", "orders"));
    for p in points {
        out.push_str(&format!("{:<12} {:>8}\n", display_date(&p.date), fmt_count(p.count)));
    }
    out
}

/// Format the whole dashboard: summary, tables and (optionally) charts.
pub fn format_dashboard(
    summary: &DashboardSummary,
    charts: &ChartSet,
    warnings: &[ParseWarning],
    config: &DashboardConfig,
) -> String {
    let mut out = format_summary(summary, warnings);

    out.push_str("\nOrders by status:\n");
    out.push_str(&format_status_table(&charts.statuses));

    out.push_str("\nTop selling books:\n");
    out.push_str(&format_ranking(&charts.top_books));

    if config.plot {
        out.push('\n');
        out.push_str(&crate::plot::render_revenue_plot(&charts.revenue, config.plot_width, config.plot_height));
        out.push('\n');
        out.push_str(&crate::plot::render_orders_plot(&charts.orders, config.plot_width, config.plot_height));
        out.push('\n');
        out.push_str(&crate::plot::render_status_bars(&charts.statuses, config.plot_width));
        out.push('\n');
        out.push_str(&crate::plot::render_ranking_bars(&charts.top_books, config.plot_width));
    } else {
        out.push_str("\nRevenue by date:\n");
        out.push_str(&format_revenue_table(&charts.revenue));
        out.push_str("\nOrders by date:\n");
        out.push_str(&format_orders_table(&charts.orders));
    }

    out
}

/// Format an amount in VND: rounded to whole dong, `.` thousands separators.
pub fn fmt_money(amount: f64) -> String {
    format!("{} ₫", fmt_count(amount.round() as i64))
}

/// Group an integer's digits in threes with `.`.
pub fn fmt_count(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if n < 0 {
        grouped.push('-');
    }
    grouped.chars().rev().collect()
}

fn display_date(date: &str) -> &str {
    if date.is_empty() { "?" } else { date }
}

/// Left-align to `width` characters, cutting longer strings.
fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.chars().take(width).collect();
    }
    format!("{s}{}", " ".repeat(width - len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_grouped_in_threes() {
        assert_eq!(fmt_count(0), "0");
        assert_eq!(fmt_count(999), "999");
        assert_eq!(fmt_count(1000), "1.000");
        assert_eq!(fmt_count(1234567), "1.234.567");
        assert_eq!(fmt_count(-45000), "-45.000");
    }

    #[test]
    fn money_is_rounded_to_whole_dong() {
        assert_eq!(fmt_money(1500.0), "1.500 ₫");
        assert_eq!(fmt_money(450000.5), "450.001 ₫");
        assert_eq!(fmt_money(0.0), "0 ₫");
    }

    #[test]
    fn status_table_includes_share_column() {
        let slices = vec![
            StatusSlice {
                label: "Chờ xử lý".to_string(),
                value: 1,
                original_status: "PENDING".to_string(),
            },
            StatusSlice {
                label: "REFUNDED".to_string(),
                value: 2,
                original_status: "REFUNDED".to_string(),
            },
        ];
        let txt = format_status_table(&slices);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("PENDING"));
        assert!(lines[2].ends_with("33.3%"));
        assert!(lines[3].ends_with("66.7%"));
    }

    #[test]
    fn ranking_rows_are_numbered() {
        let entries = vec![
            BookRankEntry { title: "Số đỏ".to_string(), quantity: 1200 },
            BookRankEntry { title: "Tắt đèn".to_string(), quantity: 7 },
        ];
        let txt = format_ranking(&entries);
        let lines: Vec<&str> = txt.lines().collect();
        assert!(lines[2].starts_with("  1 Số đỏ"));
        assert!(lines[2].ends_with("1.200"));
        assert!(lines[3].starts_with("  2 Tắt đèn"));
    }

    #[test]
    fn dashboard_without_plot_lists_series_as_tables() {
        let summary = DashboardSummary {
            total_revenue: 1700.0,
            total_orders: 3,
            orders_by_status: 3,
            books_sold: 0,
            top_sellers_revenue: 0.0,
            best_day: Some(("2024-03-05".to_string(), 1500.0)),
        };
        let charts = ChartSet {
            revenue: vec![
                RevenuePoint { date: "2024-03-01".to_string(), amount: 200.0 },
                RevenuePoint { date: "2024-03-05".to_string(), amount: 1500.0 },
            ],
            orders: vec![OrderTrendPoint { date: String::new(), count: 3 }],
            statuses: Vec::new(),
            top_books: Vec::new(),
        };
        let config = DashboardConfig {
            plot: false,
            ..DashboardConfig::default()
        };

        let txt = format_dashboard(&summary, &charts, &[], &config);
        assert!(txt.contains("Revenue: 1.700 ₫"));
        assert!(txt.contains("Best day: 2024-03-05 (1.500 ₫)"));
        assert!(txt.contains("Revenue by date:\n"));
        assert!(txt.contains("?                   3"));
        assert!(!txt.contains("Payload warnings"));
    }
}
