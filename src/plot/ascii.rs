//! ASCII/Unicode charts for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Chart kinds:
//! - time series: `o` per point, `-` connecting line, x axis = point index
//! - bars: one `#` row per entry, scaled to the largest value

use crate::domain::{BookRankEntry, OrderTrendPoint, RevenuePoint, StatusSlice};
use crate::transform::{percentage, slice_total};

/// Render the revenue series as a line chart.
pub fn render_revenue_plot(points: &[RevenuePoint], width: usize, height: usize) -> String {
    let series: Vec<(&str, f64)> = points.iter().map(|p| (p.date.as_str(), p.amount)).collect();
    render_line_chart("Revenue", &series, width, height)
}

/// Render the order-count series as a line chart.
pub fn render_orders_plot(points: &[OrderTrendPoint], width: usize, height: usize) -> String {
    let series: Vec<(&str, f64)> = points.iter().map(|p| (p.date.as_str(), p.count as f64)).collect();
    render_line_chart("Orders", &series, width, height)
}

/// Render the book ranking as horizontal bars.
pub fn render_ranking_bars(entries: &[BookRankEntry], width: usize) -> String {
    let rows: Vec<(String, f64, String)> = entries
        .iter()
        .map(|e| (e.title.clone(), e.quantity as f64, e.quantity.to_string()))
        .collect();
    render_bars("Top books (quantity)", &rows, width)
}

/// Render status slices as horizontal bars annotated with their share.
pub fn render_status_bars(slices: &[StatusSlice], width: usize) -> String {
    let total = slice_total(slices);
    let rows: Vec<(String, f64, String)> = slices
        .iter()
        .map(|s| {
            (
                s.label.clone(),
                s.value as f64,
                format!("{} ({:.1}%)", s.value, percentage(s.value, total)),
            )
        })
        .collect();
    render_bars("Orders by status", &rows, width)
}

fn render_line_chart(title: &str, series: &[(&str, f64)], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return format!("{title}: no data\n");
    };

    let (y_min, y_max) = y_range(series).unwrap_or((first.1 - 1.0, first.1 + 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    let x_max = (series.len() - 1).max(1) as f64;
    let curve: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, &(_, y))| (i as f64, y))
        .collect();

    // Draw line first (so points can overlay).
    draw_curve(&mut grid, &curve, 0.0, x_max, y_min, y_max);
    for &(x, y) in &curve {
        let col = map_x(x, 0.0, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{title}: {} .. {} | y=[{y_min:.2}, {y_max:.2}]\n",
        first.0, last.0
    ));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out
}

fn render_bars(title: &str, rows: &[(String, f64, String)], width: usize) -> String {
    let mut out = format!("{title}:\n");
    if rows.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }

    let label_width = rows.iter().map(|(l, _, _)| l.chars().count()).max().unwrap_or(0);
    let bar_width = width.saturating_sub(label_width + 3).max(10);
    let max = rows.iter().map(|(_, v, _)| *v).fold(0.0_f64, f64::max);

    for (label, value, annotation) in rows {
        let len = if max > 0.0 && *value > 0.0 {
            ((value / max) * bar_width as f64).round().max(1.0) as usize
        } else {
            0
        };
        let pad = label_width - label.chars().count();
        out.push_str(&format!(
            "{label}{} | {} {annotation}\n",
            " ".repeat(pad),
            "#".repeat(len)
        ));
    }
    out
}

fn y_range(series: &[(&str, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(_, y) in series {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, col, row, '-');
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
