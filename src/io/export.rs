//! Export chart-ready data.
//!
//! - the full `ChartSet` as JSON, in the shape a chart renderer consumes
//! - the book ranking as CSV, for spreadsheets

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::domain::BookRankEntry;
use crate::error::{AppError, EXIT_CONFIG};
use crate::transform::ChartSet;

/// Write every chart as pretty-printed JSON.
pub fn write_charts_json(path: &Path, charts: &ChartSet) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_CONFIG, format!("Failed to create chart JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, charts)
        .map_err(|e| AppError::new(EXIT_CONFIG, format!("Failed to write chart JSON: {e}")))?;

    Ok(())
}

#[derive(Serialize)]
struct RankingRow<'a> {
    rank: usize,
    title: &'a str,
    quantity: i64,
}

/// Write the ranking to a CSV file with a `rank,title,quantity` header.
pub fn write_ranking_csv(path: &Path, entries: &[BookRankEntry]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(EXIT_CONFIG, format!("Failed to create ranking CSV '{}': {e}", path.display())))?;

    for (idx, entry) in entries.iter().enumerate() {
        writer
            .serialize(RankingRow {
                rank: idx + 1,
                title: &entry.title,
                quantity: entry.quantity,
            })
            .map_err(|e| AppError::new(EXIT_CONFIG, format!("Failed to write ranking CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_CONFIG, format!("Failed to write ranking CSV: {e}")))?;

    Ok(())
}
