//! Top-selling books ranking (bar chart).

use crate::domain::{BookRankEntry, BookSales};

/// Number of books shown in the ranking.
pub const TOP_BOOKS_LIMIT: usize = 10;
/// Title content budget in characters; the ellipsis comes on top.
pub const TITLE_MAX_CHARS: usize = 40;
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingOptions {
    pub limit: usize,
    pub title_max_chars: usize,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            limit: TOP_BOOKS_LIMIT,
            title_max_chars: TITLE_MAX_CHARS,
        }
    }
}

/// Rank books by quantity sold using the default limit and title budget.
pub fn to_ranking(books: &[BookSales]) -> Vec<BookRankEntry> {
    to_ranking_with(books, RankingOptions::default())
}

/// Rank books by quantity sold, descending.
///
/// Ties keep their input order. The list is cut to `limit` only after sorting,
/// so a best seller late in the input is never lost.
pub fn to_ranking_with(books: &[BookSales], options: RankingOptions) -> Vec<BookRankEntry> {
    let mut sorted: Vec<&BookSales> = books.iter().collect();
    sorted.sort_by(|a, b| b.quantity.cmp(&a.quantity));

    sorted
        .into_iter()
        .take(options.limit)
        .map(|b| BookRankEntry {
            title: shorten_title(&b.title, options.title_max_chars),
            quantity: b.quantity,
        })
        .collect()
}

/// Cut `title` to `max_chars` characters, appending [`ELLIPSIS`] when cut.
pub fn shorten_title(title: &str, max_chars: usize) -> String {
    match title.char_indices().nth(max_chars) {
        None => title.to_string(),
        Some((byte_idx, _)) => format!("{}{ELLIPSIS}", &title[..byte_idx]),
    }
}
