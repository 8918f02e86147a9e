//! Shared domain types.
//!
//! Two families live here:
//!
//! - `Raw*` types mirror the statistics payload as the backend sends it. They
//!   are read key by key from a JSON object, so a single badly typed field
//!   never affects its neighbours; the normalizer decides what each variant means.
//! - the normalized record and the chart-ready points, where every field has a
//!   concrete type and can be used without further checks.

use std::path::PathBuf;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::StatusLabels;
use crate::error::ValidationError;

/// Top-level keys a statistics payload is expected to carry.
pub const REQUIRED_FIELDS: [&str; 4] = [
    "revenueTrend",
    "orderStatusCounts",
    "topSellingBooks",
    "orderTrend",
];

/// A numeric field as it arrives on the wire.
///
/// The backend serializes monetary values (`BigDecimal`) as strings and
/// counters as numbers, but neither is guaranteed.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNumber {
    Number(serde_json::Number),
    Text(String),
    /// Anything else (`true`, objects, arrays). Always coerced to zero.
    Other(Value),
}

impl From<&Value> for RawNumber {
    fn from(value: &Value) -> Self {
        match value {
            Value::Number(n) => RawNumber::Number(n.clone()),
            Value::String(s) => RawNumber::Text(s.clone()),
            other => RawNumber::Other(other.clone()),
        }
    }
}

/// A string field as it arrives on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum RawText {
    Text(String),
    Other(Value),
}

impl From<&Value> for RawText {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => RawText::Text(s.clone()),
            other => RawText::Other(other.clone()),
        }
    }
}

/// A sequence field; `Other` holds a value that was not an array at all.
#[derive(Debug, Clone, PartialEq)]
pub enum RawList<T> {
    Items(Vec<RawItem<T>>),
    Other(Value),
}

impl<T> RawList<T> {
    fn read(value: &Value, read_item: fn(&Map<String, Value>) -> T) -> Self {
        match value {
            Value::Array(items) => RawList::Items(
                items
                    .iter()
                    .map(|item| match item {
                        Value::Object(obj) => RawItem::Item(read_item(obj)),
                        other => RawItem::Other(other.clone()),
                    })
                    .collect(),
            ),
            other => RawList::Other(other.clone()),
        }
    }
}

/// One sequence element; `Other` holds an element that was not an object.
#[derive(Debug, Clone, PartialEq)]
pub enum RawItem<T> {
    Item(T),
    Other(Value),
}

/// The status → count mapping; `Other` holds a value that was not an object.
#[derive(Debug, Clone, PartialEq)]
pub enum RawStatusCounts {
    Counts(IndexMap<String, RawNumber>),
    Other(Value),
}

impl From<&Value> for RawStatusCounts {
    fn from(value: &Value) -> Self {
        match value {
            Value::Object(obj) => RawStatusCounts::Counts(obj.iter().map(|(k, v)| (k.clone(), v.into())).collect()),
            other => RawStatusCounts::Other(other.clone()),
        }
    }
}

/// An alias key that lost to its canonical key in the same object.
#[derive(Debug, Clone, PartialEq)]
pub struct IgnoredAlias {
    pub canonical: &'static str,
    pub alias: &'static str,
    pub value: Value,
}

/// Key lookup over one JSON object.
///
/// The canonical key wins; an alias is read only when the canonical key is
/// absent or `null`. Aliases shadowed by a present canonical key are recorded.
struct Fields<'a> {
    obj: &'a Map<String, Value>,
    ignored: Vec<IgnoredAlias>,
}

impl<'a> Fields<'a> {
    fn new(obj: &'a Map<String, Value>) -> Self {
        Self {
            obj,
            ignored: Vec::new(),
        }
    }

    fn get(&mut self, canonical: &'static str, aliases: &[&'static str]) -> Option<&'a Value> {
        let obj = self.obj;
        let present = |key: &str| obj.get(key).filter(|v| !v.is_null());
        let mut found = present(canonical).map(|v| (canonical, v));
        for &alias in aliases {
            let Some(value) = present(alias) else { continue };
            match found {
                None => found = Some((alias, value)),
                Some((winner, _)) => self.ignored.push(IgnoredAlias {
                    canonical: winner,
                    alias,
                    value: value.clone(),
                }),
            }
        }
        found.map(|(_, v)| v)
    }

    fn number(&mut self, canonical: &'static str, aliases: &[&'static str]) -> Option<RawNumber> {
        self.get(canonical, aliases).map(RawNumber::from)
    }

    fn text(&mut self, canonical: &'static str) -> Option<RawText> {
        self.get(canonical, &[]).map(RawText::from)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRevenuePoint {
    pub date: Option<RawText>,
    pub amount: Option<RawNumber>,
    pub ignored: Vec<IgnoredAlias>,
}

impl RawRevenuePoint {
    fn read(obj: &Map<String, Value>) -> Self {
        let mut f = Fields::new(obj);
        Self {
            date: f.text("date"),
            amount: f.number("amount", &["revenue"]),
            ignored: f.ignored,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOrderTrendPoint {
    pub date: Option<RawText>,
    pub count: Option<RawNumber>,
    pub ignored: Vec<IgnoredAlias>,
}

impl RawOrderTrendPoint {
    fn read(obj: &Map<String, Value>) -> Self {
        let mut f = Fields::new(obj);
        Self {
            date: f.text("date"),
            count: f.number("count", &["orderCount"]),
            ignored: f.ignored,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBookSales {
    pub id: Option<RawNumber>,
    pub title: Option<RawText>,
    pub sku: Option<RawText>,
    pub quantity: Option<RawNumber>,
    pub revenue: Option<RawNumber>,
    pub ignored: Vec<IgnoredAlias>,
}

impl RawBookSales {
    fn read(obj: &Map<String, Value>) -> Self {
        let mut f = Fields::new(obj);
        Self {
            id: f.number("id", &["bookId"]),
            title: f.text("title"),
            sku: f.text("sku"),
            quantity: f.number("quantity", &["quantitySold"]),
            revenue: f.number("revenue", &[]),
            ignored: f.ignored,
        }
    }
}

/// The statistics payload before normalization.
///
/// A JSON `null` is treated the same as an absent field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStatistics {
    pub revenue_trend: Option<RawList<RawRevenuePoint>>,
    pub order_status_counts: Option<RawStatusCounts>,
    pub top_selling_books: Option<RawList<RawBookSales>>,
    pub order_trend: Option<RawList<RawOrderTrendPoint>>,
    pub ignored: Vec<IgnoredAlias>,
}

impl RawStatistics {
    /// Interpret an already-decoded JSON document as a statistics payload.
    ///
    /// Only the top level is checked here; see [`RawStatistics::missing_fields`].
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let Value::Object(obj) = &value else {
            return Err(ValidationError::NotAnObject(json_kind(&value)));
        };

        let mut f = Fields::new(obj);
        Ok(Self {
            revenue_trend: f
                .get("revenueTrend", &["revenueByDate"])
                .map(|v| RawList::read(v, RawRevenuePoint::read)),
            order_status_counts: f.get("orderStatusCounts", &[]).map(RawStatusCounts::from),
            top_selling_books: f
                .get("topSellingBooks", &[])
                .map(|v| RawList::read(v, RawBookSales::read)),
            order_trend: f
                .get("orderTrend", &[])
                .map(|v| RawList::read(v, RawOrderTrendPoint::read)),
            ignored: f.ignored,
        })
    }

    /// Names of the required top-level fields that are absent (or `null`).
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let present = [
            self.revenue_trend.is_some(),
            self.order_status_counts.is_some(),
            self.top_selling_books.is_some(),
            self.order_trend.is_some(),
        ];
        REQUIRED_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(name, _)| *name)
            .collect()
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A point that can be placed on a calendar axis.
pub trait Dated {
    /// ISO-8601 date (or date-time) string as received.
    fn date(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub date: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTrendPoint {
    pub date: String,
    pub count: i64,
}

impl Dated for RevenuePoint {
    fn date(&self) -> &str {
        &self.date
    }
}

impl Dated for OrderTrendPoint {
    fn date(&self) -> &str {
        &self.date
    }
}

/// Sales figures of a single book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSales {
    pub id: i64,
    pub title: String,
    pub sku: String,
    pub quantity: i64,
    pub revenue: f64,
}

/// Fully typed statistics record.
///
/// Serializes with the same field names as the wire payload, so feeding it
/// back through the normalizer is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedStatistics {
    pub revenue_trend: Vec<RevenuePoint>,
    pub order_status_counts: IndexMap<String, i64>,
    pub top_selling_books: Vec<BookSales>,
    pub order_trend: Vec<OrderTrendPoint>,
}

/// One slice of the order-status pie chart.
///
/// The percentage is not stored; it is derived from the slice set at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSlice {
    pub label: String,
    pub value: i64,
    pub original_status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRankEntry {
    pub title: String,
    pub quantity: i64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Maximum number of books in the ranking.
    pub top_n: usize,
    /// Title content budget (characters) before the ellipsis is appended.
    pub title_max_chars: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_json: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,

    /// Code → label table for the status chart.
    pub status_labels: StatusLabels,

    /// How long a fetched payload stays fresh in the query cache.
    pub freshness: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: crate::transform::TOP_BOOKS_LIMIT,
            title_max_chars: crate::transform::TITLE_MAX_CHARS,
            plot: true,
            plot_width: 72,
            plot_height: 12,
            export_json: None,
            export_csv: None,
            status_labels: StatusLabels::default(),
            freshness: crate::data::DEFAULT_FRESHNESS,
        }
    }
}
