//! Statistics normalization.
//!
//! Turns an untrusted [`RawStatistics`] payload into a [`NormalizedStatistics`]
//! record whose fields can be used directly in arithmetic and formatting.
//!
//! - top-level shape errors are the only failure (`ValidationError`)
//! - field-level problems fall back to defaults and are reported as warnings
//! - source order of every sequence and of the status mapping is preserved

pub mod coerce;

use indexmap::IndexMap;
use serde_json::Value;

use crate::domain::types::json_kind;
use crate::domain::{
    BookSales, NormalizedStatistics, OrderTrendPoint, RawBookSales, RawItem, RawList, RawOrderTrendPoint,
    RawRevenuePoint, RawStatistics, RawStatusCounts, RevenuePoint, REQUIRED_FIELDS,
};
use crate::error::{ParseWarning, ValidationError};

pub use coerce::Coercer;

/// Fallback for absent or empty book titles.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Normalization output: the typed record plus every recovered field problem.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub stats: NormalizedStatistics,
    pub warnings: Vec<ParseWarning>,
}

/// Normalize a payload, logging field-level warnings.
pub fn normalize(raw: &RawStatistics) -> Result<NormalizedStatistics, ValidationError> {
    let out = normalize_with_warnings(raw)?;
    for w in &out.warnings {
        tracing::warn!(field = %w.field, raw = %w.raw, "{}", w.reason);
    }
    Ok(out.stats)
}

/// Decode and normalize a JSON document in one step.
pub fn normalize_value(value: Value) -> Result<NormalizedStatistics, ValidationError> {
    let raw = RawStatistics::from_value(value)?;
    normalize(&raw)
}

/// Normalize a payload and hand the warnings back instead of logging them.
pub fn normalize_with_warnings(raw: &RawStatistics) -> Result<Normalized, ValidationError> {
    let missing = raw.missing_fields();
    if missing.len() == REQUIRED_FIELDS.len() {
        return Err(ValidationError::MissingFields(missing));
    }

    let mut c = Coercer::new();
    c.ignored_aliases(&raw.ignored, "");

    let revenue_trend = normalize_list(raw.revenue_trend.as_ref(), "revenueTrend", &mut c, normalize_revenue_point);
    let order_status_counts = normalize_status_counts(raw.order_status_counts.as_ref(), &mut c);
    let top_selling_books = normalize_list(raw.top_selling_books.as_ref(), "topSellingBooks", &mut c, normalize_book);
    let order_trend = normalize_list(raw.order_trend.as_ref(), "orderTrend", &mut c, normalize_trend_point);

    let stats = NormalizedStatistics {
        revenue_trend,
        order_status_counts,
        top_selling_books,
        order_trend,
    };
    tracing::debug!(
        revenue_points = stats.revenue_trend.len(),
        statuses = stats.order_status_counts.len(),
        books = stats.top_selling_books.len(),
        trend_points = stats.order_trend.len(),
        "normalized statistics payload"
    );

    Ok(Normalized {
        stats,
        warnings: c.into_warnings(),
    })
}

fn normalize_list<T, U>(
    list: Option<&RawList<T>>,
    name: &str,
    c: &mut Coercer,
    normalize_item: fn(&T, &str, &mut Coercer) -> U,
) -> Vec<U>
where
    T: Default,
{
    let items = match list {
        None => return Vec::new(),
        Some(RawList::Other(v)) => {
            c.warn(
                name.to_string(),
                v.to_string(),
                format!("expected an array, got {}; using []", json_kind(v)),
            );
            return Vec::new();
        }
        Some(RawList::Items(items)) => items,
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let path = format!("{name}[{idx}]");
            match item {
                RawItem::Item(item) => normalize_item(item, &path, c),
                RawItem::Other(v) => {
                    c.warn(
                        path.clone(),
                        v.to_string(),
                        format!("expected an object, got {}; using defaults", json_kind(v)),
                    );
                    normalize_item(&T::default(), &path, c)
                }
            }
        })
        .collect()
}

fn normalize_revenue_point(raw: &RawRevenuePoint, path: &str, c: &mut Coercer) -> RevenuePoint {
    c.ignored_aliases(&raw.ignored, path);
    RevenuePoint {
        date: c.text(raw.date.as_ref(), "", path, "date"),
        amount: c.float(raw.amount.as_ref(), path, "amount"),
    }
}

fn normalize_trend_point(raw: &RawOrderTrendPoint, path: &str, c: &mut Coercer) -> OrderTrendPoint {
    c.ignored_aliases(&raw.ignored, path);
    OrderTrendPoint {
        date: c.text(raw.date.as_ref(), "", path, "date"),
        count: c.int(raw.count.as_ref(), path, "count"),
    }
}

fn normalize_book(raw: &RawBookSales, path: &str, c: &mut Coercer) -> BookSales {
    c.ignored_aliases(&raw.ignored, path);
    BookSales {
        id: c.int(raw.id.as_ref(), path, "id"),
        title: c.text(raw.title.as_ref(), UNKNOWN_TITLE, path, "title"),
        sku: c.text(raw.sku.as_ref(), "", path, "sku"),
        quantity: c.int(raw.quantity.as_ref(), path, "quantity"),
        revenue: c.float(raw.revenue.as_ref(), path, "revenue"),
    }
}

fn normalize_status_counts(raw: Option<&RawStatusCounts>, c: &mut Coercer) -> IndexMap<String, i64> {
    match raw {
        None => IndexMap::new(),
        Some(RawStatusCounts::Other(v)) => {
            c.warn(
                "orderStatusCounts".to_string(),
                v.to_string(),
                format!("expected an object, got {}; using {{}}", json_kind(v)),
            );
            IndexMap::new()
        }
        Some(RawStatusCounts::Counts(map)) => map
            .iter()
            .map(|(code, count)| {
                let count = c.int(Some(count), "orderStatusCounts", code);
                (code.clone(), count)
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize_json(value: Value) -> Normalized {
        let raw = RawStatistics::from_value(value).unwrap();
        normalize_with_warnings(&raw).unwrap()
    }

    #[test]
    fn revenue_strings_and_numbers_normalize_in_source_order() {
        let out = normalize_json(json!({
            "revenueTrend": [
                { "date": "2024-03-05", "amount": "1500" },
                { "date": "2024-03-01", "amount": 200 }
            ],
            "orderStatusCounts": {},
            "topSellingBooks": [],
            "orderTrend": []
        }));

        assert!(out.warnings.is_empty());
        assert_eq!(
            out.stats.revenue_trend,
            vec![
                RevenuePoint { date: "2024-03-05".to_string(), amount: 1500.0 },
                RevenuePoint { date: "2024-03-01".to_string(), amount: 200.0 },
            ]
        );
    }

    #[test]
    fn books_get_fallbacks_for_missing_fields() {
        let out = normalize_json(json!({
            "topSellingBooks": [
                { "bookId": "17", "title": "", "quantitySold": "9", "revenue": "450000.50" },
                { "id": 3, "title": "Tắt đèn", "sku": "BK-003", "quantity": 4 }
            ]
        }));

        assert_eq!(
            out.stats.top_selling_books,
            vec![
                BookSales {
                    id: 17,
                    title: UNKNOWN_TITLE.to_string(),
                    sku: String::new(),
                    quantity: 9,
                    revenue: 450000.5,
                },
                BookSales {
                    id: 3,
                    title: "Tắt đèn".to_string(),
                    sku: "BK-003".to_string(),
                    quantity: 4,
                    revenue: 0.0,
                },
            ]
        );
        assert!(out.stats.revenue_trend.is_empty());
        assert!(out.stats.order_status_counts.is_empty());
        assert!(out.stats.order_trend.is_empty());
    }

    #[test]
    fn status_counts_keep_every_key_in_order() {
        let out = normalize_json(json!({
            "orderStatusCounts": { "PENDING": 5, "CANCELLED": "0", "SHIPPED": "3", "REFUNDED": "x" }
        }));

        let counts: Vec<(&str, i64)> = out
            .stats
            .order_status_counts
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        assert_eq!(
            counts,
            vec![("PENDING", 5), ("CANCELLED", 0), ("SHIPPED", 3), ("REFUNDED", 0)]
        );
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].field, "orderStatusCounts.REFUNDED");
    }

    #[test]
    fn malformed_elements_keep_their_slot() {
        let out = normalize_json(json!({
            "orderTrend": [
                { "date": "2024-01-01", "count": 2 },
                "garbage",
                { "date": "2024-01-03", "count": "five" }
            ]
        }));

        assert_eq!(
            out.stats.order_trend,
            vec![
                OrderTrendPoint { date: "2024-01-01".to_string(), count: 2 },
                OrderTrendPoint { date: String::new(), count: 0 },
                OrderTrendPoint { date: "2024-01-03".to_string(), count: 0 },
            ]
        );
        let fields: Vec<&str> = out.warnings.iter().map(|w| w.field.as_str()).collect();
        assert_eq!(fields, vec!["orderTrend[1]", "orderTrend[2].count"]);
    }

    #[test]
    fn wrongly_typed_sections_default_to_empty() {
        let out = normalize_json(json!({
            "revenueTrend": { "2024-01-01": 10 },
            "orderStatusCounts": "PENDING=1"
        }));
        assert!(out.stats.revenue_trend.is_empty());
        assert!(out.stats.order_status_counts.is_empty());
        assert_eq!(out.warnings.len(), 2);
    }

    #[test]
    fn payload_without_any_required_field_is_rejected() {
        let raw = RawStatistics::from_value(json!({ "totalUsers": 10 })).unwrap();
        let err = normalize_with_warnings(&raw).unwrap_err();
        assert_eq!(err, ValidationError::MissingFields(REQUIRED_FIELDS.to_vec()));

        let raw = RawStatistics::from_value(json!({ "revenueTrend": null, "orderTrend": null })).unwrap();
        assert!(normalize(&raw).is_err());

        assert!(matches!(
            normalize_value(json!("statistics")),
            Err(ValidationError::NotAnObject("a string"))
        ));
    }

    #[test]
    fn already_normalized_payload_is_unchanged() {
        let first = normalize_json(json!({
            "revenueTrend": [{ "date": "2024-03-01", "amount": "12.5" }],
            "orderStatusCounts": { "PENDING": "2" },
            "topSellingBooks": [{ "id": 1, "quantity": "3" }],
            "orderTrend": [{ "date": "2024-03-01", "count": "4" }]
        }))
        .stats;

        let again = normalize_value(serde_json::to_value(&first).unwrap()).unwrap();
        assert_eq!(again, first);
    }

    #[test]
    fn section_and_its_alias_together_are_not_rejected() {
        let out = normalize_json(json!({
            "revenueTrend": [{ "date": "2024-03-01", "amount": "100" }],
            "revenueByDate": [{ "date": "2024-03-02", "amount": "999" }],
            "orderTrend": []
        }));

        assert_eq!(
            out.stats.revenue_trend,
            vec![RevenuePoint { date: "2024-03-01".to_string(), amount: 100.0 }]
        );
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].field, "revenueByDate");
        assert!(out.warnings[0].reason.contains("revenueTrend"));
    }

    #[test]
    fn book_with_id_and_alias_keeps_its_other_fields() {
        let out = normalize_json(json!({
            "topSellingBooks": [{ "id": 1, "bookId": 1, "title": "Số đỏ", "quantity": 50 }]
        }));

        assert_eq!(
            out.stats.top_selling_books,
            vec![BookSales {
                id: 1,
                title: "Số đỏ".to_string(),
                sku: String::new(),
                quantity: 50,
                revenue: 0.0,
            }]
        );
        let fields: Vec<&str> = out.warnings.iter().map(|w| w.field.as_str()).collect();
        assert_eq!(fields, vec!["topSellingBooks[0].bookId"]);
    }
}
