//! Revenue and order-trend time series.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::domain::Dated;

/// Sort points ascending by calendar date.
///
/// - the sort is stable: points on the same calendar day keep their input order
/// - points whose date does not parse go last, in input order
/// - duplicates are kept
pub fn to_time_series<P: Dated + Clone>(points: &[P]) -> Vec<P> {
    let mut keyed: Vec<(Option<NaiveDate>, &P)> = points
        .iter()
        .map(|p| {
            let date = parse_calendar_date(p.date());
            if date.is_none() {
                tracing::warn!(date = p.date(), "unparseable chart date, placing it last");
            }
            (date, p)
        })
        .collect();

    // `(is_none, date)` orders every parsed date before every unparsed one.
    keyed.sort_by_key(|(date, _)| (date.is_none(), *date));
    keyed.into_iter().map(|(_, p)| p.clone()).collect()
}

/// Parse the calendar date of an ISO-8601 date or date-time string.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    // Local date-times as emitted by `LocalDateTime` serializers.
    const FMTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    FMTS.iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderTrendPoint, RevenuePoint};

    fn rev(date: &str, amount: f64) -> RevenuePoint {
        RevenuePoint { date: date.to_string(), amount }
    }

    fn trend(date: &str, count: i64) -> OrderTrendPoint {
        OrderTrendPoint { date: date.to_string(), count }
    }

    #[test]
    fn sorts_ascending_by_date() {
        let input = vec![rev("2024-03-05", 1500.0), rev("2024-03-01", 200.0)];
        let out = to_time_series(&input);
        assert_eq!(out, vec![rev("2024-03-01", 200.0), rev("2024-03-05", 1500.0)]);
        // Input untouched.
        assert_eq!(input[0].date, "2024-03-05");
    }

    #[test]
    fn same_day_points_keep_input_order_and_are_not_merged() {
        let input = vec![
            trend("2024-01-02", 1),
            trend("2024-01-01T18:00:00", 2),
            trend("2024-01-02", 3),
            trend("2024-01-01T09:00:00Z", 4),
        ];
        let out = to_time_series(&input);
        let counts: Vec<i64> = out.iter().map(|p| p.count).collect();
        assert_eq!(counts, vec![2, 4, 1, 3]);
    }

    #[test]
    fn unparseable_dates_go_last_in_input_order() {
        let input = vec![
            trend("", 1),
            trend("2024-02-01", 2),
            trend("03/01/2024", 3),
            trend("2023-12-31", 4),
        ];
        let out = to_time_series(&input);
        let counts: Vec<i64> = out.iter().map(|p| p.count).collect();
        assert_eq!(counts, vec![4, 2, 1, 3]);
    }

    #[test]
    fn parses_common_iso_shapes() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_calendar_date("2024-03-01"), Some(d));
        assert_eq!(parse_calendar_date("2024-03-01T23:59:59"), Some(d));
        assert_eq!(parse_calendar_date("2024-03-01T10:00:00.123"), Some(d));
        assert_eq!(parse_calendar_date("2024-03-01 10:00:00"), Some(d));
        assert_eq!(parse_calendar_date("2024-03-01T10:00:00+07:00"), Some(d));
        assert_eq!(parse_calendar_date("2024-13-01"), None);
        assert_eq!(parse_calendar_date("yesterday"), None);
    }
}
