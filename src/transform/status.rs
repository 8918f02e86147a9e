//! Order-status distribution (pie chart) slices.

use indexmap::IndexMap;

use crate::domain::{StatusLabels, StatusSlice};

/// Build pie slices from status counts.
///
/// Zero counts are dropped; negative counts are passed through as-is. Slices
/// follow the iteration order of `counts`.
pub fn to_status_slices(counts: &IndexMap<String, i64>, labels: &StatusLabels) -> Vec<StatusSlice> {
    counts
        .iter()
        .filter(|&(_, &count)| count != 0)
        .map(|(code, &count)| StatusSlice {
            label: labels.label(code).into_owned(),
            value: count,
            original_status: code.clone(),
        })
        .collect()
}

/// Sum of all slice values (the pie's 100%).
///
/// Saturates at the `i64` bounds, since counts may already be clamped there.
pub fn slice_total(slices: &[StatusSlice]) -> i64 {
    slices.iter().fold(0, |acc, s| acc.saturating_add(s.value))
}

/// Share of `value` in `total`, in percent rounded to one decimal place.
///
/// A zero total yields `0.0` instead of dividing by zero.
pub fn percentage(value: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = value as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(entries: &[(&str, i64)]) -> IndexMap<String, i64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn zero_counts_are_dropped_and_labels_translated() {
        let input = counts(&[("PENDING", 5), ("CANCELLED", 0), ("SHIPPED", 3)]);
        let slices = to_status_slices(&input, &StatusLabels::default());
        assert_eq!(
            slices,
            vec![
                StatusSlice {
                    label: "Chờ xử lý".to_string(),
                    value: 5,
                    original_status: "PENDING".to_string(),
                },
                StatusSlice {
                    label: "Đã giao hàng".to_string(),
                    value: 3,
                    original_status: "SHIPPED".to_string(),
                },
            ]
        );
    }

    #[test]
    fn unknown_and_negative_statuses_pass_through() {
        let input = counts(&[("REFUNDED", 2), ("COMPLETED", -1)]);
        let slices = to_status_slices(&input, &StatusLabels::default());
        assert_eq!(slices[0].label, "REFUNDED");
        assert_eq!(slices[0].original_status, "REFUNDED");
        assert_eq!(slices[1].label, "Hoàn thành");
        assert_eq!(slices[1].value, -1);
    }

    #[test]
    fn output_follows_input_order() {
        let input = counts(&[("SHIPPED", 1), ("PENDING", 9), ("CONFIRMED", 4)]);
        let codes: Vec<String> = to_status_slices(&input, &StatusLabels::default())
            .into_iter()
            .map(|s| s.original_status)
            .collect();
        assert_eq!(codes, vec!["SHIPPED", "PENDING", "CONFIRMED"]);
    }

    #[test]
    fn percentages_round_to_one_decimal() {
        assert_eq!(percentage(5, 8), 62.5);
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(3, 3), 100.0);
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(4, 0), 0.0);
    }

    #[test]
    fn total_sums_slice_values() {
        let input = counts(&[("PENDING", 5), ("CANCELLED", 0), ("SHIPPED", 3)]);
        let slices = to_status_slices(&input, &StatusLabels::default());
        assert_eq!(slice_total(&slices), 8);
        assert_eq!(slice_total(&[]), 0);
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let input = counts(&[("PENDING", i64::MAX), ("SHIPPED", 1)]);
        let slices = to_status_slices(&input, &StatusLabels::default());
        assert_eq!(slice_total(&slices), i64::MAX);
        assert_eq!(percentage(i64::MAX, slice_total(&slices)), 100.0);
    }
}
