//! Order status codes and their localized display labels.

use std::borrow::Cow;
use std::collections::HashMap;

/// Order status codes known to the bookstore backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    WaitingPayment,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::Pending,
        OrderStatus::WaitingPayment,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Wire code used by the backend.
    pub fn code(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::WaitingPayment => "WAITING_PAYMENT",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Vietnamese label shown on the dashboard.
    pub fn display_name(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Chờ xử lý",
            OrderStatus::WaitingPayment => "Chờ thanh toán",
            OrderStatus::Confirmed => "Đã xác nhận",
            OrderStatus::Processing => "Đang xử lý",
            OrderStatus::Shipped => "Đã giao hàng",
            OrderStatus::Delivered => "Đã nhận hàng",
            OrderStatus::Completed => "Hoàn thành",
            OrderStatus::Cancelled => "Đã hủy",
        }
    }
}

/// Immutable code → label table.
///
/// Codes missing from the table are displayed as-is, so a status added on the
/// backend shows up with its raw code instead of breaking the chart.
#[derive(Debug, Clone)]
pub struct StatusLabels {
    labels: HashMap<String, String>,
}

impl StatusLabels {
    /// A table with no entries: every code is its own label.
    pub fn empty() -> Self {
        Self {
            labels: HashMap::new(),
        }
    }

    pub fn label<'a>(&'a self, code: &'a str) -> Cow<'a, str> {
        match self.labels.get(code) {
            Some(label) => Cow::Borrowed(label.as_str()),
            None => Cow::Borrowed(code),
        }
    }
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self {
            labels: OrderStatus::ALL
                .into_iter()
                .map(|s| (s.code().to_string(), s.display_name().to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_every_known_status() {
        let labels = StatusLabels::default();
        for status in OrderStatus::ALL {
            assert_eq!(labels.label(status.code()), status.display_name());
        }
        assert_eq!(labels.label("PENDING"), "Chờ xử lý");
        assert_eq!(labels.label("SHIPPED"), "Đã giao hàng");
    }

    #[test]
    fn unknown_code_is_its_own_label() {
        let labels = StatusLabels::default();
        assert_eq!(labels.label("REFUNDED"), "REFUNDED");
        assert_eq!(labels.label("pending"), "pending");
    }

    #[test]
    fn empty_table_shows_raw_codes() {
        assert_eq!(StatusLabels::empty().label("CANCELLED"), "CANCELLED");
    }
}
