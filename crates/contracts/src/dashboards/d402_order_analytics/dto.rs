use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const STATUS_DELIVERED: &str = "delivered";
pub const STATUS_SHIPPED: &str = "shipped";
pub const STATUS_CANCELED: &str = "canceled";
pub const STATUS_PROCESSING: &str = "processing";

/// Statuses shown as metric cards, in display order
pub const STATUS_CARDS: [&str; 4] = [
    STATUS_DELIVERED,
    STATUS_SHIPPED,
    STATUS_CANCELED,
    STATUS_PROCESSING,
];

/// Request for the order analytics dashboard.
///
/// Both bounds are optional; a missing bound falls back to the dataset's
/// observed min/max purchase date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAnalyticsRequest {
    /// Start date in format "YYYY-MM-DD" (inclusive)
    pub date_from: Option<NaiveDate>,
    /// End date in format "YYYY-MM-DD" (inclusive)
    pub date_to: Option<NaiveDate>,
}

/// Observed purchase date range of the loaded dataset, `None` when it is empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

/// One day of the daily orders chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyOrdersRow {
    pub date: NaiveDate,
    /// Distinct order ids purchased that day
    pub order_count: u64,
    /// Sum of line prices, not deduplicated by order
    pub revenue: f64,
}

/// Daily order/revenue totals. Days without orders have no row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyOrdersView {
    pub rows: Vec<DailyOrdersRow>,
}

impl DailyOrdersView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_orders(&self) -> u64 {
        self.rows.iter().map(|r| r.order_count).sum()
    }

    pub fn total_revenue(&self) -> f64 {
        self.rows.iter().map(|r| r.revenue).sum()
    }
}

/// One day of the status matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStatusRow {
    pub date: NaiveDate,
    /// Distinct order ids per status; every observed status has a key
    pub counts: BTreeMap<String, u64>,
}

impl DailyStatusRow {
    pub fn count(&self, status: &str) -> u64 {
        self.counts.get(status).copied().unwrap_or(0)
    }
}

/// Daily per-status distinct order counts.
///
/// Columns are dynamic: `statuses` lists every status observed in the
/// filtered rows (sorted), and each row carries a zero-filled count for
/// each of them. A status that never occurs has no column at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStatusView {
    pub statuses: Vec<String>,
    pub rows: Vec<DailyStatusRow>,
}

impl DailyStatusView {
    pub fn has_status(&self, status: &str) -> bool {
        self.statuses.iter().any(|s| s == status)
    }

    /// Sum of a status column over all days, absent column counts as zero
    pub fn status_total(&self, status: &str) -> u64 {
        self.rows.iter().map(|r| r.count(status)).sum()
    }
}

/// One hour-of-day bucket of the cancellation chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyCancellationRow {
    /// 0..=23
    pub hour: u32,
    /// 12-hour clock label, e.g. "12 AM", "3 PM"
    pub label: String,
    /// Row counts per status for this hour
    pub counts: BTreeMap<String, u64>,
    pub total: u64,
    /// canceled / total * 100, 0.0 when the hour has no orders
    pub cancellation_rate: f64,
}

/// Cancellation ratio per hour of day, always 24 rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyCancellationView {
    pub statuses: Vec<String>,
    pub rows: Vec<HourlyCancellationRow>,
}

impl HourlyCancellationView {
    pub fn hour(&self, hour: u32) -> Option<&HourlyCancellationRow> {
        self.rows.iter().find(|r| r.hour == hour)
    }
}

/// Headline metrics over the daily orders view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub total_orders: u64,
    pub total_revenue: f64,
    /// ISO currency code of the revenue, e.g. "AUD"
    pub currency_code: String,
    /// Revenue rendered with the configured currency, e.g. "AU$ 1.234,50"
    pub total_revenue_formatted: String,
}

/// Metric card for one of the fixed statuses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMetric {
    pub status: String,
    pub count: u64,
    /// false when the status does not occur in the selected range
    pub available: bool,
}

/// Response for the order analytics dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAnalyticsResponse {
    /// Effective range used for filtering, `None` when the dataset is empty
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub bounds: DateBounds,
    pub summary: OrderSummary,
    pub daily_orders: DailyOrdersView,
    pub daily_status: DailyStatusView,
    pub status_metrics: Vec<StatusMetric>,
    pub hourly_cancellation: HourlyCancellationView,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 1, d).unwrap()
    }

    #[test]
    fn test_status_total_treats_missing_column_as_zero() {
        let view = DailyStatusView {
            statuses: vec!["delivered".to_string()],
            rows: vec![
                DailyStatusRow {
                    date: day(1),
                    counts: BTreeMap::from([("delivered".to_string(), 2)]),
                },
                DailyStatusRow {
                    date: day(2),
                    counts: BTreeMap::from([("delivered".to_string(), 3)]),
                },
            ],
        };

        assert_eq!(view.status_total(STATUS_DELIVERED), 5);
        assert_eq!(view.status_total(STATUS_SHIPPED), 0);
        assert!(view.has_status(STATUS_DELIVERED));
        assert!(!view.has_status(STATUS_SHIPPED));
    }

    #[test]
    fn test_request_deserializes_without_bounds() {
        let req: OrderAnalyticsRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, OrderAnalyticsRequest::default());

        let req: OrderAnalyticsRequest =
            serde_json::from_str(r#"{"date_from":"2018-01-01","date_to":"2018-01-31"}"#).unwrap();
        assert_eq!(req.date_from, Some(day(1)));
        assert_eq!(req.date_to, Some(day(31)));
    }

    #[test]
    fn test_daily_orders_totals() {
        let view = DailyOrdersView {
            rows: vec![
                DailyOrdersRow { date: day(1), order_count: 2, revenue: 10.5 },
                DailyOrdersRow { date: day(3), order_count: 1, revenue: 4.5 },
            ],
        };
        assert_eq!(view.total_orders(), 3);
        assert!((view.total_revenue() - 15.0).abs() < 1e-9);
        assert!(DailyOrdersView::default().is_empty());
    }
}
