use chrono::NaiveDate;
use contracts::dashboards::d402_order_analytics::{DateBounds, OrderAnalyticsRequest};

use crate::shared::data::order_dataset::{OrderDataset, OrderRecord};

/// Inclusive purchase date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl DateRange {
    /// Start after end, e.g. a lone `date_from` past the dataset's last day
    pub fn is_inverted(&self) -> bool {
        self.date_from > self.date_to
    }
}

/// Observed purchase date range of the dataset
pub fn get_date_bounds(dataset: &OrderDataset) -> DateBounds {
    match dataset.date_bounds() {
        Some((min_date, max_date)) => DateBounds {
            min_date: Some(min_date),
            max_date: Some(max_date),
        },
        None => DateBounds::default(),
    }
}

/// Effective filter range: missing bounds default to the dataset bounds.
///
/// Returns `None` only when a bound is missing and the dataset is empty.
pub fn resolve_range(dataset: &OrderDataset, request: &OrderAnalyticsRequest) -> Option<DateRange> {
    let bounds = dataset.date_bounds();
    let date_from = request.date_from.or(bounds.map(|(min, _)| min))?;
    let date_to = request.date_to.or(bounds.map(|(_, max)| max))?;
    Some(DateRange { date_from, date_to })
}

/// Orders purchased within the range (empty for an inverted range)
pub fn get_orders_in_range(dataset: &OrderDataset, range: Option<DateRange>) -> &[OrderRecord] {
    match range {
        Some(r) => dataset.filter_by_date(r.date_from, r.date_to),
        None => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::order_dataset::parse_timestamp;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 2, day).unwrap()
    }

    fn dataset() -> OrderDataset {
        let record = |id: &str, ts: &str| OrderRecord {
            order_id: id.to_string(),
            order_purchase_timestamp: parse_timestamp(ts).unwrap(),
            order_delivered_customer_date: None,
            price: 1.0,
            order_status: "delivered".to_string(),
        };
        OrderDataset::from_records(vec![
            record("c", "2018-02-20 10:00:00"),
            record("a", "2018-02-03 08:00:00"),
            record("b", "2018-02-10 23:59:59"),
        ])
    }

    #[test]
    fn test_bounds() {
        let bounds = get_date_bounds(&dataset());
        assert_eq!(bounds.min_date, Some(d(3)));
        assert_eq!(bounds.max_date, Some(d(20)));
        assert_eq!(get_date_bounds(&OrderDataset::default()), DateBounds::default());
    }

    #[test]
    fn test_resolve_range_defaults_to_bounds() {
        let ds = dataset();
        let full = resolve_range(&ds, &OrderAnalyticsRequest::default()).unwrap();
        assert_eq!(full, DateRange { date_from: d(3), date_to: d(20) });

        let partial = resolve_range(
            &ds,
            &OrderAnalyticsRequest {
                date_from: Some(d(5)),
                date_to: None,
            },
        )
        .unwrap();
        assert_eq!(partial, DateRange { date_from: d(5), date_to: d(20) });
        assert!(!partial.is_inverted());

        let past_max = resolve_range(
            &ds,
            &OrderAnalyticsRequest {
                date_from: Some(d(25)),
                date_to: None,
            },
        )
        .unwrap();
        assert_eq!(past_max, DateRange { date_from: d(25), date_to: d(20) });
        assert!(past_max.is_inverted());
        assert!(get_orders_in_range(&ds, Some(past_max)).is_empty());

        assert_eq!(
            resolve_range(&OrderDataset::default(), &OrderAnalyticsRequest::default()),
            None
        );
    }

    #[test]
    fn test_orders_in_range() {
        let ds = dataset();
        let range = DateRange { date_from: d(10), date_to: d(10) };
        let rows = get_orders_in_range(&ds, Some(range));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].order_id, "b");
        assert!(get_orders_in_range(&ds, None).is_empty());
    }
}
