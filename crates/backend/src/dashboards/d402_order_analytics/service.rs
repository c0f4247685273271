use chrono::NaiveDate;
use contracts::dashboards::d402_order_analytics::{
    DailyOrdersRow, DailyOrdersView, DailyStatusRow, DailyStatusView, HourlyCancellationRow,
    HourlyCancellationView, OrderAnalyticsRequest, OrderAnalyticsResponse, OrderSummary,
    StatusMetric, STATUS_CANCELED, STATUS_CARDS,
};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::repository;
use crate::shared::config::PresentationConfig;
use crate::shared::data::order_dataset::{OrderDataset, OrderRecord};
use crate::shared::format::{format_currency, hour_label};

const HOURS_PER_DAY: usize = 24;

/// Assemble the whole dashboard for the requested date range
pub fn get_order_analytics(
    dataset: &OrderDataset,
    request: &OrderAnalyticsRequest,
    presentation: &PresentationConfig,
) -> OrderAnalyticsResponse {
    let bounds = repository::get_date_bounds(dataset);
    let range = repository::resolve_range(dataset, request);
    if let Some(r) = range.filter(|r| r.is_inverted()) {
        tracing::warn!(
            "d402: inverted date range {} > {}, returning empty views",
            r.date_from,
            r.date_to
        );
    }
    let rows = repository::get_orders_in_range(dataset, range);

    let daily_orders = match range {
        Some(r) => aggregate_daily_totals(rows, r.date_from, r.date_to),
        None => DailyOrdersView::default(),
    };
    let daily_status = aggregate_daily_status(rows);
    let hourly_cancellation = aggregate_hourly_cancellation(rows);
    let summary = summarize(&daily_orders, presentation);

    tracing::debug!(
        "d402: {} rows in {:?}, {} days, {} orders",
        rows.len(),
        range,
        daily_orders.rows.len(),
        summary.total_orders
    );

    OrderAnalyticsResponse {
        date_from: range.map(|r| r.date_from),
        date_to: range.map(|r| r.date_to),
        bounds,
        summary,
        status_metrics: status_metrics(&daily_status),
        daily_orders,
        daily_status,
        hourly_cancellation,
    }
}

/// Distinct orders and revenue per purchase day within `[start_date, end_date]`.
///
/// Days without orders are not emitted.
pub fn aggregate_daily_totals(
    rows: &[OrderRecord],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> DailyOrdersView {
    let mut days: BTreeMap<NaiveDate, (HashSet<&str>, f64)> = BTreeMap::new();

    for row in rows {
        let date = row.purchase_date();
        if date < start_date || date > end_date {
            continue;
        }
        let (order_ids, revenue) = days.entry(date).or_insert_with(|| (HashSet::new(), 0.0));
        order_ids.insert(row.order_id.as_str());
        *revenue += row.price;
    }

    let rows = days
        .into_iter()
        .map(|(date, (order_ids, revenue))| DailyOrdersRow {
            date,
            order_count: order_ids.len() as u64,
            revenue,
        })
        .collect();

    DailyOrdersView { rows }
}

/// Distinct orders per (purchase day, status), pivoted to one column per status
pub fn aggregate_daily_status(rows: &[OrderRecord]) -> DailyStatusView {
    let mut statuses: BTreeSet<&str> = BTreeSet::new();
    let mut days: BTreeMap<NaiveDate, HashMap<&str, HashSet<&str>>> = BTreeMap::new();

    for row in rows {
        let status = row.order_status.as_str();
        statuses.insert(status);
        days.entry(row.purchase_date())
            .or_default()
            .entry(status)
            .or_default()
            .insert(row.order_id.as_str());
    }

    let rows = days
        .into_iter()
        .map(|(date, by_status)| DailyStatusRow {
            date,
            counts: statuses
                .iter()
                .map(|s| {
                    let count = by_status.get(s).map_or(0, |ids| ids.len() as u64);
                    (s.to_string(), count)
                })
                .collect(),
        })
        .collect();

    DailyStatusView {
        statuses: statuses.into_iter().map(str::to_string).collect(),
        rows,
    }
}

/// Row counts per status for each hour of day, with the share of canceled rows.
///
/// Always 24 rows; an hour without orders has a rate of 0.
pub fn aggregate_hourly_cancellation(rows: &[OrderRecord]) -> HourlyCancellationView {
    let mut statuses: BTreeSet<&str> = BTreeSet::new();
    let mut hours: [HashMap<&str, u64>; HOURS_PER_DAY] = std::array::from_fn(|_| HashMap::new());

    for row in rows {
        let status = row.order_status.as_str();
        statuses.insert(status);
        *hours[row.purchase_hour() as usize].entry(status).or_insert(0) += 1;
    }

    let rows = hours
        .iter()
        .enumerate()
        .map(|(hour, by_status)| {
            let counts: BTreeMap<String, u64> = statuses
                .iter()
                .map(|s| (s.to_string(), by_status.get(s).copied().unwrap_or(0)))
                .collect();
            let total: u64 = counts.values().sum();
            let canceled = counts.get(STATUS_CANCELED).copied().unwrap_or(0);

            HourlyCancellationRow {
                hour: hour as u32,
                label: hour_label(hour as u32),
                counts,
                total,
                cancellation_rate: cancellation_rate(canceled, total),
            }
        })
        .collect();

    HourlyCancellationView {
        statuses: statuses.into_iter().map(str::to_string).collect(),
        rows,
    }
}

fn cancellation_rate(canceled: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    canceled as f64 / total as f64 * 100.0
}

/// Total orders and revenue over the daily view
pub fn summarize(daily_orders: &DailyOrdersView, presentation: &PresentationConfig) -> OrderSummary {
    let total_revenue = daily_orders.total_revenue();
    OrderSummary {
        total_orders: daily_orders.total_orders(),
        total_revenue,
        currency_code: presentation.currency_code.clone(),
        total_revenue_formatted: format_currency(total_revenue, &presentation.currency_symbol),
    }
}

/// Cards for the fixed statuses; a status missing from the range is zero and unavailable
pub fn status_metrics(daily_status: &DailyStatusView) -> Vec<StatusMetric> {
    STATUS_CARDS
        .iter()
        .map(|status| StatusMetric {
            status: status.to_string(),
            count: daily_status.status_total(status),
            available: daily_status.has_status(status),
        })
        .collect()
}
