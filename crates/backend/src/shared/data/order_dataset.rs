use chrono::{NaiveDate, NaiveDateTime, Timelike};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

const COL_ORDER_ID: &str = "order_id";
const COL_PURCHASE_TIMESTAMP: &str = "order_purchase_timestamp";
const COL_DELIVERED_DATE: &str = "order_delivered_customer_date";
const COL_PRICE: &str = "price";
const COL_STATUS: &str = "order_status";

/// Accepted timestamp layouts, tried in order
const TIMESTAMP_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Cannot open dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Required column not found: {0}")]
    MissingColumn(&'static str),

    #[error("Line {line}: invalid timestamp in {column}: {value:?}")]
    InvalidTimestamp {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Line {line}: invalid price: {value:?}")]
    InvalidPrice { line: u64, value: String },
}

/// One order line item of the cleaned dataset
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub order_id: String,
    pub order_purchase_timestamp: NaiveDateTime,
    pub order_delivered_customer_date: Option<NaiveDateTime>,
    pub price: f64,
    pub order_status: String,
}

impl OrderRecord {
    /// Calendar day bucket of the purchase
    pub fn purchase_date(&self) -> NaiveDate {
        self.order_purchase_timestamp.date()
    }

    /// Hour-of-day bucket of the purchase, 0..=23
    pub fn purchase_hour(&self) -> u32 {
        self.order_purchase_timestamp.hour()
    }
}

/// In-memory order table, sorted by purchase timestamp ascending.
///
/// Read-only once built; every derived view is computed from slices of it.
#[derive(Debug, Clone, Default)]
pub struct OrderDataset {
    rows: Vec<OrderRecord>,
}

impl OrderDataset {
    pub fn from_records(mut rows: Vec<OrderRecord>) -> Self {
        rows.sort_by_key(|r| r.order_purchase_timestamp);
        Self { rows }
    }

    /// Load the dataset from a CSV file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let dataset = Self::from_reader(file)?;

        match dataset.date_bounds() {
            Some((min_date, max_date)) => tracing::info!(
                "Loaded {} order rows from {} ({} .. {})",
                dataset.len(),
                path.display(),
                min_date,
                max_date
            ),
            None => tracing::warn!("Dataset {} contains no order rows", path.display()),
        }

        Ok(dataset)
    }

    /// Parse CSV with a header row. Extra columns are ignored.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let columns = ColumnIndex::from_headers(&headers)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            rows.push(columns.parse_record(&record, line)?);
        }

        tracing::debug!("Parsed {} CSV records", rows.len());
        Ok(Self::from_records(rows))
    }

    pub fn rows(&self) -> &[OrderRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Observed (min, max) purchase date
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.rows.first()?;
        let last = self.rows.last()?;
        Some((first.purchase_date(), last.purchase_date()))
    }

    /// Rows purchased within `[start, end]`, inclusive at day granularity.
    /// An inverted range yields an empty slice.
    pub fn filter_by_date(&self, start: NaiveDate, end: NaiveDate) -> &[OrderRecord] {
        if start > end {
            return &[];
        }
        let lo = self.rows.partition_point(|r| r.purchase_date() < start);
        let hi = self.rows.partition_point(|r| r.purchase_date() <= end);
        &self.rows[lo..hi]
    }
}

/// Positions of the required columns in the header row
struct ColumnIndex {
    order_id: usize,
    purchase_timestamp: usize,
    delivered_date: usize,
    price: usize,
    status: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DatasetError> {
        let find = |name: &'static str| -> Result<usize, DatasetError> {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{FEFF}').trim().eq_ignore_ascii_case(name))
                .ok_or(DatasetError::MissingColumn(name))
        };

        Ok(Self {
            order_id: find(COL_ORDER_ID)?,
            purchase_timestamp: find(COL_PURCHASE_TIMESTAMP)?,
            delivered_date: find(COL_DELIVERED_DATE)?,
            price: find(COL_PRICE)?,
            status: find(COL_STATUS)?,
        })
    }

    fn parse_record(&self, record: &csv::StringRecord, line: u64) -> Result<OrderRecord, DatasetError> {
        let field = |i: usize| record.get(i).map(str::trim).unwrap_or("");

        let purchase_raw = field(self.purchase_timestamp);
        let order_purchase_timestamp =
            parse_timestamp(purchase_raw).ok_or_else(|| DatasetError::InvalidTimestamp {
                line,
                column: COL_PURCHASE_TIMESTAMP,
                value: purchase_raw.to_string(),
            })?;

        let delivered_raw = field(self.delivered_date);
        let order_delivered_customer_date = if delivered_raw.is_empty() {
            None
        } else {
            Some(
                parse_timestamp(delivered_raw).ok_or_else(|| DatasetError::InvalidTimestamp {
                    line,
                    column: COL_DELIVERED_DATE,
                    value: delivered_raw.to_string(),
                })?,
            )
        };

        let price_raw = field(self.price);
        let price = price_raw
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| DatasetError::InvalidPrice {
                line,
                value: price_raw.to_string(),
            })?;

        Ok(OrderRecord {
            order_id: field(self.order_id).to_string(),
            order_purchase_timestamp,
            order_delivered_customer_date,
            price,
            order_status: field(self.status).to_string(),
        })
    }
}

/// Parses a timestamp cell; a bare date means midnight
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
