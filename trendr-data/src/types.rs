use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Price adjustment applied by the provider.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Adjustment {
    /// Split and dividend adjusted closes.
    Auto,
    Raw,
}

impl Default for Adjustment {
    fn default() -> Self {
        Adjustment::Auto
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceRequest {
    pub tickers: Vec<String>,
    pub period: String,
    pub interval: String,
    pub adjustment: Adjustment,
}

impl PriceRequest {
    pub fn new(
        tickers: impl IntoIterator<Item = impl Into<String>>,
        period: impl Into<String>,
        interval: impl Into<String>,
    ) -> Self {
        Self {
            tickers: tickers.into_iter().map(Into::into).collect(),
            period: period.into(),
            interval: interval.into(),
            adjustment: Adjustment::default(),
        }
    }
}

/// Closing prices keyed by trading date, one column per ticker.
///
/// Dates are unique and iterate in ascending order. Cells are `None` where a
/// ticker has no bar for that date.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceTable {
    tickers: Vec<String>,
    rows: BTreeMap<NaiveDate, Vec<Option<f64>>>,
}

impl PriceTable {
    pub fn new(tickers: Vec<String>) -> Self {
        Self {
            tickers,
            rows: BTreeMap::new(),
        }
    }

    /// Builds a table from complete rows. Rows whose width does not match the
    /// ticker count are padded with (or truncated to) missing cells.
    pub fn from_rows(
        tickers: Vec<String>,
        rows: impl IntoIterator<Item = (NaiveDate, Vec<Option<f64>>)>,
    ) -> Self {
        let width = tickers.len();
        let rows = rows
            .into_iter()
            .map(|(date, mut cells)| {
                cells.resize(width, None);
                (date, cells)
            })
            .collect();
        Self { tickers, rows }
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Records a close for `ticker` on `date`. Non-finite prices are stored as
    /// missing. Returns `false` when the ticker is not a column of the table.
    pub fn set_close(&mut self, date: NaiveDate, ticker: &str, close: f64) -> bool {
        let Some(column) = self.tickers.iter().position(|t| t == ticker) else {
            return false;
        };
        let width = self.tickers.len();
        let row = self.rows.entry(date).or_insert_with(|| vec![None; width]);
        row[column] = close.is_finite().then_some(close);
        true
    }

    pub fn rows(&self) -> impl Iterator<Item = (&NaiveDate, &[Option<f64>])> {
        self.rows.iter().map(|(date, cells)| (date, cells.as_slice()))
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.rows.keys()
    }

    pub fn column(&self, index: usize) -> Vec<Option<f64>> {
        self.rows
            .values()
            .map(|cells| cells.get(index).copied().flatten())
            .collect()
    }

    /// Removes dates on which no ticker has a price.
    pub fn drop_empty_rows(&mut self) {
        self.rows.retain(|_, cells| cells.iter().any(Option::is_some));
    }
}
