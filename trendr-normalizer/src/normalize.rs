use chrono::NaiveDate;
use trendr_data::PriceTable;

use crate::error::{TrendError, TrendResult};
use crate::fill::fill_gaps;
use crate::record::OutputRecord;

/// Rounds to two decimals, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Prices rebased so every column starts at exactly 100.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedTable {
    tickers: Vec<String>,
    dates: Vec<NaiveDate>,
    // column-major, same order as `tickers`
    columns: Vec<Vec<f64>>,
}

impl NormalizedTable {
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn column(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.columns.get(column)?.get(row).copied()
    }

    pub fn records(&self) -> Vec<OutputRecord> {
        self.dates
            .iter()
            .enumerate()
            .map(|(row, date)| {
                let values = self
                    .tickers
                    .iter()
                    .zip(&self.columns)
                    .map(|(ticker, column)| (ticker.clone(), column[row]))
                    .collect();
                OutputRecord::new(*date, values)
            })
            .collect()
    }
}

/// Fills gaps per ticker and rebases each column on its first row:
/// `round2(price / first * 100)`.
pub fn normalize(table: &PriceTable) -> TrendResult<NormalizedTable> {
    if table.is_empty() {
        return Err(TrendError::Transform(
            "cannot normalize an empty price table".to_string(),
        ));
    }

    let mut columns = Vec::with_capacity(table.tickers().len());
    for (index, ticker) in table.tickers().iter().enumerate() {
        let filled = fill_gaps(table.column(index)).ok_or_else(|| {
            TrendError::Transform(format!("no closing prices for {ticker}"))
        })?;
        let base = filled[0];
        if !base.is_finite() || base <= 0.0 {
            return Err(TrendError::Transform(format!(
                "invalid base price {base} for {ticker}"
            )));
        }
        columns.push(
            filled
                .iter()
                .map(|price| round2(price / base * 100.0))
                .collect(),
        );
    }

    Ok(NormalizedTable {
        tickers: table.tickers().to_vec(),
        dates: table.dates().copied().collect(),
        columns,
    })
}
