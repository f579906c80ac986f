use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Short month-day label used for chart axes, e.g. `Jan 05`.
pub const DATE_FORMAT: &str = "%b %d";

/// One chart point: the formatted date followed by a value per ticker.
///
/// Serializes as a flat JSON object with `Date` first and tickers in table
/// order.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputRecord {
    date: String,
    values: Vec<(String, f64)>,
}

impl OutputRecord {
    pub fn new(date: NaiveDate, values: Vec<(String, f64)>) -> Self {
        Self {
            date: date.format(DATE_FORMAT).to_string(),
            values,
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn values(&self) -> &[(String, f64)] {
        &self.values
    }

    pub fn get(&self, ticker: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(t, _)| t == ticker)
            .map(|(_, value)| *value)
    }
}

impl Serialize for OutputRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("Date", &self.date)?;
        for (ticker, value) in &self.values {
            map.serialize_entry(ticker, value)?;
        }
        map.end()
    }
}
