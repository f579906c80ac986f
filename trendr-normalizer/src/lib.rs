//! Base-100 trend normalization of daily closing prices.

pub mod error;
pub mod fill;
pub mod normalize;
pub mod record;
pub mod service;
pub mod universe;

pub use error::{TrendError, TrendResult};
pub use normalize::{normalize, round2, NormalizedTable};
pub use record::{OutputRecord, DATE_FORMAT};
pub use service::TrendNormalizer;
pub use universe::{LookbackWindow, TickerSet, TECH_TICKERS};
