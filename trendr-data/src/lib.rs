//! Market data retrieval for trendr: provider seam, Yahoo chart client and
//! the per-date close price table.

pub mod config;
pub mod error;
pub mod mock;
pub mod provider;
pub mod types;
pub mod yahoo;

pub use config::MarketDataConfig;
pub use error::{ProviderError, ProviderResult};
pub use mock::StaticProvider;
pub use provider::PriceProvider;
pub use types::{Adjustment, PriceRequest, PriceTable};
pub use yahoo::YahooChartProvider;
