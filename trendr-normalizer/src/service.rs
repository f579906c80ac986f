use std::sync::Arc;

use tracing::{debug, info};
use trendr_data::PriceProvider;

use crate::error::{TrendError, TrendResult};
use crate::normalize::normalize;
use crate::record::OutputRecord;
use crate::universe::{LookbackWindow, TickerSet};

/// Fetch, fill and rebase pipeline behind `/api/trends`.
///
/// Holds no mutable state; every call fetches afresh and builds its own
/// tables.
#[derive(Clone)]
pub struct TrendNormalizer {
    provider: Arc<dyn PriceProvider>,
    tickers: TickerSet,
    window: LookbackWindow,
}

impl TrendNormalizer {
    pub fn new(provider: Arc<dyn PriceProvider>) -> Self {
        Self {
            provider,
            tickers: TickerSet::tech(),
            window: LookbackWindow::ONE_MONTH_DAILY,
        }
    }

    pub fn tickers(&self) -> &TickerSet {
        &self.tickers
    }

    pub fn window(&self) -> LookbackWindow {
        self.window
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn get_trends(&self) -> TrendResult<Vec<OutputRecord>> {
        let request = self.window.request(&self.tickers);
        debug!(
            provider = self.provider.name(),
            tickers = ?request.tickers,
            period = %request.period,
            interval = %request.interval,
            "fetching closes"
        );
        let table = self.provider.fetch_closes(&request).await?;
        if table.is_empty() {
            return Err(TrendError::NoData);
        }
        if table.tickers() != self.tickers.symbols() {
            return Err(TrendError::Transform(format!(
                "provider returned columns {:?}, expected {:?}",
                table.tickers(),
                self.tickers.symbols()
            )));
        }

        let normalized = normalize(&table)?;
        info!(rows = normalized.len(), "normalized trends");
        Ok(normalized.records())
    }
}
