use trendr_data::{Adjustment, PriceRequest};

pub const TECH_TICKERS: [&str; 5] = ["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"];

/// Ordered set of symbols tracked by the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickerSet(Vec<String>);

impl TickerSet {
    pub fn tech() -> Self {
        Self(TECH_TICKERS.iter().map(|s| s.to_string()).collect())
    }

    pub fn symbols(&self) -> &[String] {
        &self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LookbackWindow {
    pub period: &'static str,
    pub interval: &'static str,
    pub adjustment: Adjustment,
}

impl LookbackWindow {
    pub const ONE_MONTH_DAILY: LookbackWindow = LookbackWindow {
        period: "1mo",
        interval: "1d",
        adjustment: Adjustment::Auto,
    };

    pub fn request(&self, tickers: &TickerSet) -> PriceRequest {
        PriceRequest {
            tickers: tickers.symbols().to_vec(),
            period: self.period.to_string(),
            interval: self.interval.to_string(),
            adjustment: self.adjustment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_keeps_ticker_order() {
        let request = LookbackWindow::ONE_MONTH_DAILY.request(&TickerSet::tech());
        assert_eq!(request.tickers, TECH_TICKERS);
        assert_eq!(request.period, "1mo");
        assert_eq!(request.interval, "1d");
        assert_eq!(request.adjustment, Adjustment::Auto);
    }
}
