use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};
use trendr_net::{build_http_client, NetProfile};

use crate::config::MarketDataConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::provider::PriceProvider;
use crate::types::{Adjustment, PriceRequest, PriceTable};

/// Daily bars from the Yahoo Finance v8 chart endpoint.
///
/// The endpoint serves one symbol per request, so a batch is fetched ticker
/// by ticker over the same client and merged into one table.
#[derive(Clone)]
pub struct YahooChartProvider {
    client: Client,
    base_url: String,
}

impl fmt::Debug for YahooChartProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YahooChartProvider")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl YahooChartProvider {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &MarketDataConfig, net_profile: &NetProfile) -> Result<Self> {
        let client = build_http_client(net_profile)?;
        Ok(Self::new(client, config.base_url.clone()))
    }

    async fn fetch_series(
        &self,
        symbol: &str,
        request: &PriceRequest,
    ) -> ProviderResult<Vec<(NaiveDate, f64)>> {
        let url = format!("{}/{}", self.base_url, symbol);
        debug!(%url, period = %request.period, interval = %request.interval, "requesting chart");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("range", request.period.as_str()),
                ("interval", request.interval.as_str()),
                ("includeAdjustedClose", "true"),
            ])
            .send()
            .await
            .map_err(|err| ProviderError::Request {
                symbol: symbol.to_string(),
                message: err.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| ProviderError::Request {
            symbol: symbol.to_string(),
            message: err.to_string(),
        })?;

        // Unknown symbols come back as 404 with a chart.error object, which is
        // more useful than the bare status.
        match parse_chart(symbol, &body, request.adjustment) {
            Err(err @ ProviderError::Upstream { .. }) => Err(err),
            _ if !status.is_success() => Err(ProviderError::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            }),
            other => other,
        }
    }
}

#[async_trait]
impl PriceProvider for YahooChartProvider {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch_closes(&self, request: &PriceRequest) -> ProviderResult<PriceTable> {
        let mut table = PriceTable::new(request.tickers.clone());
        for symbol in &request.tickers {
            let series = self.fetch_series(symbol, request).await?;
            if series.is_empty() {
                warn!(%symbol, "chart returned no bars");
            }
            for (date, close) in series {
                table.set_close(date, symbol, close);
            }
        }
        table.drop_empty_rows();
        info!(
            tickers = request.tickers.len(),
            rows = table.len(),
            "fetched daily closes"
        );
        Ok(table)
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
    adjclose: Option<Vec<AdjCloseSeries>>,
}

#[derive(Debug, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseSeries {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

fn covers(adjclose: &[Option<f64>], closes: &[Option<f64>], bars: usize) -> bool {
    let present = |series: &[Option<f64>], i: usize| series.get(i).copied().flatten().is_some();
    (0..bars).all(|i| !present(closes, i) || present(adjclose, i))
}

/// Decodes a chart response body into `(trading date, close)` pairs.
///
/// Bar timestamps are shifted by the exchange `gmtoffset` before taking the
/// date. Bars without a close are skipped. With [`Adjustment::Auto`] the
/// adjusted series is used when it has a value for every raw close,
/// otherwise the whole series falls back to raw closes.
pub fn parse_chart(
    symbol: &str,
    body: &str,
    adjustment: Adjustment,
) -> ProviderResult<Vec<(NaiveDate, f64)>> {
    let decode_err = |message: String| ProviderError::Decode {
        symbol: symbol.to_string(),
        message,
    };

    let envelope: ChartEnvelope =
        serde_json::from_str(body).map_err(|err| decode_err(err.to_string()))?;

    if let Some(error) = envelope.chart.error {
        return Err(ProviderError::Upstream {
            symbol: symbol.to_string(),
            code: error.code,
            description: error.description,
        });
    }

    let result = envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| decode_err("chart result missing".to_string()))?;

    let Some(timestamps) = result.timestamp else {
        return Ok(Vec::new());
    };

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();
    // One series per column: adjusted closes only when they cover every bar
    // that has a raw close.
    let adjusted = match adjustment {
        Adjustment::Auto => result
            .indicators
            .adjclose
            .and_then(|series| series.into_iter().next())
            .map(|series| series.adjclose)
            .filter(|adjclose| covers(adjclose, &closes, timestamps.len())),
        Adjustment::Raw => None,
    };
    let selected = adjusted.unwrap_or(closes);

    let mut out = Vec::with_capacity(timestamps.len());
    for (i, ts) in timestamps.iter().enumerate() {
        let Some(close) = selected.get(i).copied().flatten() else {
            continue;
        };
        let date = ts
            .checked_add(result.meta.gmtoffset)
            .and_then(|local| DateTime::from_timestamp(local, 0))
            .ok_or_else(|| decode_err(format!("invalid timestamp {ts}")))?
            .date_naive();
        out.push((date, close));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-02 14:30 UTC and 2024-01-03 14:30 UTC, New York offset.
    const BODY: &str = r#"{"chart":{"result":[{"meta":{"symbol":"AAPL","gmtoffset":-18000},
        "timestamp":[1704205800,1704292200,1704378600],
        "indicators":{"quote":[{"close":[185.64,184.25,null]}],
        "adjclose":[{"adjclose":[184.9,183.52,null]}]}}],"error":null}}"#;

    #[test]
    fn prefers_adjusted_close_and_skips_missing_bars() {
        let series = parse_chart("AAPL", BODY, Adjustment::Auto).unwrap();
        assert_eq!(
            series,
            vec![
                (NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 184.9),
                (NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), 183.52),
            ]
        );
    }

    #[test]
    fn partial_adjusted_series_falls_back_to_raw_closes() {
        let body = r#"{"chart":{"result":[{"meta":{"gmtoffset":-18000},
            "timestamp":[1704205800,1704292200],
            "indicators":{"quote":[{"close":[200.0,202.0]}],
            "adjclose":[{"adjclose":[100.0,null]}]}}],"error":null}}"#;
        let series = parse_chart("AAPL", body, Adjustment::Auto).unwrap();
        assert_eq!(
            series,
            vec![
                (NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 200.0),
                (NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), 202.0),
            ]
        );
    }

    #[test]
    fn overflowing_timestamp_is_a_decode_error() {
        let body = r#"{"chart":{"result":[{"meta":{"gmtoffset":-18000},
            "timestamp":[-9223372036854775800],
            "indicators":{"quote":[{"close":[1.0]}]}}],"error":null}}"#;
        let err = parse_chart("AAPL", body, Adjustment::Auto).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Decode { ref message, .. } if message.contains("invalid timestamp")
        ));
    }

    #[test]
    fn raw_adjustment_uses_plain_close() {
        let series = parse_chart("AAPL", BODY, Adjustment::Raw).unwrap();
        assert_eq!(series[0].1, 185.64);
    }

    #[test]
    fn upstream_error_is_reported() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_chart("ZZZZ", body, Adjustment::Auto).unwrap_err();
        assert!(matches!(err, ProviderError::Upstream { ref code, .. } if code == "Not Found"));
        assert!(err.to_string().contains("symbol may be delisted"));
    }

    #[test]
    fn missing_timestamps_mean_no_bars() {
        let body = r#"{"chart":{"result":[{"meta":{"gmtoffset":0},"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert!(parse_chart("AAPL", body, Adjustment::Auto)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        let err = parse_chart("AAPL", "<html>", Adjustment::Auto).unwrap_err();
        assert!(matches!(err, ProviderError::Decode { .. }));
    }
}
