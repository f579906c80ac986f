use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::types::{PriceRequest, PriceTable};

/// Source of daily closing prices.
///
/// One call covers every ticker of the request and yields a single table
/// with one column per ticker, in request order.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch_closes(&self, request: &PriceRequest) -> ProviderResult<PriceTable>;
}
