//! In-memory provider for tests and offline runs.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::PriceProvider;
use crate::types::{PriceRequest, PriceTable};

#[derive(Debug)]
enum Canned {
    Table(PriceTable),
    Failure(String),
}

/// Serves the same canned table (or failure) on every call.
#[derive(Debug)]
pub struct StaticProvider {
    canned: Canned,
    calls: AtomicUsize,
}

impl StaticProvider {
    pub fn with_table(table: PriceTable) -> Self {
        Self {
            canned: Canned::Table(table),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            canned: Canned::Failure(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_closes(&self, request: &PriceRequest) -> ProviderResult<PriceTable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.canned {
            Canned::Table(table) if table.is_empty() => Ok(PriceTable::new(request.tickers.clone())),
            Canned::Table(table) => Ok(table.clone()),
            Canned::Failure(message) => Err(ProviderError::Unavailable(message.clone())),
        }
    }
}
