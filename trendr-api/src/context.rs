use tracing::{error, info, info_span, warn, Instrument};
use trendr_normalizer::{OutputRecord, TrendError, TrendNormalizer, TrendResult};
use uuid::Uuid;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct ApiContext {
    pub normalizer: TrendNormalizer,
}

impl ApiContext {
    pub fn new(normalizer: TrendNormalizer) -> Self {
        Self { normalizer }
    }

    pub async fn get_trends(&self) -> TrendResult<Vec<OutputRecord>> {
        let request_id = Uuid::new_v4();
        let span = info_span!("trends", %request_id, provider = self.normalizer.provider_name());
        async {
            match self.normalizer.get_trends().await {
                Ok(records) => {
                    info!(records = records.len(), "served trends");
                    Ok(records)
                }
                Err(TrendError::NoData) => {
                    warn!("provider returned no rows");
                    Err(TrendError::NoData)
                }
                Err(err) => {
                    error!(error = %err, "trend pipeline failed");
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}
