use thiserror::Error;

/// Failures while talking to a market-data provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("request for {symbol} failed: {message}")]
    Request { symbol: String, message: String },

    #[error("provider returned HTTP {status} for {symbol}")]
    Status { symbol: String, status: u16 },

    #[error("failed to decode response for {symbol}: {message}")]
    Decode { symbol: String, message: String },

    #[error("provider error for {symbol}: {code} - {description}")]
    Upstream {
        symbol: String,
        code: String,
        description: String,
    },

    #[error("{0}")]
    Unavailable(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;
