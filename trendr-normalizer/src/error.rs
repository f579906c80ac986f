use thiserror::Error;
use trendr_data::ProviderError;

#[derive(Error, Debug)]
pub enum TrendError {
    /// The provider answered but had no rows for the window.
    #[error("No data found")]
    NoData,

    #[error(transparent)]
    Fetch(#[from] ProviderError),

    #[error("{0}")]
    Transform(String),
}

pub type TrendResult<T> = Result<T, TrendError>;
