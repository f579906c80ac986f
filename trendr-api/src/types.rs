use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use trendr_normalizer::TrendError;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDto {
    pub detail: String,
}

/// Maps pipeline failures onto HTTP: missing data is 404, anything else 500.
#[derive(Debug)]
pub struct ApiError(pub TrendError);

impl From<TrendError> for ApiError {
    fn from(value: TrendError) -> Self {
        Self(value)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            TrendError::NoData => StatusCode::NOT_FOUND,
            TrendError::Fetch(_) | TrendError::Transform(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorDto {
            detail: self.0.to_string(),
        })
    }
}
