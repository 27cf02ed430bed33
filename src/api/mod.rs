//! Provider boundary: the capability interface the rest of the program
//! depends on, and the error taxonomy everything behind it maps into.

pub mod yahoo;

pub use yahoo::YahooChartClient;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::PricePoint;

/// Errors surfaced by the provider boundary
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider rejected '{ticker}' ({code}): {description}")]
    Api {
        ticker: String,
        code: String,
        description: String,
    },
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed provider response: {0}")]
    Payload(String),
}

/// A source of historical daily closing prices.
///
/// The range is half-open: `start` is included, `end` is not. The returned
/// series is ordered ascending by date, as the provider returns it.
#[async_trait]
pub trait QuoteProvider {
    async fn fetch_daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, ProviderError>;
}

/// Parse a request date string at the boundary. A malformed value maps to
/// `ProviderError::InvalidDate` before any network activity happens.
pub fn parse_request_date(value: &str) -> Result<NaiveDate, ProviderError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ProviderError::InvalidDate {
        value: value.to_string(),
    })
}
