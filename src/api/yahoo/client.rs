use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use reqwest::header::USER_AGENT;
use reqwest::{Client as HttpClient, StatusCode};
use tracing::debug;

use super::models::{ChartEnvelope, ChartResult};
use crate::api::{ProviderError, QuoteProvider};
use crate::config::ProviderConfig;
use crate::models::PricePoint;

/// Client for the Yahoo Finance v8 chart endpoint
pub struct YahooChartClient {
    http_client: HttpClient,
    base_url: String,
    user_agent: String,
}

impl YahooChartClient {
    /// Create a new chart client from provider settings
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let http_client = HttpClient::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    /// Map one chart response to the price series or a provider error.
    ///
    /// A parseable error envelope wins over the HTTP status; unknown
    /// tickers come back as 404 with a `chart.error` body. A non-success
    /// status without an envelope maps to `Status`, and a success response
    /// whose body does not match the chart schema maps to `Payload`.
    fn interpret_response(
        ticker: &str,
        status: StatusCode,
        body: String,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, ProviderError> {
        match serde_json::from_str::<ChartEnvelope>(&body) {
            Ok(envelope) => {
                if let Some(error) = envelope.chart.error {
                    return Err(ProviderError::Api {
                        ticker: ticker.to_string(),
                        code: error.code,
                        description: error.description,
                    });
                }
                if !status.is_success() {
                    return Err(ProviderError::Status {
                        status: status.as_u16(),
                        body,
                    });
                }
                let result = envelope
                    .chart
                    .result
                    .and_then(|mut results| {
                        if results.is_empty() {
                            None
                        } else {
                            Some(results.remove(0))
                        }
                    })
                    .ok_or_else(|| {
                        ProviderError::Payload("chart carried neither result nor error".to_string())
                    })?;
                Self::to_price_points(result, start, end)
            }
            Err(_) if !status.is_success() => Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            }),
            Err(err) => Err(ProviderError::Payload(format!(
                "unrecognized chart payload: {}",
                err
            ))),
        }
    }

    /// Unix timestamp of midnight UTC on `date`, the form the chart
    /// endpoint expects for `period1`/`period2`
    fn period(date: NaiveDate) -> i64 {
        date.and_time(NaiveTime::MIN).and_utc().timestamp()
    }

    /// Convert one result block into the price series, restricted to
    /// `start <= date < end`.
    ///
    /// Each bar timestamp is shifted by the exchange's `gmtoffset` before
    /// taking the calendar date, so bars land on the trading day the
    /// exchange assigns them rather than the UTC day. Bars with a null
    /// close (halted or untraded days) are skipped. The local range filter
    /// guarantees the half-open contract even when the provider returns a
    /// bar on the boundary.
    fn to_price_points(
        result: ChartResult,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, ProviderError> {
        let gmtoffset = result.meta.gmtoffset;
        let closes = result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|quote| quote.close)
            .unwrap_or_default();

        if !result.timestamp.is_empty() && closes.len() != result.timestamp.len() {
            return Err(ProviderError::Payload(format!(
                "close array length {} does not match {} timestamps",
                closes.len(),
                result.timestamp.len()
            )));
        }

        let mut points = Vec::with_capacity(result.timestamp.len());
        for (timestamp, close) in result.timestamp.into_iter().zip(closes) {
            let Some(close) = close else {
                debug!(timestamp, "skipping bar with null close");
                continue;
            };
            let Some(local) = DateTime::from_timestamp(timestamp + gmtoffset, 0) else {
                return Err(ProviderError::Payload(format!(
                    "bar timestamp {} out of range",
                    timestamp
                )));
            };
            let date = local.date_naive();
            if date >= start && date < end {
                points.push(PricePoint { date, close });
            }
        }
        Ok(points)
    }
}

#[async_trait]
impl QuoteProvider for YahooChartClient {
    async fn fetch_daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, ProviderError> {
        let url = format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d",
            self.base_url,
            ticker,
            Self::period(start),
            Self::period(end)
        );
        debug!(%ticker, %start, %end, "requesting daily chart");

        let response = self
            .http_client
            .get(&url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        Self::interpret_response(ticker, status, body, start, end)
    }
}
