//! Fetch a historical series through the provider trait and render it as
//! `date:price` lines.

use std::io::{self, Write};

use tracing::debug;

use crate::api::{self, ProviderError, QuoteProvider};
use crate::models::{PricePoint, QuoteRequest};

/// Parse the request dates and fetch the daily close series for the
/// half-open range `[start_date, end_date)`.
pub async fn fetch_history<P: QuoteProvider>(
    provider: &P,
    request: &QuoteRequest,
) -> Result<Vec<PricePoint>, ProviderError> {
    let start = api::parse_request_date(&request.start_date)?;
    let end = api::parse_request_date(&request.end_date)?;
    debug!(ticker = %request.ticker, %start, %end, "fetching history");
    provider.fetch_daily_closes(&request.ticker, start, end).await
}

/// Render one point as `YYYY-MM-DD:D.DD`. The date format is fixed and
/// locale-independent; the close always carries two digits after the
/// decimal point. This line shape is a wire contract for downstream
/// `:`-splitting consumers.
pub fn format_close_line(point: &PricePoint) -> String {
    format!("{}:{:.2}", point.date.format("%Y-%m-%d"), point.close)
}

/// Write the series in its existing order, one line per point. An empty
/// series writes nothing.
pub fn write_series<W: Write>(out: &mut W, points: &[PricePoint]) -> io::Result<()> {
    for point in points {
        writeln!(out, "{}", format_close_line(point))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn point(y: i32, m: u32, d: u32, close: f64) -> PricePoint {
        PricePoint {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            close,
        }
    }

    /// Deterministic stand-in for the chart client
    struct FakeProvider {
        series: Vec<PricePoint>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn returning(series: Vec<PricePoint>) -> Self {
            Self {
                series,
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                series: Vec::new(),
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl QuoteProvider for FakeProvider {
        async fn fetch_daily_closes(
            &self,
            ticker: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<PricePoint>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ProviderError::Api {
                    ticker: ticker.to_string(),
                    code: "Not Found".to_string(),
                    description: "No data found, symbol may be delisted".to_string(),
                });
            }
            Ok(self.series.clone())
        }
    }

    fn request(ticker: &str, start: &str, end: &str) -> QuoteRequest {
        QuoteRequest {
            ticker: ticker.to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
        }
    }

    #[test]
    fn test_format_close_line_two_decimals() {
        assert_eq!(
            format_close_line(&point(2023, 1, 3, 125.07)),
            "2023-01-03:125.07"
        );
        assert_eq!(format_close_line(&point(2023, 1, 3, 1.5)), "2023-01-03:1.50");
        assert_eq!(format_close_line(&point(2023, 1, 3, 2.0)), "2023-01-03:2.00");
        assert_eq!(format_close_line(&point(2023, 1, 3, 0.1)), "2023-01-03:0.10");
        assert_eq!(
            format_close_line(&point(2023, 1, 3, 3.14159)),
            "2023-01-03:3.14"
        );
    }

    #[test]
    fn test_format_date_zero_padded() {
        assert_eq!(format_close_line(&point(999, 2, 9, 1.0)), "0999-02-09:1.00");
    }

    #[test]
    fn test_write_series_preserves_order() {
        let points = vec![point(2023, 1, 3, 125.07), point(2023, 1, 4, 126.36)];
        let mut out = Vec::new();
        write_series(&mut out, &points).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "2023-01-03:125.07\n2023-01-04:126.36\n"
        );
    }

    #[test]
    fn test_write_empty_series_writes_nothing() {
        let mut out = Vec::new();
        write_series(&mut out, &[]).unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_history_delegates_to_provider() {
        let provider = FakeProvider::returning(vec![point(2023, 1, 3, 125.07)]);
        let points = fetch_history(&provider, &request("AAPL", "2023-01-03", "2023-01-05"))
            .await
            .unwrap();
        assert_eq!(points, vec![point(2023, 1, 3, 125.07)]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_history_rejects_malformed_date_before_calling() {
        let provider = FakeProvider::returning(vec![point(2023, 1, 3, 125.07)]);
        let err = fetch_history(&provider, &request("AAPL", "not-a-date", "2023-01-05"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidDate { .. }));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_history_propagates_provider_error() {
        let provider = FakeProvider::failing();
        let err = fetch_history(&provider, &request("ZZZZINVALID", "2023-01-03", "2023-01-05"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Api { .. }));
    }
}
