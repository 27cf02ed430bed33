//! Price series models

use chrono::NaiveDate;

/// One trading day's closing price, as returned by the provider.
///
/// Points are never constructed or mutated outside the provider layer; the
/// rest of the program only formats them.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    /// Calendar date of the trading day, in the exchange's local time
    pub date: NaiveDate,
    /// Raw (unadjusted) closing price
    pub close: f64,
}
