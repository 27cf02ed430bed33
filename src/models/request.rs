//! Quote request model

/// A historical-quote request as taken from the command line.
///
/// Both dates are kept as the raw `YYYY-MM-DD` strings the caller supplied;
/// they are parsed at the provider boundary so a malformed value surfaces
/// as a provider error rather than a usage error.
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub ticker: String,
    /// Range start, inclusive
    pub start_date: String,
    /// Range end, exclusive
    pub end_date: String,
}
