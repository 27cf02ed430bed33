//! Argument surface and the run orchestration.
//!
//! The argument contract is deliberately primitive: three required
//! positionals, anything past the third ignored, no flags at all. Help and
//! version are disabled so `histquote --help` is just a one-argument
//! invocation and fails the same way any short invocation does.

use std::io::Write;

use clap::Parser;
use thiserror::Error;

use crate::api::{ProviderError, QuoteProvider};
use crate::models::QuoteRequest;
use crate::services::quote_service;

#[derive(Parser, Debug)]
#[command(name = "histquote", disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Exchange ticker symbol, e.g. AAPL
    #[arg(allow_hyphen_values = true)]
    pub ticker: String,
    /// Range start, YYYY-MM-DD, inclusive
    #[arg(allow_hyphen_values = true)]
    pub start_date: String,
    /// Range end, YYYY-MM-DD, exclusive
    #[arg(allow_hyphen_values = true)]
    pub end_date: String,
    /// Extra arguments are accepted and ignored
    #[arg(allow_hyphen_values = true, trailing_var_arg = true, hide = true)]
    pub rest: Vec<String>,
}

impl Args {
    pub fn to_request(&self) -> QuoteRequest {
        QuoteRequest {
            ticker: self.ticker.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

/// Failures past argument parsing
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetch the series for the parsed arguments and write it to `out`, one
/// `date:price` line per trading day. Generic over the provider and the
/// sink so the whole flow runs in tests without network or stdout.
pub async fn run<P, W>(provider: &P, args: &Args, out: &mut W) -> Result<(), RunError>
where
    P: QuoteProvider,
    W: Write,
{
    let points = quote_service::fetch_history(provider, &args.to_request()).await?;
    quote_service::write_series(out, &points)?;
    Ok(())
}
