//! Provider settings resolved from the environment.
//!
//! Everything has a working default; variables only override. `.env` files
//! are honored because `main` loads dotenv before anything reads here.

use std::time::Duration;

use tracing::warn;

/// HTTP settings for the chart provider
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ProviderConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://query1.finance.yahoo.com";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    // Yahoo rejects requests without a browser-looking User-Agent.
    pub const DEFAULT_USER_AGENT: &'static str =
        "Mozilla/5.0 (X11; Linux x86_64) histquote/0.1";

    /// Resolve settings from `HISTQUOTE_*` environment variables, falling
    /// back to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let base_url = std::env::var("HISTQUOTE_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        let user_agent = std::env::var("HISTQUOTE_USER_AGENT")
            .unwrap_or_else(|_| Self::DEFAULT_USER_AGENT.to_string());
        let timeout_secs = match std::env::var("HISTQUOTE_TIMEOUT_SECS") {
            Ok(raw) => Self::parse_timeout_secs(&raw).unwrap_or_else(|| {
                warn!(
                    "HISTQUOTE_TIMEOUT_SECS '{}' is not a positive integer, using {}",
                    raw,
                    Self::DEFAULT_TIMEOUT_SECS
                );
                Self::DEFAULT_TIMEOUT_SECS
            }),
            Err(_) => Self::DEFAULT_TIMEOUT_SECS,
        };

        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            user_agent,
        }
    }

    fn parse_timeout_secs(raw: &str) -> Option<u64> {
        match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Some(secs),
            _ => None,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
        }
    }
}
