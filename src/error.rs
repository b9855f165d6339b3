//! Error types for the ticker.

use thiserror::Error;

/// The main error type for tickerbar.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level HTTP errors (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The quote provider answered 429 for a symbol
    #[error("rate limited (429) while fetching {symbol}")]
    RateLimited { symbol: String },

    /// The quote provider answered with a non-success status
    #[error("quote request for {symbol} failed with status {status}")]
    Status { symbol: String, status: u16 },

    /// The chart payload did not have the expected shape
    #[error("malformed chart data for {symbol}: {reason}")]
    MalformedResponse { symbol: String, reason: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// Generic application error
    #[error("{0}")]
    Application(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl From<::config::ConfigError> for Error {
    fn from(err: ::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl Error {
    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a new malformed-response error for a symbol.
    pub fn malformed(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Create a new application error.
    pub fn application(msg: impl Into<String>) -> Self {
        Self::Application(msg.into())
    }

    /// Check if this error is the provider's rate-limit signal.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_error() {
        let err = Error::RateLimited {
            symbol: "AAPL".into(),
        };
        assert!(err.is_rate_limited());
        assert_eq!(err.to_string(), "rate limited (429) while fetching AAPL");
    }

    #[test]
    fn test_other_errors_are_not_rate_limits() {
        assert!(!Error::config("bad").is_rate_limited());
        let err = Error::malformed("MSFT", "no result");
        assert!(!err.is_rate_limited());
        assert_eq!(err.to_string(), "malformed chart data for MSFT: no result");
    }
}
