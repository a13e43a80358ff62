//! Error types for tradingagents-core

use thiserror::Error;

/// Result type alias for tradingagents-core
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating input and assembling a run configuration
#[derive(Error, Debug)]
pub enum Error {
    /// Ticker symbol was empty after trimming
    #[error("Invalid ticker symbol: {0:?}")]
    InvalidTicker(String),

    /// Date did not match YYYY-MM-DD or is not a calendar date
    #[error("Invalid analysis date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A required selection came back empty
    #[error("No {0} selected")]
    EmptySelection(&'static str),

    /// Analyst role name not in the fixed roster
    #[error("Unknown analyst: {0}")]
    UnknownAnalyst(String),

    /// Research depth name or value not recognised
    #[error("Unknown research depth: {0}")]
    UnknownDepth(String),

    /// Provider key has no preset model table
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The external graph engine failed
    #[error("Graph engine error: {0}")]
    Graph(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptySelection("analysts");
        assert_eq!(err.to_string(), "No analysts selected");

        let err = Error::UnknownProvider("mistral".to_string());
        assert_eq!(err.to_string(), "Unknown provider: mistral");
    }
}
