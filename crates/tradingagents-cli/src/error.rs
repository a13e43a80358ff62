//! Error types for the CLI

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

/// Every variant ends the process with status 1
#[derive(Debug, Error)]
pub enum CliError {
    /// A free-text answer was left empty or cancelled
    #[error("No {0} provided")]
    NotProvided(&'static str),

    /// A menu was dismissed without a choice
    #[error("No {0} selected")]
    NotSelected(&'static str),

    /// Terminal I/O failed
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Core(#[from] tradingagents_core::Error),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(CliError::NotProvided("ticker symbol").to_string(), "No ticker symbol provided");
        assert_eq!(CliError::NotSelected("LLM provider").to_string(), "No LLM provider selected");

        let core = CliError::from(tradingagents_core::Error::EmptySelection("analysts"));
        assert_eq!(core.to_string(), "No analysts selected");
    }
}
