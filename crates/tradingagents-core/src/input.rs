//! Validation of the free-text answers: ticker, date and base URL

use crate::error::{Error, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// Format the analysis date is entered and passed around in
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern compiles"));

/// Trim and upper-case a ticker symbol.
pub fn normalize_ticker(raw: &str) -> Result<String> {
    let ticker = raw.trim();
    if ticker.is_empty() {
        return Err(Error::InvalidTicker(raw.to_string()));
    }
    Ok(ticker.to_uppercase())
}

/// Parse a `YYYY-MM-DD` analysis date.
///
/// The shape is checked before parsing; chrono alone accepts unpadded fields.
pub fn parse_analysis_date(raw: &str) -> Result<NaiveDate> {
    let date = raw.trim();
    if !DATE_SHAPE.is_match(date) {
        return Err(Error::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| Error::InvalidDate(raw.to_string()))
}

/// Check that a base URL is an absolute http(s) URL and return it trimmed.
pub fn validate_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let url = url::Url::parse(trimmed)
        .map_err(|e| Error::InvalidConfig(format!("backend URL {trimmed:?}: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(Error::InvalidConfig(format!(
            "backend URL {trimmed:?}: unsupported scheme {other}"
        ))),
    }
}
