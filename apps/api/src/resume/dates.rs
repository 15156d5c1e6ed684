//! Month/year display formatting for resume entries.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("'{0}' is not a yyyy-MM date")]
pub struct DateError(pub String);

/// `"2023-01"` → `"Jan 2023"`.
pub fn format_display_date(value: &str) -> Result<String, DateError> {
    let value = value.trim();
    let parsed = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
        .map_err(|_| DateError(value.to_string()))?;
    Ok(parsed.format("%b %Y").to_string())
}

/// Formats `yyyy-MM` input; anything else (already formatted, "Summer 2019") is kept as-is.
pub fn normalize_display_date(value: &str) -> String {
    format_display_date(value).unwrap_or_else(|_| value.trim().to_string())
}
