//! Incoming form definitions for the intake endpoints.
//!
//! Each form is a permissive, all-optional mirror of the submitted fields;
//! converting it into its typed payload performs the required-field check
//! (enumerating every missing field), date parsing and domain validation.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

pub mod bookings;
pub mod requests;

/// Date formats accepted by intake endpoints, tried in this order. A string
/// valid under more than one format parses according to the first match.
pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];

/// A date string that matched none of the accepted formats.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid date format: {value}. Expected format: YYYY-MM-DD")]
pub struct DateParseError {
    pub value: String,
}

/// Parse a submitted date using the fixed [`DATE_FORMATS`] priority order.
pub fn parse_flexible_date(value: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| DateParseError {
            value: trimmed.to_string(),
        })
}

/// Deserialize an optional scalar that may arrive as a string, number or
/// bool. Empty strings and the literal `"null"` collapse to `None` so the
/// required-field check treats them as missing.
pub(crate) fn de_opt_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => {
            let trimmed = s.trim().to_string();
            if trimmed.is_empty() || trimmed == "null" {
                None
            } else {
                Some(trimmed)
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        other => Some(other.to_string()),
    }))
}
