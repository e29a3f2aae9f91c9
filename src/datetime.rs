//! Date/time utilities for Corkboard.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::{CorkboardError, Result};

/// A value that can be assigned as an entity timestamp.
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampInput {
    /// Milliseconds since the Unix epoch. Must be non-negative.
    EpochMillis(i64),
    /// An RFC 3339 datetime, an ISO date, or one of the generic layouts.
    Text(String),
    /// An already parsed instant.
    At(DateTime<Utc>),
}

impl From<i64> for TimestampInput {
    fn from(millis: i64) -> Self {
        TimestampInput::EpochMillis(millis)
    }
}

impl From<&str> for TimestampInput {
    fn from(s: &str) -> Self {
        TimestampInput::Text(s.to_string())
    }
}

impl From<String> for TimestampInput {
    fn from(s: String) -> Self {
        TimestampInput::Text(s)
    }
}

impl From<DateTime<Utc>> for TimestampInput {
    fn from(dt: DateTime<Utc>) -> Self {
        TimestampInput::At(dt)
    }
}

/// Resolve a timestamp input to a UTC instant.
pub fn parse_timestamp(input: TimestampInput) -> Result<DateTime<Utc>> {
    match input {
        TimestampInput::At(dt) => Ok(dt),
        TimestampInput::EpochMillis(millis) => from_epoch_millis(millis),
        TimestampInput::Text(text) => parse_text(&text),
    }
}

/// Convert epoch milliseconds to a UTC instant.
pub fn from_epoch_millis(millis: i64) -> Result<DateTime<Utc>> {
    if millis < 0 {
        return Err(CorkboardError::Validation(format!(
            "timestamp must not be negative: {millis}"
        )));
    }
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| CorkboardError::Validation(format!("timestamp out of range: {millis}")))
}

fn parse_text(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    // Space-separated layout, assumed UTC
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Bare digits are epoch milliseconds
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(millis) = text.parse::<i64>() {
            return from_epoch_millis(millis);
        }
    }

    Err(CorkboardError::Validation(format!(
        "not a recognizable timestamp: {text:?}"
    )))
}

/// Epoch milliseconds of an instant, used for default ids.
pub fn to_epoch_millis(dt: &DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}
