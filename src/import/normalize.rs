//! Field Normalizer
//!
//! Converts the free-text `date` and `amount` columns of an expense CSV into
//! canonical values: an ISO-8601 UTC timestamp and a finite `f64`.

use super::error::NormalizeError;
use super::validator::ExpenseDraft;
use crate::api::NewExpense;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

/// Date-time layouts without an offset, read as UTC
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts, read as UTC midnight.
/// Month-first comes before day-first; "31/12/2024" still resolves through
/// the day-first fallback because month 31 does not exist.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y"];

/// Parse a date string permissively into a UTC instant
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>, NormalizeError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(NormalizeError::InvalidDate(raw.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date.and_time(NaiveTime::MIN).and_utc());
        }
    }

    Err(NormalizeError::InvalidDate(raw.to_string()))
}

/// Normalize a date string to `YYYY-MM-DDTHH:MM:SS.sssZ`
pub fn normalize_date(raw: &str) -> Result<String, NormalizeError> {
    parse_date(raw).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Parse a locale-formatted currency amount ("R$ 1.234,56", "12,5", "1234")
///
/// Everything except digits, `,` and `.` is dropped first. When both
/// separators appear, whichever comes last is the decimal point. A lone comma
/// is always decimal. A lone period is decimal only when exactly two digits
/// follow it, otherwise periods are thousands separators.
pub fn parse_amount(raw: &str) -> Result<f64, NormalizeError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let decimal_at = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(dot)) => Some(comma.max(dot)),
        (Some(comma), None) => Some(comma),
        (None, Some(dot)) => {
            let tail = &cleaned[dot + 1..];
            let single = cleaned.matches('.').count() == 1;
            (single && tail.len() == 2).then_some(dot)
        }
        (None, None) => None,
    };

    let mut canonical = String::with_capacity(cleaned.len());
    for (idx, c) in cleaned.char_indices() {
        if c.is_ascii_digit() {
            canonical.push(c);
        } else if Some(idx) == decimal_at {
            canonical.push('.');
        }
    }

    if !canonical.bytes().any(|b| b.is_ascii_digit()) {
        return Err(NormalizeError::InvalidAmount(raw.to_string()));
    }

    match canonical.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(NormalizeError::InvalidAmount(raw.to_string())),
    }
}

/// Turn a validated draft into the payload posted to the backend
pub fn normalize_draft(draft: &ExpenseDraft) -> Result<NewExpense, NormalizeError> {
    let date = normalize_date(&draft.date_text)?;
    let amount = parse_amount(&draft.amount_text)?;

    Ok(NewExpense {
        description: draft.description.clone(),
        amount,
        date,
    })
}
