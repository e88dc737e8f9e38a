//! Field parsing for raw storm event rows
//!
//! Every input column is read as text; these helpers apply the field
//! policy: blank numbers are zero, unusable numbers are zero and flagged,
//! unparseable dates are `None`.

use crate::constants::{DATE_FORMATS, DATETIME_FORMATS};
use chrono::{NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\W_]+").expect("word pattern is valid"));

/// Outcome of parsing a numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericField<T> {
    /// Absent or empty
    Blank,
    Value(T),
    /// Present but not a usable non-negative number
    Invalid,
}

impl<T: Default> NumericField<T> {
    pub fn or_zero(self) -> T {
        match self {
            NumericField::Value(value) => value,
            NumericField::Blank | NumericField::Invalid => T::default(),
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, NumericField::Invalid)
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a begin or end date in any of the accepted layouts
pub fn parse_event_time(raw: Option<&str>) -> Option<NaiveDateTime> {
    let value = non_blank(raw)?;

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Parse a non-negative whole count, accepting decimal text such as `"3.00"`
pub fn parse_count(raw: Option<&str>) -> NumericField<u64> {
    let Some(value) = non_blank(raw) else {
        return NumericField::Blank;
    };

    if let Ok(count) = value.parse::<u64>() {
        return NumericField::Value(count);
    }

    match value.parse::<f64>() {
        // u64::MAX as f64 rounds up to 2^64, which does not fit
        Ok(count)
            if count.is_finite()
                && count >= 0.0
                && count.fract() == 0.0
                && count < u64::MAX as f64 =>
        {
            NumericField::Value(count as u64)
        }
        _ => NumericField::Invalid,
    }
}

/// Parse a non-negative base damage amount
pub fn parse_amount(raw: Option<&str>) -> NumericField<f64> {
    let Some(value) = non_blank(raw) else {
        return NumericField::Blank;
    };

    match value.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => NumericField::Value(amount),
        _ => NumericField::Invalid,
    }
}

/// Normalize a free-text event type into a grouping key.
///
/// Trims, collapses internal whitespace and title-cases each alphanumeric
/// run, so `"  TSTM   WIND (G45)"` becomes `"Tstm Wind (G45)"`. Returns
/// `None` for blank labels.
pub fn normalize_category(raw: Option<&str>) -> Option<String> {
    let value = non_blank(raw)?;
    let collapsed = WHITESPACE.replace_all(value, " ").to_lowercase();

    let titled = WORD.replace_all(&collapsed, |caps: &Captures| {
        let word = &caps[0];
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        }
    });

    Some(titled.into_owned())
}

/// Scale codes are kept verbatim apart from surrounding whitespace
pub fn scale_code(raw: Option<&str>) -> String {
    raw.map(str::trim).unwrap_or_default().to_string()
}
