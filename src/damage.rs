//! Damage magnitude codes and normalization to absolute currency amounts.
//!
//! Each damage figure in the input is a base amount plus a one-character
//! magnitude code. Codes are resolved with an ordered policy, first match
//! wins:
//!
//! | code                      | multiplier |
//! |---------------------------|------------|
//! | blank                     | 1          |
//! | `h` / `H`                 | 100        |
//! | `k` / `K`                 | 1,000      |
//! | `m` / `M`                 | 1,000,000  |
//! | `b` / `B`                 | 10^9       |
//! | anything else             | 10         |
//!
//! Cross-checking against the NCDC database shows the stray characters in the
//! last row (digits, `+`, `-`, `?`) are misplaced trailing digits of the
//! amount rather than scale codes, so ×10 approximates the recorded value.

use crate::constants::scale;
use crate::models::{EventRecord, NormalizedRecord};

/// Resolved magnitude code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleCode {
    Unit,
    Hundreds,
    Thousands,
    Millions,
    Billions,
    MisplacedDigit,
}

impl ScaleCode {
    /// Classify a raw code. Total over all inputs.
    pub fn parse(code: &str) -> Self {
        let code = code.trim();
        if code.is_empty() {
            ScaleCode::Unit
        } else if code.eq_ignore_ascii_case("h") {
            ScaleCode::Hundreds
        } else if code.eq_ignore_ascii_case("k") {
            ScaleCode::Thousands
        } else if code.eq_ignore_ascii_case("m") {
            ScaleCode::Millions
        } else if code.eq_ignore_ascii_case("b") {
            ScaleCode::Billions
        } else {
            ScaleCode::MisplacedDigit
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            ScaleCode::Unit => scale::UNIT,
            ScaleCode::Hundreds => scale::HUNDREDS,
            ScaleCode::Thousands => scale::THOUSANDS,
            ScaleCode::Millions => scale::MILLIONS,
            ScaleCode::Billions => scale::BILLIONS,
            ScaleCode::MisplacedDigit => scale::MISPLACED_DIGIT,
        }
    }
}

/// Multiplier for a raw magnitude code
pub fn resolve_scale(code: &str) -> f64 {
    ScaleCode::parse(code).multiplier()
}

/// Absolute amount for a base figure and its magnitude code
pub fn scaled_amount(raw: f64, code: &str) -> f64 {
    raw * resolve_scale(code)
}

/// Resolve both damage figures of a record
pub fn normalize(event: EventRecord) -> NormalizedRecord {
    let property_damage = scaled_amount(event.property_raw, &event.property_scale_code);
    let crop_damage = scaled_amount(event.crop_raw, &event.crop_scale_code);

    NormalizedRecord {
        event,
        property_damage,
        crop_damage,
    }
}

/// Normalize a sequence of records lazily
pub fn normalize_all<I>(events: I) -> impl Iterator<Item = NormalizedRecord>
where
    I: IntoIterator<Item = EventRecord>,
{
    events.into_iter().map(normalize)
}
