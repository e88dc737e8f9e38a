//! Application constants for the storm report
//!
//! Static lookup data (state codes, canonical event types), damage scale
//! multipliers, default input column names and output table names.

// =============================================================================
// Analysis Window
// =============================================================================

/// Default first day of the analysis window (inclusive), as year/month/day
pub const DEFAULT_WINDOW_START: (i32, u32, u32) = (2007, 1, 1);

/// Default number of categories kept by each ranking
pub const DEFAULT_TOP_N: usize = 10;

// =============================================================================
// Damage Scale Codes
// =============================================================================

/// Multipliers applied to raw damage amounts by magnitude code
pub mod scale {
    /// Blank code: raw amount is already absolute
    pub const UNIT: f64 = 1.0;

    /// Stray character in the code field, really a trailing digit of the amount
    pub const MISPLACED_DIGIT: f64 = 10.0;

    /// `H` / `h`
    pub const HUNDREDS: f64 = 100.0;

    /// `K` / `k`
    pub const THOUSANDS: f64 = 1_000.0;

    /// `M` / `m`
    pub const MILLIONS: f64 = 1_000_000.0;

    /// `B` / `b`
    pub const BILLIONS: f64 = 1_000_000_000.0;

    /// Every value `resolve_scale` can return
    pub const ALL: &[f64] = &[UNIT, MISPLACED_DIGIT, HUNDREDS, THOUSANDS, MILLIONS, BILLIONS];
}

/// Divisor used when damage is reported in billions
pub const BILLION: f64 = 1_000_000_000.0;

// =============================================================================
// Input Columns
// =============================================================================

/// Default NOAA Storm Events column headers
pub mod columns {
    pub const BEGIN_DATE: &str = "BGN_DATE";
    pub const END_DATE: &str = "END_DATE";
    pub const STATE: &str = "STATE";
    pub const EVENT_TYPE: &str = "EVTYPE";
    pub const FATALITIES: &str = "FATALITIES";
    pub const INJURIES: &str = "INJURIES";
    pub const PROPERTY_DAMAGE: &str = "PROPDMG";
    pub const PROPERTY_SCALE: &str = "PROPDMGEXP";
    pub const CROP_DAMAGE: &str = "CROPDMG";
    pub const CROP_SCALE: &str = "CROPDMGEXP";
}

/// Accepted date and timestamp layouts for begin/end dates
pub const DATETIME_FORMATS: &[&str] = &["%m/%d/%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S"];
pub const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

// =============================================================================
// Output Tables
// =============================================================================

pub mod tables {
    pub const HARM_TOP: &str = "harm_top";
    pub const DAMAGE_TOP: &str = "damage_top";
    pub const HARM_BY_REGION: &str = "harm_by_region";
    pub const DAMAGE_BY_REGION: &str = "damage_by_region";
    pub const CATEGORY_COMPARISON: &str = "category_comparison";
    pub const CATEGORY_TOTALS: &str = "category_totals";
}

/// Default output directory name, created next to the input file
pub const DEFAULT_OUTPUT_DIR: &str = "storm-report";

/// Default input file name searched for in the user data directory
pub const DEFAULT_INPUT_FILE: &str = "StormData.csv";

// =============================================================================
// Static Lookups
// =============================================================================

/// State abbreviation to region name: the 50 states plus the District of Columbia
pub const STATE_REGIONS: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

/// The 48 event types of NWS Directive 10-1605, title-cased as the loader
/// normalizes them.
///
/// Display only: upstream labels are never checked against this list.
pub const CANONICAL_EVENT_TYPES: &[&str] = &[
    "Astronomical Low Tide",
    "Avalanche",
    "Blizzard",
    "Coastal Flood",
    "Cold/Wind Chill",
    "Debris Flow",
    "Dense Fog",
    "Dense Smoke",
    "Drought",
    "Dust Devil",
    "Dust Storm",
    "Excessive Heat",
    "Extreme Cold/Wind Chill",
    "Flash Flood",
    "Flood",
    "Frost/Freeze",
    "Funnel Cloud",
    "Freezing Fog",
    "Hail",
    "Heat",
    "Heavy Rain",
    "Heavy Snow",
    "High Surf",
    "High Wind",
    "Hurricane (Typhoon)",
    "Ice Storm",
    "Lake-Effect Snow",
    "Lakeshore Flood",
    "Lightning",
    "Marine Hail",
    "Marine High Wind",
    "Marine Strong Wind",
    "Marine Thunderstorm Wind",
    "Rip Current",
    "Seiche",
    "Sleet",
    "Storm Surge/Tide",
    "Strong Wind",
    "Thunderstorm Wind",
    "Tornado",
    "Tropical Depression",
    "Tropical Storm",
    "Tsunami",
    "Volcanic Ash",
    "Waterspout",
    "Wildfire",
    "Winter Storm",
    "Winter Weather",
];

/// Whether a normalized category label is one of the canonical event types
pub fn is_canonical_event_type(category: &str) -> bool {
    CANONICAL_EVENT_TYPES.contains(&category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_state_table_has_fifty_states_and_dc() {
        assert_eq!(STATE_REGIONS.len(), 51);

        let codes: HashSet<_> = STATE_REGIONS.iter().map(|(code, _)| *code).collect();
        assert_eq!(codes.len(), 51, "state codes must be unique");
        assert!(codes.contains("DC"));
        assert!(!codes.contains("PR"));
    }

    #[test]
    fn test_canonical_event_types() {
        assert_eq!(CANONICAL_EVENT_TYPES.len(), 48);
        assert!(is_canonical_event_type("Tornado"));
        assert!(is_canonical_event_type("Thunderstorm Wind"));
        assert!(!is_canonical_event_type("Tstm Wind"));
        assert!(!is_canonical_event_type("TORNADO"));
    }

    #[test]
    fn test_scale_values_are_distinct() {
        let mut values: Vec<f64> = scale::ALL.to_vec();
        values.sort_by(f64::total_cmp);
        values.dedup();
        assert_eq!(values.len(), 6);
    }
}
