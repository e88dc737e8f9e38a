//! State code to region lookup.
//!
//! Built once from static data and passed explicitly to the components that
//! need it, rather than consulted as global state.

use crate::constants::STATE_REGIONS;
use crate::models::Region;
use std::collections::HashMap;

/// Immutable mapping from two-letter state codes to regions
#[derive(Debug, Clone)]
pub struct RegionTable {
    by_code: HashMap<&'static str, Region>,
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::from_entries(STATE_REGIONS)
    }
}

impl RegionTable {
    /// The 50 states plus the District of Columbia
    pub fn us_states() -> Self {
        Self::default()
    }

    /// Build a table from `(code, region name)` pairs; codes must be upper-case
    pub fn from_entries(entries: &'static [(&'static str, &'static str)]) -> Self {
        let by_code = entries
            .iter()
            .map(|(code, name)| (*code, Region(*name)))
            .collect();
        Self { by_code }
    }

    /// Resolve a raw state code, ignoring surrounding whitespace and case
    pub fn lookup(&self, code: &str) -> Option<Region> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        if let Some(region) = self.by_code.get(code) {
            return Some(*region);
        }
        self.by_code.get(code.to_ascii_uppercase().as_str()).copied()
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_codes() {
        let table = RegionTable::us_states();
        assert_eq!(table.len(), 51);
        assert_eq!(table.lookup("AL").map(|r| r.name()), Some("Alabama"));
        assert_eq!(
            table.lookup("DC").map(|r| r.name()),
            Some("District of Columbia")
        );
    }

    #[test]
    fn test_lookup_ignores_case_and_whitespace() {
        let table = RegionTable::us_states();
        assert_eq!(table.lookup(" tx ").map(|r| r.name()), Some("Texas"));
        assert_eq!(table.lookup("Ok").map(|r| r.name()), Some("Oklahoma"));
    }

    #[test]
    fn test_lookup_unmapped_codes() {
        let table = RegionTable::us_states();
        assert_eq!(table.lookup("XX"), None);
        assert_eq!(table.lookup("PR"), None);
        assert_eq!(table.lookup(""), None);
        assert_eq!(table.lookup("   "), None);
    }
}
