//! Core data structures for the storm report.
//!
//! Defines the event records flowing through the pipeline, the per-category
//! and per-region totals produced by aggregation, ranked outputs and the
//! loader's audit counts.

use crate::constants::BILLION;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Full jurisdiction name used as the spatial aggregation key.
///
/// Only constructed by [`RegionTable`](crate::regions::RegionTable), so every
/// value is one of the 51 known regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Region(pub(crate) &'static str);

impl Region {
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// One observed storm event as read from the input
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub begin_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub state_code: String,
    /// `None` when the state code is not in the region table
    pub region: Option<Region>,
    pub category: String,
    pub fatalities: u64,
    pub injuries: u64,
    pub property_raw: f64,
    pub property_scale_code: String,
    pub crop_raw: f64,
    pub crop_scale_code: String,
}

/// An event record with damage amounts resolved to absolute currency units
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub event: EventRecord,
    pub property_damage: f64,
    pub crop_damage: f64,
}

impl NormalizedRecord {
    pub fn category(&self) -> &str {
        &self.event.category
    }

    pub fn region(&self) -> Option<Region> {
        self.event.region
    }

    /// Fatalities plus injuries
    pub fn harm(&self) -> u64 {
        self.event.fatalities.saturating_add(self.event.injuries)
    }

    /// Property plus crop damage
    pub fn damage(&self) -> f64 {
        self.property_damage + self.crop_damage
    }
}

/// Summed impact fields shared by category and region totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Impact {
    pub count: u64,
    pub fatalities: u64,
    pub injuries: u64,
    pub property_damage: f64,
    pub crop_damage: f64,
}

impl Impact {
    pub fn add(&mut self, record: &NormalizedRecord) {
        self.count += 1;
        self.fatalities = self.fatalities.saturating_add(record.event.fatalities);
        self.injuries = self.injuries.saturating_add(record.event.injuries);
        self.property_damage += record.property_damage;
        self.crop_damage += record.crop_damage;
    }

    pub fn harm(&self) -> u64 {
        self.fatalities.saturating_add(self.injuries)
    }

    pub fn damage(&self) -> f64 {
        self.property_damage + self.crop_damage
    }
}

/// Aggregate impact for one event category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub category: String,
    pub impact: Impact,
}

impl CategoryTotals {
    pub fn harm(&self) -> u64 {
        self.impact.harm()
    }

    pub fn damage(&self) -> f64 {
        self.impact.damage()
    }
}

/// Aggregate impact for one region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTotals {
    pub region: Region,
    pub impact: Impact,
}

/// Ranking metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Fatalities plus injuries
    Harm,
    /// Property plus crop damage
    Damage,
}

impl Metric {
    /// Raw metric value used for ordering
    pub fn raw(&self, impact: &Impact) -> f64 {
        match self {
            Metric::Harm => impact.harm() as f64,
            Metric::Damage => impact.damage(),
        }
    }

    /// Metric value as reported: harm as a count, damage in billions
    pub fn reported(&self, impact: &Impact) -> f64 {
        match self {
            Metric::Harm => impact.harm() as f64,
            Metric::Damage => impact.damage() / BILLION,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Harm => "harm",
            Metric::Damage => "damage_billions",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Harm => f.write_str("harm"),
            Metric::Damage => f.write_str("damage"),
        }
    }
}

/// One entry of a top-N ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCategory {
    /// 1-based position
    pub rank: usize,
    pub category: String,
    pub value: f64,
}

/// Per-region value of a metric, scoped to a top-N category set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionImpact {
    pub region: Region,
    pub count: u64,
    pub value: f64,
}

/// One row of the side-by-side harm/damage comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub rank: usize,
    pub harm_category: String,
    pub harm: f64,
    pub harm_canonical: bool,
    pub damage_category: String,
    pub damage_billions: f64,
    pub damage_canonical: bool,
}

/// Counts of rows excluded or adjusted while loading
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub rows_read: usize,
    pub loaded: usize,
    pub before_window: usize,
    pub after_window: usize,
    pub unparseable_date: usize,
    pub missing_category: usize,
    /// Loaded records whose state code has no region; kept for category totals
    pub unmapped_state: usize,
    /// Numeric fields that were present but unusable and replaced by zero
    pub coerced_numeric: usize,
}

impl LoadStats {
    pub fn excluded(&self) -> usize {
        self.before_window + self.after_window + self.unparseable_date + self.missing_category
    }
}
