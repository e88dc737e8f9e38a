//! Grouping of normalized records by event category and by region.
//!
//! Category totals partition the input: each record lands in exactly one
//! group, keyed by exact match on its normalized label. Region totals skip
//! records without a mapped region and may be restricted to a category set.

use crate::models::{CategoryTotals, Impact, NormalizedRecord, Region, RegionTotals};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Per-category totals, ordered by category label
pub fn aggregate_by_category<'a, I>(records: I) -> Vec<CategoryTotals>
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    let mut groups: BTreeMap<&'a str, Impact> = BTreeMap::new();
    for record in records {
        groups.entry(record.category()).or_default().add(record);
    }

    debug!("Aggregated records into {} categories", groups.len());

    groups
        .into_iter()
        .map(|(category, impact)| CategoryTotals {
            category: category.to_string(),
            impact,
        })
        .collect()
}

/// Per-region totals, ordered by region name.
///
/// With a `filter`, only records whose category is in the set contribute.
/// Regions without a contributing record are absent rather than zero.
pub fn aggregate_by_region<'a, I>(records: I, filter: Option<&HashSet<&str>>) -> Vec<RegionTotals>
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    let mut groups: BTreeMap<Region, Impact> = BTreeMap::new();
    for record in records {
        if filter.is_some_and(|categories| !categories.contains(record.category())) {
            continue;
        }
        let Some(region) = record.region() else {
            continue;
        };
        groups.entry(region).or_default().add(record);
    }

    debug!("Aggregated records into {} regions", groups.len());

    groups
        .into_iter()
        .map(|(region, impact)| RegionTotals { region, impact })
        .collect()
}
