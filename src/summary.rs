//! State impact summaries scoped to a top-N category set.

use crate::aggregate::aggregate_by_region;
use crate::models::{Metric, NormalizedRecord, RankedCategory, RegionImpact};
use std::collections::HashSet;
use tracing::debug;

/// Per-region metric for records in the ranked categories.
///
/// Regions with no matching record are absent: renderers must show them as
/// "no data", not zero. Output is ordered by value descending, then region
/// name.
pub fn summarize_regions(
    records: &[NormalizedRecord],
    ranked: &[RankedCategory],
    metric: Metric,
) -> Vec<RegionImpact> {
    let selected: HashSet<&str> = ranked.iter().map(|r| r.category.as_str()).collect();

    let mut impacts: Vec<RegionImpact> = aggregate_by_region(records, Some(&selected))
        .into_iter()
        .map(|totals| RegionImpact {
            region: totals.region,
            count: totals.impact.count,
            value: metric.reported(&totals.impact),
        })
        .collect();

    impacts.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.region.cmp(&b.region))
    });

    debug!(
        "Summarized {} over {} categories into {} regions",
        metric,
        selected.len(),
        impacts.len()
    );
    impacts
}
