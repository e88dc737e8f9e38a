//! Top-N ranking of event categories.
//!
//! Categories are ordered by the raw metric, descending. Equal values are
//! ordered by category label ascending so that the boundary of a top-N set
//! is reproducible across runs. Ties at the boundary never enlarge the set.

use crate::constants::is_canonical_event_type;
use crate::models::{CategoryTotals, ComparisonRow, Metric, RankedCategory};
use std::cmp::Ordering;

/// Ordering used by every ranking: metric descending, then label ascending
pub fn rank_order(metric: Metric, a: &CategoryTotals, b: &CategoryTotals) -> Ordering {
    metric
        .raw(&b.impact)
        .total_cmp(&metric.raw(&a.impact))
        .then_with(|| a.category.cmp(&b.category))
}

/// The `n` highest-ranked categories for a metric.
///
/// Damage values are reported in billions; ordering uses raw values.
pub fn top_n(totals: &[CategoryTotals], metric: Metric, n: usize) -> Vec<RankedCategory> {
    let mut ordered: Vec<&CategoryTotals> = totals.iter().collect();
    ordered.sort_by(|a, b| rank_order(metric, a, b));

    ordered
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(index, totals)| RankedCategory {
            rank: index + 1,
            category: totals.category.clone(),
            value: metric.reported(&totals.impact),
        })
        .collect()
}

/// Every category ranked by harm and, independently, by damage, side by side
pub fn comparison_table(totals: &[CategoryTotals]) -> Vec<ComparisonRow> {
    let by_harm = top_n(totals, Metric::Harm, totals.len());
    let by_damage = top_n(totals, Metric::Damage, totals.len());

    by_harm
        .into_iter()
        .zip(by_damage)
        .map(|(harm, damage)| ComparisonRow {
            rank: harm.rank,
            harm_canonical: is_canonical_event_type(&harm.category),
            harm_category: harm.category,
            harm: harm.value,
            damage_canonical: is_canonical_event_type(&damage.category),
            damage_category: damage.category,
            damage_billions: damage.value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Impact;

    fn totals(category: &str, fatalities: u64, property_damage: f64) -> CategoryTotals {
        CategoryTotals {
            category: category.to_string(),
            impact: Impact {
                count: 1,
                fatalities,
                injuries: 0,
                property_damage,
                crop_damage: 0.0,
            },
        }
    }

    #[test]
    fn test_top_n_orders_descending() {
        let input = vec![
            totals("Hail", 3, 5e9),
            totals("Tornado", 50, 1e9),
            totals("Flood", 10, 20e9),
        ];

        let harm = top_n(&input, Metric::Harm, 10);
        let names: Vec<&str> = harm.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(names, vec!["Tornado", "Flood", "Hail"]);
        assert_eq!(harm[0].rank, 1);
        assert_eq!(harm[0].value, 50.0);

        let damage = top_n(&input, Metric::Damage, 2);
        assert_eq!(damage.len(), 2);
        assert_eq!(damage[0].category, "Flood");
        assert_eq!(damage[0].value, 20.0);
        assert_eq!(damage[1].category, "Hail");
        assert_eq!(damage[1].value, 5.0);
    }

    #[test]
    fn test_top_n_bounds() {
        let input: Vec<CategoryTotals> = (0..15)
            .map(|i| totals(&format!("Category {:02}", i), i, i as f64))
            .collect();

        let ranked = top_n(&input, Metric::Harm, 10);
        assert_eq!(ranked.len(), 10);
        assert!(ranked.windows(2).all(|w| w[0].value >= w[1].value));
        assert!(
            ranked
                .iter()
                .all(|r| input.iter().any(|t| t.category == r.category))
        );

        assert_eq!(top_n(&input[..3], Metric::Harm, 10).len(), 3);
        assert!(top_n(&input, Metric::Harm, 0).is_empty());
        assert!(top_n(&[], Metric::Damage, 10).is_empty());
    }

    #[test]
    fn test_boundary_ties_break_by_label() {
        let mut input: Vec<CategoryTotals> = (0..9)
            .map(|i| totals(&format!("Top {}", i), 100 + i, 0.0))
            .collect();
        input.push(totals("Zeta Storm", 7, 0.0));
        input.push(totals("Alpha Storm", 7, 0.0));

        let first = top_n(&input, Metric::Harm, 10);
        assert_eq!(first.len(), 10);
        assert_eq!(first[9].category, "Alpha Storm");

        input.reverse();
        let second = top_n(&input, Metric::Harm, 10);
        assert_eq!(first, second);
    }

    #[test]
    fn test_comparison_table_ranks_independently() {
        let input = vec![
            totals("Heat", 90, 1e8),
            totals("Flood", 10, 30e9),
            totals("Tstm Wind", 5, 2e9),
        ];

        let rows = comparison_table(&input);
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].harm_category, "Heat");
        assert_eq!(rows[0].damage_category, "Flood");
        assert_eq!(rows[0].damage_billions, 30.0);
        assert!(rows[0].harm_canonical);

        assert_eq!(rows[2].harm_category, "Tstm Wind");
        assert!(!rows[2].harm_canonical);
        assert_eq!(rows[2].damage_category, "Heat");
        assert!((rows[2].damage_billions - 0.1).abs() < 1e-12);
    }
}
