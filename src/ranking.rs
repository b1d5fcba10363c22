use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::engine::ComputedEntry;

/// Single bar of a batch-comparison chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedBar {
    /// 1-based position in the ranking.
    pub position: usize,

    pub tooltip: String,
    pub value: f64,
}

impl RankedBar {
    pub fn label(&self) -> String {
        format!("#{}", self.position)
    }
}

/// Batch comparison: every computed entry ranked ascending by the two headline figures.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ranking {
    pub by_consumption: Vec<RankedBar>,
    pub by_energy_cost: Vec<RankedBar>,
}

impl Ranking {
    pub fn rank<'a>(entries: impl IntoIterator<Item = &'a ComputedEntry>) -> Self {
        let entries = entries.into_iter().collect_vec();
        Self {
            by_consumption: rank_by(&entries, |entry| entry.lifetime_consumption.0),
            by_energy_cost: rank_by(&entries, |entry| entry.lifetime_energy_cost_pv.0),
        }
    }
}

fn rank_by(entries: &[&ComputedEntry], value: impl Fn(&ComputedEntry) -> f64) -> Vec<RankedBar> {
    entries
        .iter()
        .map(|&entry| (entry, value(entry)))
        .sorted_by_key(|(_, value)| OrderedFloat(*value))
        .enumerate()
        .map(|(index, (entry, value))| RankedBar {
            position: index + 1,
            tooltip: entry.equipment.label(),
            value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        costs::CostStructure,
        engine::{
            compute_energy_totals,
            totals::tests::{equipment, usage},
        },
    };

    #[test]
    fn test_rank() {
        let entries = compute_energy_totals(
            [
                (equipment("hungry", 900.0), CostStructure::default()),
                (equipment("frugal", 300.0), CostStructure::default()),
                (equipment("average", 600.0), CostStructure::default()),
            ],
            &usage(1.0, 0.01),
            10,
        );
        let ranking = Ranking::rank(&entries);
        let tooltips = ranking.by_consumption.iter().map(|bar| bar.tooltip.as_str()).collect_vec();
        assert_eq!(
            tooltips,
            ["frugal - 12000 BTU/h", "average - 12000 BTU/h", "hungry - 12000 BTU/h"],
        );
        assert_eq!(ranking.by_consumption[0].value, 3000.0);
        assert_eq!(ranking.by_consumption[2].label(), "#3");
        assert_eq!(ranking.by_energy_cost[0].tooltip, "frugal - 12000 BTU/h");
        assert!(ranking.by_energy_cost[0].value < ranking.by_energy_cost[1].value);
    }

    #[test]
    fn test_rank_empty() {
        let ranking = Ranking::rank(std::iter::empty());
        assert!(ranking.by_consumption.is_empty());
        assert!(ranking.by_energy_cost.is_empty());
    }
}
