//! Selection state of a comparison session, updated as a reducer and evaluated from scratch.

mod config;
mod event;
mod slot;

use itertools::Itertools;
use serde::Serialize;

pub use self::{
    event::Event,
    slot::{Slot, SlotKey},
};
use crate::{
    catalog::{Catalog, Filters},
    costs::common_horizon,
    engine::{CashFlow, ComparedPair, ComputedEntry, PaybackSeries, compute_energy_totals},
    equipment::Selection,
    prelude::*,
    ranking::Ranking,
    usage::UsageProfile,
};

#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Session {
    pub usage: UsageProfile,
    pub filters: Filters,
    pub slots: Vec<Slot>,

    /// Configured binary comparison pair, if any.
    pub comparison: Option<(SlotKey, SlotKey)>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            usage: UsageProfile::DEFAULT,
            filters: Filters::default(),
            slots: vec![
                Slot::new(SlotKey(1), Selection::default()),
                Slot::new(SlotKey(2), Selection::default()),
            ],
            comparison: None,
        }
    }
}

impl Session {
    pub const MIN_SLOTS: usize = 2;
    pub const MAX_SLOTS: usize = 20;

    /// Apply the event and bring the selections back in line with the active filters.
    #[instrument(skip_all, level = "debug")]
    pub fn reduce(mut self, event: Event, catalog: &Catalog) -> Self {
        trace!(?event);
        match event {
            Event::UsageChanged(usage) => {
                self.usage = usage;
            }
            Event::FiltersChanged(filters) => {
                self.filters = filters;
            }
            Event::SlotCountChanged(n_slots) => {
                let n_slots = n_slots.clamp(Self::MIN_SLOTS, Self::MAX_SLOTS);
                self.slots.truncate(n_slots);
                while self.slots.len() < n_slots {
                    self.slots.push(Slot::new(Self::next_key(&self.slots), Selection::default()));
                }
            }
            Event::SlotAdded(selection) => {
                if self.slots.len() < Self::MAX_SLOTS {
                    self.slots.push(Slot::new(Self::next_key(&self.slots), selection));
                } else {
                    debug!(n_slots = self.slots.len(), "all slots are taken");
                }
            }
            Event::SlotRemoved(key) => {
                if self.slots.len() > Self::MIN_SLOTS {
                    self.slots.retain(|slot| slot.key != key);
                } else {
                    debug!(%key, "keeping the minimum number of slots");
                }
            }
            Event::SelectionChanged(key, selection) => {
                if let Some(slot) = self.slot_mut(key) {
                    slot.selection = selection;
                }
            }
            Event::CostsChanged(key, costs) => {
                if let Some(slot) = self.slot_mut(key) {
                    slot.costs = costs;
                }
            }
            Event::ComparisonChanged(comparison) => {
                self.comparison = comparison;
            }
        }

        let candidates = catalog.filtered(&self.filters);
        for slot in &mut self.slots {
            slot.selection.retain_within(&candidates);
        }
        if let Some((a, b)) = self.comparison
            && !(self.has_slot(a) && self.has_slot(b))
        {
            debug!(%a, %b, "comparison pair no longer exists");
            self.comparison = None;
        }
        self
    }

    /// Derive every output from the current state.
    ///
    /// Nothing is cached between calls: the same state always evaluates to the same result.
    #[instrument(skip_all, level = "debug", fields(n_slots = self.slots.len()))]
    pub fn evaluate(&self, catalog: &Catalog) -> Evaluation {
        let candidates = catalog.filtered(&self.filters);
        let resolved = self
            .slots
            .iter()
            .filter_map(|slot| Some((slot, slot.resolve(&candidates)?)))
            .collect_vec();
        let horizon = common_horizon(resolved.iter().map(|(slot, _)| &slot.costs));
        let keys = resolved.iter().map(|(slot, _)| slot.key).collect_vec();
        let entries = compute_energy_totals(
            resolved.into_iter().map(|(slot, equipment)| (equipment, slot.costs)),
            &self.usage,
            horizon,
        );
        let entries = keys
            .into_iter()
            .zip(entries)
            .map(|(key, entry)| SlotEntry { key, entry })
            .collect_vec();
        let comparison = self.compare(&entries);
        if comparison.is_none() {
            debug!(n_entries = entries.len(), "no binary comparison");
        }
        Evaluation {
            n_candidates: candidates.len(),
            horizon,
            ranking: Ranking::rank(entries.iter().map(|entry| &entry.entry)),
            entries,
            comparison,
        }
    }

    fn compare(&self, entries: &[SlotEntry]) -> Option<BinaryComparison> {
        let (a, b) = match self.comparison {
            Some((a, b)) if self.has_slot(a) && self.has_slot(b) => {
                let find = |key: SlotKey| entries.iter().find(|entry| entry.key == key);
                (find(a)?, find(b)?)
            }
            _ => match entries {
                [a, b, ..] => (a, b),
                _ => return None,
            },
        };
        let horizon = a.entry.costs.horizon().min(b.entry.costs.horizon());
        let entry = |entry: &SlotEntry| {
            let ComputedEntry { equipment, costs, .. } = &entry.entry;
            ComputedEntry::compute(equipment.clone(), *costs, &self.usage, horizon)
        };
        let (entry_a, entry_b) = (entry(a), entry(b));
        let cash_flow = |entry: &ComputedEntry| {
            CashFlow::builder()
                .entry(entry)
                .horizon(horizon)
                .discount_rate(self.usage.discount_rate)
                .build()
        };
        let (cash_flow_a, cash_flow_b) = (cash_flow(&entry_a), cash_flow(&entry_b));
        let payback = PaybackSeries::synthesize(ComparedPair::try_new(&cash_flow_a, &cash_flow_b)?);
        Some(BinaryComparison {
            a: a.key,
            b: b.key,
            horizon,
            entry_a,
            entry_b,
            cash_flow_a,
            cash_flow_b,
            payback,
        })
    }

    fn has_slot(&self, key: SlotKey) -> bool {
        self.slots.iter().any(|slot| slot.key == key)
    }

    fn slot_mut(&mut self, key: SlotKey) -> Option<&mut Slot> {
        let slot = self.slots.iter_mut().find(|slot| slot.key == key);
        if slot.is_none() {
            debug!(%key, "no such slot");
        }
        slot
    }

    fn next_key(slots: &[Slot]) -> SlotKey {
        slots.iter().map(|slot| slot.key).max().map_or(SlotKey(1), SlotKey::next)
    }
}

/// Computed entry of a slot whose equipment resolved.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SlotEntry {
    pub key: SlotKey,

    #[serde(flatten)]
    pub entry: ComputedEntry,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BinaryComparison {
    pub a: SlotKey,
    pub b: SlotKey,

    /// Shorter of the two useful lives.
    pub horizon: u32,

    /// Lifetime figures over the comparison horizon, consistent with the cash flows.
    pub entry_a: ComputedEntry,
    pub entry_b: ComputedEntry,

    pub cash_flow_a: CashFlow,
    pub cash_flow_b: CashFlow,
    pub payback: PaybackSeries,
}

/// Everything derived from a session state.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[must_use]
pub struct Evaluation {
    /// Catalog records passing the active filters.
    pub n_candidates: usize,

    /// Shortest useful life among the resolved slots.
    pub horizon: u32,

    pub entries: Vec<SlotEntry>,
    pub ranking: Ranking,

    /// [`None`] while fewer than two slots resolve: comparison charts are suppressed.
    pub comparison: Option<BinaryComparison>,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        catalog::{Filter, tests::sample_catalog},
        costs::CostStructure,
        equipment::ManualFields,
        field::Field,
        quantity::{
            cost::{Cost, CostPerYear},
            discount::DiscountRate,
        },
    };

    fn catalog_slot(id: &str) -> Selection {
        Selection::Catalog { id: Some(Field::from(id)) }
    }

    fn manual_slot(name: &str, consumption: &str) -> Selection {
        Selection::Manual(ManualFields {
            name: Field::from(name),
            annual_consumption: Field::from(consumption),
            ..ManualFields::default()
        })
    }

    fn costs(acquisition: f64, useful_life: u32) -> CostStructure {
        CostStructure {
            acquisition: Cost::new(acquisition),
            installation: Cost::new(300.0),
            maintenance: CostPerYear::new(40.0),
            ..CostStructure::default()
        }
        .with_useful_life(useful_life)
    }

    fn session() -> Session {
        let catalog = sample_catalog();
        [
            Event::SelectionChanged(SlotKey(1), catalog_slot("1")),
            Event::SelectionChanged(SlotKey(2), catalog_slot("3")),
            Event::CostsChanged(SlotKey(1), costs(3000.0, 8)),
            Event::CostsChanged(SlotKey(2), costs(2000.0, 6)),
        ]
        .into_iter()
        .fold(Session::default(), |session, event| session.reduce(event, &catalog))
    }

    #[test]
    fn test_evaluate() {
        let evaluation = session().evaluate(&sample_catalog());
        assert_eq!(evaluation.n_candidates, 3);
        assert_eq!(evaluation.horizon, 6);
        assert_eq!(evaluation.entries.len(), 2);
        assert_eq!(evaluation.entries[0].entry.equipment.brand, "Brisa");
        assert_eq!(evaluation.ranking.by_consumption[0].tooltip, "Brisa - 9000 BTU/h");

        let comparison = evaluation.comparison.unwrap();
        assert_eq!((comparison.a, comparison.b), (SlotKey(1), SlotKey(2)));
        assert_eq!(comparison.horizon, 6);
        assert_eq!(comparison.cash_flow_a.rows().len(), 7);
        assert_eq!(comparison.payback.rows.len(), 7);
    }

    #[test]
    fn test_idempotent() {
        let catalog = sample_catalog();
        let session = session();
        assert_eq!(session.evaluate(&catalog), session.evaluate(&catalog));

        let filters = session.filters.clone();
        let reduced = session.clone().reduce(Event::FiltersChanged(filters), &catalog);
        assert_eq!(reduced, session);
        assert_eq!(reduced.evaluate(&catalog), session.evaluate(&catalog));
    }

    #[test]
    fn test_zero_consumption_excluded() {
        let catalog = sample_catalog();
        let session = session()
            .reduce(Event::SlotAdded(manual_slot("Prototype", "0")), &catalog)
            .reduce(Event::ComparisonChanged(Some((SlotKey(1), SlotKey(3)))), &catalog);
        assert_eq!(session.slots.len(), 3);

        let evaluation = session.evaluate(&catalog);
        assert_eq!(evaluation.entries.len(), 2);
        assert!(evaluation.entries.iter().all(|entry| entry.key != SlotKey(3)));
        assert_eq!(evaluation.ranking.by_energy_cost.len(), 2);
        assert!(evaluation.comparison.is_none());
    }

    #[test]
    fn test_discount_rate_changes_residual_values() {
        let catalog = sample_catalog();
        let before = session();
        let after = before.clone().reduce(
            Event::UsageChanged(UsageProfile {
                discount_rate: DiscountRate::new(0.08),
                ..before.usage
            }),
            &catalog,
        );

        let before = before.evaluate(&catalog).comparison.unwrap();
        let after = after.evaluate(&catalog).comparison.unwrap();
        for (before, after) in [
            (&before.cash_flow_a, &after.cash_flow_a),
            (&before.cash_flow_b, &after.cash_flow_b),
        ] {
            let before = before.rows().last().unwrap().residual_value;
            let after = after.rows().last().unwrap().residual_value;
            assert!(before > Cost::ZERO);
            assert!(after < before);
        }
        assert_abs_diff_eq!(
            after.cash_flow_a.rows()[6].residual_value.0,
            3300.0 * 0.4 / 1.08_f64.powi(6),
            epsilon = 1e-9,
        );
    }

    #[test]
    fn test_filters_clear_selection() {
        let catalog = sample_catalog();
        let session = session().reduce(
            Event::FiltersChanged(Filters { kind: Filter::only("Window"), ..Filters::default() }),
            &catalog,
        );
        assert_eq!(session.slots[0].selection, Selection::Catalog { id: None });
        assert_eq!(session.slots[1].selection, catalog_slot("3"));

        let evaluation = session.evaluate(&catalog);
        assert_eq!(evaluation.n_candidates, 1);
        assert_eq!(evaluation.entries.len(), 1);
        assert!(evaluation.comparison.is_none());
    }

    #[test]
    fn test_slot_count_clamped() {
        let catalog = sample_catalog();
        let session = session().reduce(Event::SlotCountChanged(50), &catalog);
        assert_eq!(session.slots.len(), Session::MAX_SLOTS);
        assert_eq!(session.slots.last().unwrap().key, SlotKey(20));

        let session = session.reduce(Event::SlotCountChanged(0), &catalog);
        assert_eq!(session.slots.len(), Session::MIN_SLOTS);
        assert_eq!(session.slots[1].selection, catalog_slot("3"));

        let session = session.reduce(Event::SlotRemoved(SlotKey(1)), &catalog);
        assert_eq!(session.slots.len(), Session::MIN_SLOTS);
    }

    #[test]
    fn test_added_slot_key() {
        let catalog = sample_catalog();
        let session = session()
            .reduce(Event::SlotAdded(Selection::manual()), &catalog)
            .reduce(Event::SlotRemoved(SlotKey(2)), &catalog)
            .reduce(Event::SlotAdded(Selection::manual()), &catalog);
        let keys = session.slots.iter().map(|slot| slot.key.0).collect_vec();
        assert_eq!(keys, [1, 3, 4]);
    }

    #[test]
    fn test_comparison_over_pair_horizon() {
        let catalog = sample_catalog();
        let session = session()
            .reduce(Event::SlotAdded(manual_slot("Prototype", "300")), &catalog)
            .reduce(Event::CostsChanged(SlotKey(3), costs(1500.0, 3)), &catalog);
        let evaluation = session.evaluate(&catalog);
        assert_eq!(evaluation.horizon, 3);
        assert_eq!(evaluation.entries[0].entry.horizon, 3);

        let comparison = evaluation.comparison.unwrap();
        assert_eq!(comparison.horizon, 6);
        for (entry, cash_flow) in [
            (&comparison.entry_a, &comparison.cash_flow_a),
            (&comparison.entry_b, &comparison.cash_flow_b),
        ] {
            assert_eq!(entry.horizon, 6);
            assert_abs_diff_eq!(entry.lifetime_cost_pv.0, cash_flow.total_pv().0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_comparison_pair() {
        let catalog = sample_catalog();
        let session = session()
            .reduce(Event::SlotAdded(manual_slot("Prototype", "250")), &catalog)
            .reduce(Event::CostsChanged(SlotKey(3), costs(4000.0, 10)), &catalog)
            .reduce(Event::ComparisonChanged(Some((SlotKey(3), SlotKey(2)))), &catalog);
        let comparison = session.evaluate(&catalog).comparison.unwrap();
        assert_eq!((comparison.a, comparison.b), (SlotKey(3), SlotKey(2)));
        assert_eq!(comparison.horizon, 6);

        let session = session.reduce(Event::SlotRemoved(SlotKey(3)), &catalog);
        assert_eq!(session.comparison, None);
        let comparison = session.evaluate(&catalog).comparison.unwrap();
        assert_eq!((comparison.a, comparison.b), (SlotKey(1), SlotKey(2)));
    }
}
