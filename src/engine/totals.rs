use serde::Serialize;

use crate::{
    costs::CostStructure,
    engine::residual::{nominal_residual_value, residual_value},
    equipment::Equipment,
    prelude::*,
    quantity::{
        cost::{Cost, CostPerYear},
        energy::{KilowattHours, KilowattHoursPerYear},
    },
    usage::UsageProfile,
};

/// Equipment, its cost structure and the shared usage reduced to lifetime figures.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[must_use]
pub struct ComputedEntry {
    pub equipment: Equipment,
    pub costs: CostStructure,

    /// Years the lifetime figures span.
    pub horizon: u32,

    pub annual_consumption: KilowattHoursPerYear,
    pub annual_energy_cost: CostPerYear,
    pub lifetime_consumption: KilowattHours,

    /// Energy cost over the horizon, not discounted.
    pub lifetime_energy_cost: Cost,

    /// Energy cost over the horizon as an ordinary annuity.
    pub lifetime_energy_cost_pv: Cost,

    /// Energy and maintenance over the horizon, not discounted.
    pub operating_cost_total: Cost,

    /// Capital outlay, operating cost and disposal net of the residual value, not discounted.
    pub lifetime_cost: Cost,

    /// Same as [`ComputedEntry::lifetime_cost`], in present value.
    ///
    /// Equals the sum of the present-value column of the entry's cash flow over the same horizon.
    pub lifetime_cost_pv: Cost,
}

impl ComputedEntry {
    pub fn compute(
        equipment: Equipment,
        costs: CostStructure,
        usage: &UsageProfile,
        horizon: u32,
    ) -> Self {
        let horizon = horizon.max(1);
        let rate = usage.discount_rate;

        let annual_consumption = equipment.annual_consumption;
        let annual_energy_cost = annual_consumption * usage.tariff;
        let annual_operating_cost = annual_energy_cost + costs.maintenance;
        let capital_outlay = costs.capital_outlay();

        let operating_cost_total = annual_operating_cost.over(horizon);
        let lifetime_cost = capital_outlay + operating_cost_total + costs.disposal
            - nominal_residual_value(capital_outlay, horizon);
        let lifetime_cost_pv = capital_outlay
            + rate.annuity(annual_operating_cost, horizon)
            + rate.present_value(costs.disposal, horizon)
            - residual_value(capital_outlay, horizon, rate);

        Self {
            horizon,
            annual_consumption,
            annual_energy_cost,
            lifetime_consumption: annual_consumption.over(horizon),
            lifetime_energy_cost: annual_energy_cost.over(horizon),
            lifetime_energy_cost_pv: rate.annuity(annual_energy_cost, horizon),
            operating_cost_total,
            lifetime_cost,
            lifetime_cost_pv,
            equipment,
            costs,
        }
    }

    /// Combined annual operating cost (energy and maintenance).
    pub fn annual_operating_cost(&self) -> CostPerYear {
        self.annual_energy_cost + self.costs.maintenance
    }
}

/// Compute one entry per resolved equipment, preserving the input order.
///
/// Absent equipment must be filtered out beforehand; nothing is dropped here.
#[instrument(skip_all, fields(horizon = horizon))]
pub fn compute_energy_totals(
    entries: impl IntoIterator<Item = (Equipment, CostStructure)>,
    usage: &UsageProfile,
    horizon: u32,
) -> Vec<ComputedEntry> {
    let computed: Vec<_> = entries
        .into_iter()
        .map(|(equipment, costs)| ComputedEntry::compute(equipment, costs, usage, horizon))
        .collect();
    debug!(n_entries = computed.len(), "computed energy totals");
    computed
}
