use std::iter::once;

use bon::bon;
use serde::Serialize;

use crate::{
    engine::{residual::residual_value, totals::ComputedEntry},
    quantity::{cost::Cost, discount::DiscountRate},
};

/// Single year of a discounted cash flow.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct CashFlowRow {
    pub year: u32,

    /// Acquisition and installation, only at year zero.
    pub capital_outlay: Cost,

    /// Discounted residual value, only at the terminal year.
    pub residual_value: Cost,

    /// Discounted disposal cost minus the residual value, only at the terminal year.
    pub disposal: Cost,

    pub maintenance: Cost,
    pub energy: Cost,

    /// Combined operating cost: energy and maintenance.
    pub operating_cost: Cost,

    pub operating_cost_pv: Cost,
    pub total_pv: Cost,
}

impl CashFlowRow {
    /// Column-wise `self − rhs`, keeping the year.
    pub fn minus(self, rhs: &Self) -> Self {
        Self {
            year: self.year,
            capital_outlay: self.capital_outlay - rhs.capital_outlay,
            residual_value: self.residual_value - rhs.residual_value,
            disposal: self.disposal - rhs.disposal,
            maintenance: self.maintenance - rhs.maintenance,
            energy: self.energy - rhs.energy,
            operating_cost: self.operating_cost - rhs.operating_cost,
            operating_cost_pv: self.operating_cost_pv - rhs.operating_cost_pv,
            total_pv: self.total_pv - rhs.total_pv,
        }
    }
}

/// Year-by-year cash flow: row zero plus one row per year of the horizon, never empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
#[must_use]
pub struct CashFlow(Vec<CashFlowRow>);

#[bon]
impl CashFlow {
    /// Build the cash flow of a computed entry over the given horizon.
    ///
    /// The horizon may be shorter than the entry's own useful life: compared equipment
    /// is truncated to the shorter of the two.
    #[builder]
    pub fn new(entry: &ComputedEntry, horizon: u32, discount_rate: DiscountRate) -> Self {
        let horizon = horizon.max(1);
        let capital_outlay = entry.costs.capital_outlay();
        let maintenance = entry.costs.maintenance.over(1);
        let energy = entry.annual_energy_cost.over(1);
        let operating_cost = energy + maintenance;

        let initial =
            CashFlowRow { year: 0, capital_outlay, total_pv: capital_outlay, ..Default::default() };
        let yearly = (1..=horizon).map(|year| {
            let operating_cost_pv = discount_rate.present_value(operating_cost, year);
            let (residual_value, disposal) = if year == horizon {
                let residual = residual_value(capital_outlay, year, discount_rate);
                (residual, discount_rate.present_value(entry.costs.disposal, year) - residual)
            } else {
                (Cost::ZERO, Cost::ZERO)
            };
            CashFlowRow {
                year,
                capital_outlay: Cost::ZERO,
                residual_value,
                disposal,
                maintenance,
                energy,
                operating_cost,
                operating_cost_pv,
                total_pv: operating_cost_pv + disposal,
            }
        });
        Self(once(initial).chain(yearly).collect())
    }
}

impl CashFlow {
    pub fn rows(&self) -> &[CashFlowRow] {
        &self.0
    }

    #[expect(clippy::cast_possible_truncation)]
    pub const fn horizon(&self) -> u32 {
        (self.0.len() - 1) as u32
    }

    pub fn total_pv(&self) -> Cost {
        self.0.iter().map(|row| row.total_pv).sum()
    }

    /// Totals row for display: sums, except for the terminal-only columns.
    pub fn totals(&self) -> CashFlowTotals {
        let terminal = self.0.last().copied().unwrap_or_default();
        CashFlowTotals {
            capital_outlay: self.0.iter().map(|row| row.capital_outlay).sum(),
            residual_value: terminal.residual_value,
            disposal: terminal.disposal,
            maintenance: self.0.iter().map(|row| row.maintenance).sum(),
            energy: self.0.iter().map(|row| row.energy).sum(),
            operating_cost: self.0.iter().map(|row| row.operating_cost).sum(),
            operating_cost_pv: self.0.iter().map(|row| row.operating_cost_pv).sum(),
            total_pv: self.total_pv(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct CashFlowTotals {
    pub capital_outlay: Cost,
    pub residual_value: Cost,
    pub disposal: Cost,
    pub maintenance: Cost,
    pub energy: Cost,
    pub operating_cost: Cost,
    pub operating_cost_pv: Cost,
    pub total_pv: Cost,
}
