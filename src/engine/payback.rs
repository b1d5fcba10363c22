use itertools::Itertools;
use serde::Serialize;

use crate::{
    engine::{
        cash_flow::{CashFlow, CashFlowRow},
        series::{WithMidpoints, split_at_crossing},
    },
    quantity::cost::Cost,
};

/// Two cash flows over the same horizon: the only input the payback synthesis accepts.
#[derive(Copy, Clone)]
#[must_use]
pub struct ComparedPair<'a> {
    a: &'a CashFlow,
    b: &'a CashFlow,
}

impl<'a> ComparedPair<'a> {
    /// [`None`] when the horizons differ: truncate both to the shorter one first.
    pub fn try_new(a: &'a CashFlow, b: &'a CashFlow) -> Option<Self> {
        (a.rows().len() == b.rows().len()).then_some(Self { a, b })
    }
}

/// Differential year of a binary comparison.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct DifferentialRow {
    /// Column-wise `B − A`.
    #[serde(flatten)]
    pub delta: CashFlowRow,

    /// Saving of choosing B over A this year: the capital and operating-cost differences with
    /// the sign flipped. Disposal and residual value stay out of the running payback.
    pub payback_contribution: Cost,

    /// Cumulative payback up to and including this year.
    pub payback: Cost,
}

/// Chart series, refined with a midpoint between every two years.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaybackChart {
    /// Fractional year of each sample.
    pub years: Vec<f64>,

    pub payback: Vec<Cost>,

    /// Cumulative cost of A: year-zero capital outlay plus the operating cost in present value.
    ///
    /// Disposal and residual value are left out, as in the payback curve.
    pub cumulative_cost_a: Vec<Cost>,

    /// Cumulative cost of B, same terms as [`PaybackChart::cumulative_cost_a`].
    pub cumulative_cost_b: Vec<Cost>,

    /// Unrecovered investment: the payback curve before it reaches zero.
    pub investment: Vec<Option<Cost>>,

    /// Recovered profit: the payback curve from zero on.
    pub profit: Vec<Option<Cost>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[must_use]
pub struct PaybackSeries {
    pub rows: Vec<DifferentialRow>,
    pub chart: PaybackChart,
}

impl PaybackSeries {
    pub fn synthesize(pair: ComparedPair<'_>) -> Self {
        let rows = pair
            .a
            .rows()
            .iter()
            .zip(pair.b.rows())
            .scan(Cost::ZERO, |payback, (a, b)| {
                let delta = b.minus(a);
                let payback_contribution = -(delta.capital_outlay + delta.operating_cost_pv);
                *payback += payback_contribution;
                Some(DifferentialRow { delta, payback_contribution, payback: *payback })
            })
            .collect_vec();

        let payback = rows.iter().map(|row| row.payback).with_midpoints();
        let (investment, profit) = split_at_crossing(&payback);
        let chart = PaybackChart {
            years: rows.iter().map(|row| f64::from(row.delta.year)).with_midpoints(),
            cumulative_cost_a: cumulative_cost(pair.a).with_midpoints(),
            cumulative_cost_b: cumulative_cost(pair.b).with_midpoints(),
            payback,
            investment,
            profit,
        };
        Self { rows, chart }
    }

    /// Fractional year where the payback curve first reaches zero.
    ///
    /// Interpolates linearly between the bracketing years, [`None`] if it never does.
    pub fn breakeven_year(&self) -> Option<f64> {
        let crossing = self.rows.iter().position(|row| row.payback >= Cost::ZERO)?;
        if crossing == 0 {
            return Some(0.0);
        }
        let (before, after) = (&self.rows[crossing - 1], &self.rows[crossing]);
        let fraction = -before.payback.0 / (after.payback.0 - before.payback.0);
        Some(f64::from(before.delta.year) + fraction)
    }

    /// Final cumulative payback at the end of the horizon.
    pub fn final_payback(&self) -> Cost {
        self.rows.last().map_or(Cost::ZERO, |row| row.payback)
    }
}

fn cumulative_cost(cash_flow: &CashFlow) -> impl Iterator<Item = Cost> {
    cash_flow.rows().iter().scan(Cost::ZERO, |total, row| {
        *total += row.capital_outlay + row.operating_cost_pv;
        Some(*total)
    })
}
