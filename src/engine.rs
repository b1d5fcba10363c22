//! Financial and energy computation engine.
//!
//! Everything here is a pure function of its explicit inputs: no I/O, no shared state.

pub mod cash_flow;
pub mod payback;
pub mod residual;
pub mod series;
pub mod totals;

pub use self::{
    cash_flow::{CashFlow, CashFlowRow, CashFlowTotals},
    payback::{ComparedPair, DifferentialRow, PaybackChart, PaybackSeries},
    totals::{ComputedEntry, compute_energy_totals},
};
