//! Export documents handed over to the spreadsheet writer.

use std::{fmt::Debug, fs, path::Path};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    engine::{CashFlow, CashFlowRow, ComputedEntry, DifferentialRow},
    equipment::EfficiencyClass,
    prelude::*,
    quantity::{
        cost::{Cost, CostPerYear},
        discount::DiscountRate,
        energy::{KilowattHours, KilowattHoursPerYear},
        rate::KilowattHourRate,
    },
    session::{BinaryComparison, Evaluation},
    usage::UsageProfile,
};

/// Lifetime figures of one compared equipment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryRecord {
    pub brand: String,
    pub technology: String,
    pub efficiency_index: f64,
    pub lifetime_consumption: KilowattHours,
    pub lifetime_energy_cost: Cost,
    pub operating_cost_total: Cost,
    pub lifetime_cost: Cost,
    pub lifetime_cost_pv: Cost,
}

impl From<&ComputedEntry> for SummaryRecord {
    fn from(entry: &ComputedEntry) -> Self {
        Self {
            brand: entry.equipment.brand.clone(),
            technology: entry.equipment.technology.clone(),
            efficiency_index: entry.equipment.efficiency_index,
            lifetime_consumption: entry.lifetime_consumption,
            lifetime_energy_cost: entry.lifetime_energy_cost,
            operating_cost_total: entry.operating_cost_total,
            lifetime_cost: entry.lifetime_cost,
            lifetime_cost_pv: entry.lifetime_cost_pv,
        }
    }
}

/// Exported cash-flow line. Only the operating cost in present value is exported.
#[skip_serializing_none]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct CashFlowRecord {
    pub year: u32,
    pub capital_outlay: Cost,
    pub residual_value: Cost,
    pub disposal: Cost,
    pub maintenance: Cost,
    pub energy: Cost,
    pub operating_cost_pv: Cost,
    pub total_pv: Cost,

    /// Cumulative payback, differential tables only.
    pub payback: Option<Cost>,
}

impl From<&CashFlowRow> for CashFlowRecord {
    fn from(row: &CashFlowRow) -> Self {
        Self {
            year: row.year,
            capital_outlay: row.capital_outlay,
            residual_value: row.residual_value,
            disposal: row.disposal,
            maintenance: row.maintenance,
            energy: row.energy,
            operating_cost_pv: row.operating_cost_pv,
            total_pv: row.total_pv,
            payback: None,
        }
    }
}

impl From<&DifferentialRow> for CashFlowRecord {
    fn from(row: &DifferentialRow) -> Self {
        Self { payback: Some(row.payback), ..Self::from(&row.delta) }
    }
}

fn records(cash_flow: &CashFlow) -> Vec<CashFlowRecord> {
    cash_flow.rows().iter().map(CashFlowRecord::from).collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonCashFlows {
    pub horizon: u32,

    /// Lifetime figures of A and B over the comparison horizon, matching their cash flows.
    pub summary: [SummaryRecord; 2],

    pub a: Vec<CashFlowRecord>,
    pub b: Vec<CashFlowRecord>,
    pub differential: Vec<CashFlowRecord>,
}

impl From<&BinaryComparison> for ComparisonCashFlows {
    fn from(comparison: &BinaryComparison) -> Self {
        Self {
            horizon: comparison.horizon,
            summary: [
                SummaryRecord::from(&comparison.entry_a),
                SummaryRecord::from(&comparison.entry_b),
            ],
            a: records(&comparison.cash_flow_a),
            b: records(&comparison.cash_flow_b),
            differential: comparison.payback.rows.iter().map(CashFlowRecord::from).collect(),
        }
    }
}

/// Lifecycle estimate produced elsewhere, exported as is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReliabilitySummary {
    #[serde(alias = "rotulo")]
    pub label: String,

    #[serde(alias = "mttf")]
    pub mttf_years: f64,

    /// Weibull characteristic life.
    #[serde(alias = "eta_aj")]
    pub characteristic_life: f64,

    #[serde(alias = "AF")]
    pub acceleration_factor: f64,

    #[serde(default, alias = "tecnologia")]
    pub technology: Option<String>,
}

impl ReliabilitySummary {
    #[instrument(name = "Reading the reliability summaries…")]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Result<Vec<Self>> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read the reliability summaries from `{}`", path.display())
        })?;
        serde_json::from_str(&contents).with_context(|| {
            format!("failed to parse the reliability summaries `{}`", path.display())
        })
    }
}

/// Batch comparison export.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[must_use]
pub struct ExportDocument {
    /// Every resolved equipment over the batch horizon.
    pub summary: Vec<SummaryRecord>,

    /// Present only while a binary comparison is active.
    pub cash_flows: Option<ComparisonCashFlows>,

    pub reliability: Option<Vec<ReliabilitySummary>>,
}

impl ExportDocument {
    /// [`None`] when nothing resolved: there is nothing to export.
    pub fn new(evaluation: &Evaluation, reliability: Vec<ReliabilitySummary>) -> Option<Self> {
        if evaluation.entries.is_empty() {
            return None;
        }
        Some(Self {
            summary: evaluation
                .entries
                .iter()
                .map(|entry| SummaryRecord::from(&entry.entry))
                .collect(),
            cash_flows: evaluation.comparison.as_ref().map(ComparisonCashFlows::from),
            reliability: Some(reliability).filter(|reliability| !reliability.is_empty()),
        })
    }

    pub const fn file_name() -> &'static str {
        "comparison.json"
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SingleSummary {
    pub brand: String,
    pub technology: String,
    pub efficiency_index: f64,
    pub capacity_btu: f64,
    pub efficiency_class: Option<EfficiencyClass>,
    pub annual_consumption: KilowattHoursPerYear,
    pub annual_energy_cost: CostPerYear,
    pub acquisition: Cost,
    pub installation: Cost,
    pub maintenance: CostPerYear,
    pub disposal: Cost,
    pub useful_life: Option<u32>,

    /// Sum of the exported operating cost in present value.
    pub operating_cost_pv: Cost,

    /// Sum of the exported present-value totals.
    pub total_pv: Cost,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct UsageParameters {
    pub hours_per_day: f64,
    pub days_per_year: u16,
    pub hours_per_year: f64,
    pub tariff: KilowattHourRate,
    pub discount_rate: DiscountRate,
}

impl From<&UsageProfile> for UsageParameters {
    fn from(usage: &UsageProfile) -> Self {
        Self {
            hours_per_day: usage.hours_per_day,
            days_per_year: usage.days_per_year,
            hours_per_year: usage.hours_per_year(),
            tariff: usage.tariff,
            discount_rate: usage.discount_rate,
        }
    }
}

/// Export of a single equipment over its own useful life.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[must_use]
pub struct SingleEquipmentExport {
    pub summary: SingleSummary,
    pub parameters: UsageParameters,
    pub cash_flow: Vec<CashFlowRecord>,
}

impl SingleEquipmentExport {
    pub const MAX_BRAND_LENGTH: usize = 40;

    pub fn new(entry: &ComputedEntry, usage: &UsageProfile) -> Self {
        let cash_flow = records(
            &CashFlow::builder()
                .entry(entry)
                .horizon(entry.costs.horizon())
                .discount_rate(usage.discount_rate)
                .build(),
        );
        let equipment = &entry.equipment;
        let summary = SingleSummary {
            brand: equipment.brand.clone(),
            technology: equipment.technology.clone(),
            efficiency_index: equipment.efficiency_index,
            capacity_btu: equipment.capacity_btu,
            efficiency_class: equipment.efficiency_class,
            annual_consumption: entry.annual_consumption,
            annual_energy_cost: entry.annual_energy_cost,
            acquisition: entry.costs.acquisition,
            installation: entry.costs.installation,
            maintenance: entry.costs.maintenance,
            disposal: entry.costs.disposal,
            useful_life: entry.costs.useful_life,
            operating_cost_pv: cash_flow.iter().map(|row| row.operating_cost_pv).sum(),
            total_pv: cash_flow.iter().map(|row| row.total_pv).sum(),
        };
        Self { summary, parameters: UsageParameters::from(usage), cash_flow }
    }

    /// Suggested file name stem, safe on common file systems.
    pub fn file_stem(&self) -> String {
        let brand = self.summary.brand.trim();
        let brand = if brand.is_empty() { "equipment" } else { brand };
        let is_reserved =
            |c: &char| matches!(*c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|');
        let safe: String = brand
            .chars()
            .dedup_by(|lhs, rhs| is_reserved(lhs) && is_reserved(rhs))
            .map(|c| if is_reserved(&c) { '_' } else { c })
            .take(Self::MAX_BRAND_LENGTH)
            .collect();
        format!("comparison-{safe}")
    }
}

/// Write the document as pretty JSON.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn write_json(document: &impl Serialize, path: &Path) -> Result {
    let contents = serde_json::to_string_pretty(document)?;
    fs::write(path, contents)
        .with_context(|| format!("failed to write the export to `{}`", path.display()))?;
    info!("exported");
    Ok(())
}
