use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    catalog::FilterOptions,
    engine::{CashFlow, PaybackChart, PaybackSeries},
    quantity::cost::Cost,
    ranking::Ranking,
    session::SlotEntry,
    usage::UsageProfile,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn cost_cell(cost: Cost) -> Cell {
    let cell = Cell::new(cost).set_alignment(CellAlignment::Right);
    if cost.is_negligible() { cell.add_attribute(Attribute::Dim) } else { cell }
}

/// Payback goes red while the investment is not yet recovered.
fn payback_cell(payback: Cost) -> Cell {
    Cell::new(payback)
        .set_alignment(CellAlignment::Right)
        .fg(if payback >= Cost::ZERO { Color::Green } else { Color::Red })
}

pub fn build_usage_table(usage: &UsageProfile, horizon: u32, n_candidates: usize) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Usage", "Tariff", "Days", "Hours/year", "Discount", "Horizon", "Catalog",
    ]);
    table.add_row(vec![
        Cell::new(usage.formatted_hours_per_day()),
        Cell::new(usage.tariff).set_alignment(CellAlignment::Right),
        Cell::new(usage.days_per_year).set_alignment(CellAlignment::Right),
        Cell::new(format!("{:.1}", usage.hours_per_year())).set_alignment(CellAlignment::Right),
        Cell::new(usage.discount_rate).set_alignment(CellAlignment::Right),
        Cell::new(format!("{horizon} yr")).set_alignment(CellAlignment::Right),
        Cell::new(n_candidates).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
    ]);
    table
}

pub fn build_summary_table(entries: &[SlotEntry]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Slot",
        "Brand",
        "Technology",
        "Class",
        "Index",
        "Consumption",
        "Energy",
        "Energy PV",
        "Operating",
        "Lifetime",
        "Lifetime PV",
    ]);
    for SlotEntry { key, entry } in entries {
        let equipment = &entry.equipment;
        table.add_row(vec![
            Cell::new(key).add_attribute(Attribute::Dim),
            Cell::new(&equipment.brand),
            Cell::new(&equipment.technology),
            Cell::new(
                equipment.efficiency_class.map(|class| class.to_string()).unwrap_or_default(),
            )
            .set_alignment(CellAlignment::Center),
            Cell::new(equipment.efficiency_index).set_alignment(CellAlignment::Right),
            Cell::new(entry.lifetime_consumption).set_alignment(CellAlignment::Right),
            cost_cell(entry.lifetime_energy_cost),
            cost_cell(entry.lifetime_energy_cost_pv),
            cost_cell(entry.operating_cost_total),
            cost_cell(entry.lifetime_cost),
            cost_cell(entry.lifetime_cost_pv).add_attribute(Attribute::Bold),
        ]);
    }
    table
}

pub fn build_ranking_table(ranking: &Ranking) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "By consumption", "kWh", "By energy cost", "PV"]);
    let bars = ranking.by_consumption.iter().zip(&ranking.by_energy_cost);
    for (by_consumption, by_energy_cost) in bars {
        table.add_row(vec![
            Cell::new(by_consumption.label()).add_attribute(Attribute::Dim),
            Cell::new(&by_consumption.tooltip),
            Cell::new(format!("{:.1}", by_consumption.value)).set_alignment(CellAlignment::Right),
            Cell::new(&by_energy_cost.tooltip),
            Cell::new(format!("{:.2}", by_energy_cost.value)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_cash_flow_table(cash_flow: &CashFlow) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Year",
        "Capital",
        "Residual",
        "Disposal",
        "Maintenance",
        "Energy",
        "Operating",
        "Operating PV",
        "Total PV",
    ]);
    for row in cash_flow.rows() {
        table.add_row(vec![
            Cell::new(row.year).add_attribute(Attribute::Dim),
            cost_cell(row.capital_outlay),
            cost_cell(row.residual_value),
            cost_cell(row.disposal),
            cost_cell(row.maintenance),
            cost_cell(row.energy),
            cost_cell(row.operating_cost),
            cost_cell(row.operating_cost_pv),
            cost_cell(row.total_pv),
        ]);
    }
    let totals = cash_flow.totals();
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        cost_cell(totals.capital_outlay),
        cost_cell(totals.residual_value),
        cost_cell(totals.disposal),
        cost_cell(totals.maintenance),
        cost_cell(totals.energy),
        cost_cell(totals.operating_cost),
        cost_cell(totals.operating_cost_pv),
        cost_cell(totals.total_pv).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn build_differential_table(series: &PaybackSeries) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Year",
        "Δ Capital",
        "Δ Residual",
        "Δ Disposal",
        "Δ Operating PV",
        "Δ Total PV",
        "Saving",
        "Payback",
    ]);
    for row in &series.rows {
        table.add_row(vec![
            Cell::new(row.delta.year).add_attribute(Attribute::Dim),
            cost_cell(row.delta.capital_outlay),
            cost_cell(row.delta.residual_value),
            cost_cell(row.delta.disposal),
            cost_cell(row.delta.operating_cost_pv),
            cost_cell(row.delta.total_pv),
            cost_cell(row.payback_contribution),
            payback_cell(row.payback),
        ]);
    }
    table
}

pub fn build_chart_table(chart: &PaybackChart) -> Table {
    let optional_cell = |value: Option<Cost>| {
        value.map_or_else(|| Cell::new("-").add_attribute(Attribute::Dim), payback_cell)
    };
    let mut table = new_table();
    table.set_header(vec![
        "Year", "Payback", "Cumulative A", "Cumulative B", "Investment", "Profit",
    ]);
    for (index, year) in chart.years.iter().enumerate() {
        table.add_row(vec![
            Cell::new(format!("{year:.1}")).add_attribute(Attribute::Dim),
            payback_cell(chart.payback[index]),
            cost_cell(chart.cumulative_cost_a[index]),
            cost_cell(chart.cumulative_cost_b[index]),
            optional_cell(chart.investment[index]),
            optional_cell(chart.profit[index]),
        ]);
    }
    table
}

pub fn build_filter_options_table(options: &FilterOptions) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Filter", "Options"]);
    for (name, values) in [
        ("kind", &options.kinds),
        ("technology", &options.technologies),
        ("function", &options.functions),
        ("capacity", &options.capacities),
        ("voltage", &options.voltages),
        ("efficiency_class", &options.efficiency_classes),
    ] {
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(values.join(", ")),
        ]);
    }
    table
}
