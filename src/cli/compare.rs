use appliance_tco::{
    catalog::Catalog,
    prelude::*,
    session::Session,
    tables::{
        build_cash_flow_table,
        build_chart_table,
        build_differential_table,
        build_ranking_table,
        build_summary_table,
        build_usage_table,
    },
};

#[instrument(skip_all)]
pub fn compare(session: &Session, catalog: &Catalog) {
    let evaluation = session.evaluate(catalog);
    info!(
        n_slots = session.slots.len(),
        n_entries = evaluation.entries.len(),
        horizon = evaluation.horizon,
        "evaluated",
    );
    println!("{}", build_usage_table(&session.usage, evaluation.horizon, evaluation.n_candidates));
    if evaluation.entries.is_empty() {
        warn!("none of the slots resolves to an equipment, pick one from the catalog");
        return;
    }
    println!("{}", build_summary_table(&evaluation.entries));
    println!("{}", build_ranking_table(&evaluation.ranking));

    let Some(comparison) = &evaluation.comparison else {
        info!("fewer than two comparable slots, comparison charts are suppressed");
        return;
    };
    info!(a = %comparison.a, b = %comparison.b, horizon = comparison.horizon, "binary comparison");
    println!("{}", build_cash_flow_table(&comparison.cash_flow_a));
    println!("{}", build_cash_flow_table(&comparison.cash_flow_b));
    println!("{}", build_differential_table(&comparison.payback));
    match comparison.payback.breakeven_year() {
        Some(year) => info!(year, "breaks even"),
        None => info!(
            payback = %comparison.payback.final_payback(),
            "does not break even within the horizon",
        ),
    }
    println!("{}", build_chart_table(&comparison.payback.chart));
}
