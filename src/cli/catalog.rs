use appliance_tco::{
    catalog::Catalog,
    prelude::*,
    session::Session,
    tables::build_filter_options_table,
};

pub fn filter_options(session: &Session, catalog: &Catalog) {
    println!("{}", build_filter_options_table(&catalog.options()));
    let n_candidates = catalog.filtered(&session.filters).len();
    info!(n_records = catalog.len(), n_candidates, "matching the session filters");
}
