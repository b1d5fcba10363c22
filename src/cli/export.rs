use std::path::PathBuf;

use appliance_tco::{
    catalog::Catalog,
    export::{ExportDocument, ReliabilitySummary, SingleEquipmentExport, write_json},
    prelude::*,
    session::{Session, SlotKey},
};

use crate::cli::ExportArgs;

#[instrument(skip_all)]
pub fn export(args: &ExportArgs, session: &Session, catalog: &Catalog) -> Result {
    let evaluation = session.evaluate(catalog);

    if let Some(key) = args.slot.map(SlotKey) {
        let entry = evaluation
            .entries
            .iter()
            .find(|entry| entry.key == key)
            .with_context(|| format!("slot {key} does not resolve to an equipment"))?;
        let export = SingleEquipmentExport::new(&entry.entry, &session.usage);
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.json", export.file_stem())));
        return write_json(&export, &path);
    }

    let reliability = match &args.reliability {
        Some(path) => ReliabilitySummary::read_from(path)?,
        None => Vec::new(),
    };
    let Some(document) = ExportDocument::new(&evaluation, reliability) else {
        warn!("nothing to export, none of the slots resolves to an equipment");
        return Ok(());
    };
    let path = args.output.clone().unwrap_or_else(|| PathBuf::from(ExportDocument::file_name()));
    write_json(&document, &path)
}
