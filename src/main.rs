#![allow(clippy::doc_markdown)]

mod cli;

use appliance_tco::{
    catalog::Catalog,
    prelude::*,
    session::{Event, Session},
};
use clap::{Parser, crate_version};

use crate::cli::{Args, Command, compare, export, filter_options};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();

    let catalog = match Catalog::read_from(&args.inputs.catalog_path) {
        Ok(catalog) => catalog,
        Err(error) => {
            error!("{error:#}");
            eprintln!("The equipment catalog could not be loaded, there is nothing to compare.");
            return Ok(());
        }
    };
    let session = Session::read_from(&args.inputs.session_path)?;
    let usage = args.inputs.usage.apply_to(session.usage);
    let session = session.reduce(Event::UsageChanged(usage), &catalog);

    match args.command {
        Command::Compare => compare(&session, &catalog),
        Command::Export(args) => export(&args, &session, &catalog)?,
        Command::Catalog => filter_options(&session, &catalog),
    }

    info!("done!");
    Ok(())
}
