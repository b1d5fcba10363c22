mod catalog;
mod compare;
mod export;

use std::path::PathBuf;

use appliance_tco::{field::Field, usage::UsageProfile};
use clap::{Parser, Subcommand};

pub use self::{catalog::filter_options, compare::compare, export::export};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub inputs: InputArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: evaluate the session and print the comparison.
    #[clap(name = "compare")]
    Compare,

    /// Write the comparison, or a single slot, as JSON for the spreadsheet writer.
    #[clap(name = "export")]
    Export(ExportArgs),

    /// Print the catalog filter options.
    #[clap(name = "catalog")]
    Catalog,
}

#[derive(Parser)]
pub struct InputArgs {
    /// Equipment catalog (JSON).
    #[clap(long = "catalog-path", env = "CATALOG_PATH", default_value = "catalog.json")]
    pub catalog_path: PathBuf,

    /// Session file (TOML) with the usage profile, the filters and the slots.
    #[clap(long = "session-path", env = "SESSION_PATH", default_value = "session.toml")]
    pub session_path: PathBuf,

    #[clap(flatten)]
    pub usage: UsageArgs,
}

/// Usage overrides, parsed as permissively as the session file.
#[derive(Parser)]
pub struct UsageArgs {
    #[clap(long = "hours-per-day", env = "USAGE_HOURS_PER_DAY")]
    pub hours_per_day: Option<String>,

    /// Energy tariff per kilowatt-hour.
    #[clap(long = "tariff", env = "USAGE_TARIFF")]
    pub tariff: Option<String>,

    #[clap(long = "days-per-year", env = "USAGE_DAYS_PER_YEAR")]
    pub days_per_year: Option<String>,

    /// Real discount rate, for example `0.01`.
    #[clap(long = "discount-rate", env = "USAGE_DISCOUNT_RATE")]
    pub discount_rate: Option<String>,
}

impl UsageArgs {
    pub fn apply_to(&self, mut usage: UsageProfile) -> UsageProfile {
        if let Some(hours_per_day) = &self.hours_per_day {
            usage = usage.with_hours_per_day(&Field::new(hours_per_day.as_str()));
        }
        if let Some(tariff) = &self.tariff {
            usage = usage.with_tariff(&Field::new(tariff.as_str()));
        }
        if let Some(days_per_year) = &self.days_per_year {
            usage = usage.with_days_per_year(&Field::new(days_per_year.as_str()));
        }
        if let Some(discount_rate) = &self.discount_rate {
            usage = usage.with_discount_rate(&Field::new(discount_rate.as_str()));
        }
        usage
    }
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Output path, defaults to a name derived from the export.
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Reliability summaries (JSON) to pass through.
    #[clap(long)]
    pub reliability: Option<PathBuf>,

    /// Export a single slot over its own useful life instead.
    #[clap(long)]
    pub slot: Option<u32>,
}
