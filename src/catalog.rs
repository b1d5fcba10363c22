mod filters;

use std::{fs, path::Path};

use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

pub use self::filters::{Filter, Filters};
use crate::{field::Field, prelude::*, quantity::energy::KilowattHoursPerYear};

/// Certified equipment record.
///
/// The aliases accept the field names of the published label database.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: Field,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "marca")]
    pub brand: String,

    /// Installation kind, for example split or window units.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "tipo")]
    pub kind: String,

    /// Cooling only, or cooling and heating.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "funcao")]
    pub function: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "potencia_btu")]
    pub capacity_btu: f64,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "tecnologia")]
    pub technology: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "tensao")]
    pub voltage: Field,

    /// Seasonal efficiency index.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "idrs")]
    pub efficiency_index: f64,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "classe")]
    pub efficiency_class: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "modelo_concat")]
    pub model: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "consumo_kwh_ano")]
    pub annual_consumption: KilowattHoursPerYear,
}

/// Read-only equipment catalog, supplied once per session.
#[derive(Clone, Debug, Default, Deserialize, derive_more::From)]
#[serde(transparent)]
pub struct Catalog(Vec<CatalogRecord>);

impl Catalog {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read the catalog from `{}`", path.display()))?;
        let catalog: Self = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse the catalog `{}`", path.display()))?;
        info!(n_records = catalog.len(), "loaded the catalog");
        Ok(catalog)
    }

    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogRecord> {
        self.0.iter()
    }

    /// Records matching all active filters, in catalog order.
    pub fn filtered(&self, filters: &Filters) -> Candidates<'_> {
        Candidates(self.0.iter().filter(|record| filters.matches(record)).collect())
    }

    /// Distinct values available for each filterable field.
    pub fn options(&self) -> FilterOptions {
        FilterOptions {
            kinds: self.distinct(|record| record.kind.as_str()),
            technologies: self.distinct(|record| record.technology.as_str()),
            functions: self.distinct(|record| record.function.as_str()),
            capacities: self
                .0
                .iter()
                .map(|record| record.capacity_btu)
                .filter(|capacity| *capacity != 0.0)
                .sorted_by_key(|capacity| OrderedFloat(*capacity))
                .dedup()
                .map(|capacity| capacity.to_string())
                .collect(),
            voltages: self.distinct(|record| record.voltage.as_str()),
            efficiency_classes: self.distinct(|record| record.efficiency_class.as_str()),
        }
    }

    fn distinct<'a>(&'a self, field: impl Fn(&'a CatalogRecord) -> &'a str) -> Vec<String> {
        self.0
            .iter()
            .map(field)
            .filter(|value| !value.is_empty())
            .sorted_unstable()
            .dedup()
            .map(ToOwned::to_owned)
            .collect()
    }
}

/// Filtered view of the catalog: the records a slot may currently select.
#[must_use]
pub struct Candidates<'a>(Vec<&'a CatalogRecord>);

impl<'a> Candidates<'a> {
    /// Exact match on the string form of the identifier.
    pub fn find(&self, id: &Field) -> Option<&'a CatalogRecord> {
        self.0.iter().copied().find(|record| record.id.as_str() == id.as_str())
    }

    pub fn contains(&self, id: &Field) -> bool {
        self.find(id).is_some()
    }

    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[must_use]
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub kinds: Vec<String>,
    pub technologies: Vec<String>,
    pub functions: Vec<String>,
    pub capacities: Vec<String>,
    pub voltages: Vec<String>,
    pub efficiency_classes: Vec<String>,
}
