use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Candidates, CatalogRecord},
    field::Field,
    quantity::energy::KilowattHoursPerYear,
};

/// Energy-efficiency label class.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum EfficiencyClass {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl FromStr for EfficiencyClass {
    type Err = UnknownEfficiencyClass;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "E" => Ok(Self::E),
            "F" => Ok(Self::F),
            _ => Err(UnknownEfficiencyClass),
        }
    }
}

impl Display for EfficiencyClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Copy, Clone, Debug, derive_more::Display, derive_more::Error)]
#[display("unknown efficiency class")]
pub struct UnknownEfficiencyClass;

/// Normalized equipment record, the only shape the engine works with.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Equipment {
    pub brand: String,
    pub technology: String,
    pub capacity_btu: f64,
    pub annual_consumption: KilowattHoursPerYear,
    pub efficiency_index: f64,
    pub efficiency_class: Option<EfficiencyClass>,
}

impl Equipment {
    pub const MANUAL_BRAND: &'static str = "Manual equipment";

    /// Short label used for chart tooltips.
    pub fn label(&self) -> String {
        if self.capacity_btu > 0.0 {
            format!("{} - {} BTU/h", self.brand, self.capacity_btu)
        } else {
            self.brand.clone()
        }
    }

    fn is_usable(&self) -> bool {
        self.annual_consumption.is_finite() && self.annual_consumption.0 > 0.0
    }
}

impl From<&CatalogRecord> for Equipment {
    fn from(record: &CatalogRecord) -> Self {
        Self {
            brand: record.brand.clone(),
            technology: record.technology.clone(),
            capacity_btu: record.capacity_btu,
            annual_consumption: record.annual_consumption,
            efficiency_index: record.efficiency_index,
            efficiency_class: record.efficiency_class.parse().ok(),
        }
    }
}

/// Manually entered equipment, kept as typed until resolution.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualFields {
    pub name: Field,
    pub annual_consumption: Field,
    pub technology: Field,
    pub capacity_btu: Field,
    pub efficiency_index: Field,
    pub efficiency_class: Field,
}

/// What a comparison slot points at.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum Selection {
    /// Catalog reference; [`None`] until the user picks one.
    Catalog { id: Option<Field> },

    Manual(ManualFields),
}

impl Default for Selection {
    fn default() -> Self {
        Self::Catalog { id: None }
    }
}

impl Selection {
    /// Empty manual entry, as appended by «add equipment».
    pub fn manual() -> Self {
        Self::Manual(ManualFields::default())
    }

    /// Resolve the selection against the currently selectable catalog records.
    ///
    /// [`None`] is the normal «nothing to compare yet» state: no catalog pick, an identifier
    /// outside of the candidates, or a manual entry without a positive consumption.
    #[must_use]
    pub fn resolve(&self, candidates: &Candidates<'_>) -> Option<Equipment> {
        let equipment = match self {
            Self::Catalog { id } => Equipment::from(candidates.find(id.as_ref()?)?),
            Self::Manual(fields) => Equipment {
                brand: fields.name.text().unwrap_or(Equipment::MANUAL_BRAND).to_owned(),
                technology: fields.technology.text().unwrap_or_default().to_owned(),
                capacity_btu: fields.capacity_btu.number_or(0.0),
                annual_consumption: KilowattHoursPerYear::from(
                    fields.annual_consumption.number_or(0.0),
                ),
                efficiency_index: fields.efficiency_index.number_or(0.0),
                efficiency_class: fields.efficiency_class.as_str().parse().ok(),
            },
        };
        Some(equipment).filter(Equipment::is_usable)
    }

    /// Forget a catalog pick that is no longer among the candidates.
    pub fn retain_within(&mut self, candidates: &Candidates<'_>) {
        if let Self::Catalog { id } = self
            && id.as_ref().is_some_and(|id| !candidates.contains(id))
        {
            *id = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Filter, Filters, tests::sample_catalog};

    #[test]
    fn test_resolve_catalog() {
        let catalog = sample_catalog();
        let candidates = catalog.filtered(&Filters::default());
        let equipment =
            Selection::Catalog { id: Some(Field::from("1")) }.resolve(&candidates).unwrap();
        assert_eq!(equipment.brand, "Brisa");
        assert_eq!(equipment.efficiency_class, Some(EfficiencyClass::A));
        assert_eq!(equipment.annual_consumption, KilowattHoursPerYear::from(310.5));
    }

    #[test]
    fn test_resolve_catalog_nothing_selected() {
        let catalog = sample_catalog();
        let candidates = catalog.filtered(&Filters::default());
        assert!(Selection::default().resolve(&candidates).is_none());
        assert!(Selection::Catalog { id: Some(Field::from("42")) }.resolve(&candidates).is_none());
    }

    #[test]
    fn test_resolve_manual_defaults() {
        let catalog = sample_catalog();
        let candidates = catalog.filtered(&Filters::default());
        let fields =
            ManualFields { annual_consumption: Field::from("450.5"), ..Default::default() };
        let equipment = Selection::Manual(fields).resolve(&candidates).unwrap();
        assert_eq!(equipment.brand, Equipment::MANUAL_BRAND);
        assert_eq!(equipment.technology, "");
        assert_eq!(equipment.capacity_btu, 0.0);
        assert_eq!(equipment.efficiency_index, 0.0);
        assert_eq!(equipment.efficiency_class, None);
    }

    #[test]
    fn test_resolve_manual_zero_consumption() {
        let catalog = sample_catalog();
        let candidates = catalog.filtered(&Filters::default());
        for consumption in ["0", "", "abc", "-12"] {
            let fields =
                ManualFields { annual_consumption: Field::from(consumption), ..Default::default() };
            assert!(Selection::Manual(fields).resolve(&candidates).is_none(), "{consumption}");
        }
    }

    #[test]
    fn test_retain_within() {
        let catalog = sample_catalog();
        let filters = Filters { kind: Filter::only("Window"), ..Filters::default() };
        let candidates = catalog.filtered(&filters);
        let mut selection = Selection::Catalog { id: Some(Field::from("1")) };
        selection.retain_within(&candidates);
        assert_eq!(selection, Selection::Catalog { id: None });

        let mut selection = Selection::Catalog { id: Some(Field::from("3")) };
        selection.retain_within(&candidates);
        assert_eq!(selection, Selection::Catalog { id: Some(Field::from("3")) });
    }

    #[test]
    fn test_label() {
        let catalog = sample_catalog();
        let candidates = catalog.filtered(&Filters::default());
        let equipment =
            Selection::Catalog { id: Some(Field::from("2")) }.resolve(&candidates).unwrap();
        assert_eq!(equipment.label(), "Frost - 12000 BTU/h");
    }

    #[test]
    fn test_deserialize_selection() {
        let selection: Selection =
            toml::from_str("mode = \"manual\"\nname = \"CGF Brisa\"\nannual_consumption = 300")
                .unwrap();
        let Selection::Manual(fields) = selection else { panic!("expected a manual selection") };
        assert_eq!(fields.annual_consumption.as_str(), "300");
    }
}
