use serde::{Deserialize, Serialize};

use crate::{
    field::Field,
    quantity::cost::{Cost, CostPerYear},
};

/// Per-slot cost assumptions. Anything unset is zero, which is not an error.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CostInput")]
#[must_use]
pub struct CostStructure {
    pub acquisition: Cost,
    pub installation: Cost,

    /// Useful life in whole years, `1..=25` when set.
    pub useful_life: Option<u32>,

    pub maintenance: CostPerYear,
    pub disposal: Cost,
}

impl CostStructure {
    pub const MAX_USEFUL_LIFE: u32 = 25;

    /// Acquisition plus installation, booked entirely at year zero.
    pub fn capital_outlay(&self) -> Cost {
        self.acquisition + self.installation
    }

    pub fn with_useful_life(mut self, years: u32) -> Self {
        self.useful_life = Some(years.clamp(1, Self::MAX_USEFUL_LIFE));
        self
    }

    /// Parse a typed useful life: positive numbers are truncated to whole years and clamped.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn parse_useful_life(field: &Field) -> Option<u32> {
        field
            .number()
            .filter(|years| *years > 0.0)
            .map(|years| years.trunc().clamp(1.0, f64::from(Self::MAX_USEFUL_LIFE)) as u32)
    }

    /// Own horizon of this slot, at least one year.
    pub fn horizon(&self) -> u32 {
        self.useful_life.unwrap_or(1).max(1)
    }
}

/// Shortest useful life among the given cost structures, at least one year.
pub fn common_horizon<'a>(costs: impl IntoIterator<Item = &'a CostStructure>) -> u32 {
    costs.into_iter().filter_map(|costs| costs.useful_life).min().unwrap_or(1).max(1)
}

/// Cost structure as typed by the user.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CostInput {
    pub acquisition: Field,
    pub installation: Field,
    pub useful_life: Field,
    pub maintenance: Field,
    pub disposal: Field,
}

impl From<CostInput> for CostStructure {
    fn from(input: CostInput) -> Self {
        Self {
            acquisition: Cost::new(input.acquisition.number_or(0.0)),
            installation: Cost::new(input.installation.number_or(0.0)),
            useful_life: Self::parse_useful_life(&input.useful_life),
            maintenance: CostPerYear::new(input.maintenance.number_or(0.0)),
            disposal: Cost::new(input.disposal.number_or(0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_useful_life() {
        assert_eq!(CostStructure::parse_useful_life(&Field::from("10")), Some(10));
        assert_eq!(CostStructure::parse_useful_life(&Field::from("7.9")), Some(7));
        assert_eq!(CostStructure::parse_useful_life(&Field::from("0.5")), Some(1));
        assert_eq!(CostStructure::parse_useful_life(&Field::from("40")), Some(25));
        assert_eq!(CostStructure::parse_useful_life(&Field::from("0")), None);
        assert_eq!(CostStructure::parse_useful_life(&Field::from("")), None);
    }

    #[test]
    fn test_common_horizon() {
        let costs = [
            CostStructure::default().with_useful_life(10),
            CostStructure::default(),
            CostStructure::default().with_useful_life(7),
        ];
        assert_eq!(common_horizon(&costs), 7);
        assert_eq!(common_horizon(&[CostStructure::default()]), 1);
        assert_eq!(common_horizon(std::iter::empty()), 1);
    }

    #[test]
    fn test_deserialize_partial() {
        let costs: CostStructure =
            toml::from_str("acquisition = 2000\ninstallation = \"500\"\nuseful_life = 10").unwrap();
        assert_eq!(costs.capital_outlay(), Cost::new(2500.0));
        assert_eq!(costs.useful_life, Some(10));
        assert_eq!(costs.maintenance, CostPerYear::ZERO);
        assert_eq!(costs.disposal, Cost::ZERO);
    }
}
