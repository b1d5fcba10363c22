use std::{fmt::Debug, fs, path::Path};

use serde::Deserialize;

use crate::{
    catalog::Filters,
    costs::CostStructure,
    equipment::Selection,
    prelude::*,
    session::{
        Session,
        slot::{Slot, SlotKey},
    },
    usage::UsageProfile,
};

/// Session file as written by hand.
///
/// Slots are keyed by their 1-based position in the file, `comparison` refers to these keys.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SessionConfig {
    usage: UsageProfile,
    filters: Filters,
    comparison: Option<(SlotKey, SlotKey)>,
    slots: Vec<SlotConfig>,
}

#[derive(Debug, Deserialize)]
struct SlotConfig {
    #[serde(flatten)]
    selection: Selection,

    #[serde(default)]
    costs: CostStructure,
}

impl From<SessionConfig> for Session {
    fn from(config: SessionConfig) -> Self {
        let mut slots: Vec<_> = (1..)
            .map(SlotKey)
            .zip(config.slots)
            .map(|(key, slot)| Slot { key, selection: slot.selection, costs: slot.costs })
            .collect();
        while slots.len() < Self::MIN_SLOTS {
            slots.push(Slot::new(Self::next_key(&slots), Selection::default()));
        }
        slots.truncate(Self::MAX_SLOTS);
        Self { usage: config.usage, filters: config.filters, slots, comparison: config.comparison }
    }
}

impl Session {
    /// Read the session file, or start an empty session when there is none.
    #[instrument(name = "Reading the session…")]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            warn!(path = %path.display(), "no session file, starting an empty session");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read the session from `{}`", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("failed to parse the session `{}`", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: SessionConfig = toml::from_str(contents)?;
        Ok(config.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        field::Field,
        quantity::{cost::Cost, discount::DiscountRate},
    };

    #[test]
    fn test_from_toml() {
        let session = Session::from_toml(
            r#"
            comparison = [3, 1]

            [usage]
            tariff = "0.95"
            discount_rate = 0.05

            [filters]
            kind = "Split"

            [[slots]]
            mode = "catalog"
            id = 1

            [slots.costs]
            acquisition = 2000
            useful_life = "12"

            [[slots]]
            mode = "catalog"

            [[slots]]
            mode = "manual"
            name = "Prototype"
            annual_consumption = "280,5"
            "#,
        )
        .unwrap();

        assert_eq!(session.usage.discount_rate, DiscountRate::new(0.05));
        assert_eq!(session.usage.days_per_year, UsageProfile::DEFAULT_DAYS_PER_YEAR);
        assert_eq!(session.comparison, Some((SlotKey(3), SlotKey(1))));
        assert_eq!(session.slots.len(), 3);

        let first = &session.slots[0];
        assert_eq!(first.key, SlotKey(1));
        assert_eq!(first.selection, Selection::Catalog { id: Some(Field::from("1")) });
        assert_eq!(first.costs.acquisition, Cost::new(2000.0));
        assert_eq!(first.costs.useful_life, Some(12));

        assert_eq!(session.slots[1].selection, Selection::default());
        let Selection::Manual(fields) = &session.slots[2].selection else {
            panic!("expected a manual selection");
        };
        assert_eq!(fields.annual_consumption.number(), Some(280.0));
    }

    #[test]
    fn test_empty_document() {
        let session = Session::from_toml("").unwrap();
        assert_eq!(session, Session::default());
        assert_eq!(session.slots.len(), Session::MIN_SLOTS);
    }

    #[test]
    fn test_missing_file() {
        let session = Session::read_from("/nonexistent/session.toml").unwrap();
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_unreadable_file() {
        let path = std::env::temp_dir().join("appliance-tco-unreadable-session.toml");
        fs::write(&path, [0xFF, 0xFE, 0xFD]).unwrap();
        let error = Session::read_from(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(format!("{error:#}").starts_with("failed to read the session from"), "{error:#}");
    }
}
