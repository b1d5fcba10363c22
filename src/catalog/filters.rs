use serde::{Deserialize, Serialize};

use crate::{catalog::CatalogRecord, field::Field};

/// Single catalog filter: either «all» or an exact match on the field's string form.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "Field", into = "Field")]
pub struct Filter(Option<String>);

impl Filter {
    pub const ALL: Self = Self(None);

    pub fn only(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    pub fn accepts(&self, value: &str) -> bool {
        self.0.as_deref().is_none_or(|expected| expected == value)
    }
}

impl From<Field> for Filter {
    fn from(field: Field) -> Self {
        match field.text() {
            None => Self::ALL,
            Some(text) if text.eq_ignore_ascii_case("all") => Self::ALL,
            Some(text) => Self::only(text),
        }
    }
}

impl From<Filter> for Field {
    fn from(filter: Filter) -> Self {
        Self::new(filter.0.unwrap_or_else(|| "all".to_owned()))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
    pub kind: Filter,
    pub technology: Filter,
    pub function: Filter,
    pub capacity: Filter,
    pub voltage: Filter,
    pub efficiency_class: Filter,
}

impl Filters {
    pub fn matches(&self, record: &CatalogRecord) -> bool {
        self.kind.accepts(&record.kind)
            && self.technology.accepts(&record.technology)
            && self.function.accepts(&record.function)
            && self.capacity.accepts(&record.capacity_btu.to_string())
            && self.voltage.accepts(record.voltage.as_str())
            && self.efficiency_class.accepts(&record.efficiency_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;

    #[test]
    fn test_all_by_default() {
        assert_eq!(sample_catalog().filtered(&Filters::default()).len(), 3);
    }

    #[test]
    fn test_capacity_and_function() {
        let filters = Filters {
            capacity: Filter::only("9000"),
            function: Filter::only("Frio"),
            ..Filters::default()
        };
        assert_eq!(sample_catalog().filtered(&filters).len(), 2);
    }

    #[test]
    fn test_voltage_string_form() {
        let filters = Filters { voltage: Filter::only("127"), ..Filters::default() };
        let catalog = sample_catalog();
        let candidates = catalog.filtered(&filters);
        assert_eq!(candidates.len(), 1);
        assert!(candidates.contains(&Field::from("2")));
    }

    #[test]
    fn test_deserialize_all() {
        let filters: Filters = toml::from_str("kind = \"all\"\ncapacity = 12000").unwrap();
        assert_eq!(filters.kind, Filter::ALL);
        assert_eq!(filters.capacity, Filter::only("12000"));
        assert_eq!(filters.technology, Filter::ALL);
    }
}
