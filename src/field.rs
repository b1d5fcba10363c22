use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Free-form input exactly as the user typed it.
///
/// Numbers are extracted permissively: the longest numeric prefix wins, and anything unparseable
/// or non-finite falls back to the caller's default instead of failing.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawField")]
#[must_use]
pub struct Field(String);

impl Field {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-blank trimmed text, if any.
    pub fn text(&self) -> Option<&str> {
        Some(self.0.trim()).filter(|text| !text.is_empty())
    }

    pub fn number(&self) -> Option<f64> {
        let text = self.0.trim_start();
        let end = text
            .char_indices()
            .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
            .last()
            .map_or(0, |(index, c)| index + c.len_utf8());
        (1..=end)
            .rev()
            .find_map(|length| text[..length].parse::<f64>().ok())
            .filter(|number| number.is_finite())
    }

    pub fn number_or(&self, fallback: f64) -> f64 {
        self.number().unwrap_or(fallback)
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Field {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<f64> for Field {
    fn from(number: f64) -> Self {
        Self(number.to_string())
    }
}

/// Accepts whatever a hand-written TOML or JSON document may put in a value slot.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawField {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl From<RawField> for Field {
    fn from(raw: RawField) -> Self {
        match raw {
            RawField::Text(text) => Self(text),
            RawField::Integer(number) => Self(number.to_string()),
            RawField::Float(number) => Self(number.to_string()),
            RawField::Boolean(flag) => Self(flag.to_string()),
        }
    }
}
