use serde::{Deserialize, Serialize};

use crate::{
    field::Field,
    fmt::FormattedHoursPerDay,
    quantity::{discount::DiscountRate, rate::KilowattHourRate},
};

/// Shared usage assumptions of a comparison session.
///
/// Deserializes from free-form fields; anything unparseable falls back to the canonical default.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "UsageInput")]
#[must_use]
pub struct UsageProfile {
    pub hours_per_day: f64,
    pub tariff: KilowattHourRate,
    pub days_per_year: u16,
    pub discount_rate: DiscountRate,
}

impl UsageProfile {
    pub const DEFAULT_HOURS_PER_DAY: f64 = 5.698;
    pub const DEFAULT_TARIFF: KilowattHourRate = KilowattHourRate::new(1.80);
    pub const DEFAULT_DAYS_PER_YEAR: u16 = 253;
    pub const DEFAULT_DISCOUNT_RATE: DiscountRate = DiscountRate::new(0.01);

    pub const DEFAULT: Self = Self {
        hours_per_day: Self::DEFAULT_HOURS_PER_DAY,
        tariff: Self::DEFAULT_TARIFF,
        days_per_year: Self::DEFAULT_DAYS_PER_YEAR,
        discount_rate: Self::DEFAULT_DISCOUNT_RATE,
    };

    pub fn with_hours_per_day(mut self, field: &Field) -> Self {
        self.hours_per_day = field
            .number()
            .filter(|hours| *hours > 0.0)
            .unwrap_or(Self::DEFAULT_HOURS_PER_DAY);
        self
    }

    pub fn with_tariff(mut self, field: &Field) -> Self {
        self.tariff = field
            .number()
            .map_or(Self::DEFAULT_TARIFF, |tariff| {
                KilowattHourRate::new(tariff).max(KilowattHourRate::ZERO)
            });
        self
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn with_days_per_year(mut self, field: &Field) -> Self {
        self.days_per_year = field
            .number()
            .map_or(Self::DEFAULT_DAYS_PER_YEAR, |days| days.round().clamp(1.0, 366.0) as u16);
        self
    }

    pub fn with_discount_rate(mut self, field: &Field) -> Self {
        self.discount_rate = field
            .number()
            .map_or(Self::DEFAULT_DISCOUNT_RATE, |rate| {
                DiscountRate::new(rate).max(DiscountRate::ZERO)
            });
        self
    }

    /// Operating hours per year, reported alongside the exported parameters.
    pub fn hours_per_year(&self) -> f64 {
        self.hours_per_day * f64::from(self.days_per_year)
    }

    pub const fn formatted_hours_per_day(&self) -> FormattedHoursPerDay {
        FormattedHoursPerDay(self.hours_per_day)
    }
}

impl Default for UsageProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Usage profile as typed by the user.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct UsageInput {
    pub hours_per_day: Field,
    pub tariff: Field,
    pub days_per_year: Field,
    pub discount_rate: Field,
}

impl From<UsageInput> for UsageProfile {
    fn from(input: UsageInput) -> Self {
        Self::DEFAULT
            .with_hours_per_day(&input.hours_per_day)
            .with_tariff(&input.tariff)
            .with_days_per_year(&input.days_per_year)
            .with_discount_rate(&input.discount_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_on_garbage() {
        let profile = UsageProfile::from(UsageInput {
            hours_per_day: Field::from("abc"),
            tariff: Field::from(""),
            days_per_year: Field::from("x"),
            discount_rate: Field::from("?"),
        });
        assert_eq!(profile, UsageProfile::DEFAULT);
    }

    #[test]
    fn test_parsed() {
        let profile: UsageProfile = toml::from_str(
            "hours_per_day = \"8\"\ntariff = 0.63\ndays_per_year = 255\ndiscount_rate = \"0.05\"",
        )
        .unwrap();
        assert_eq!(profile.hours_per_day, 8.0);
        assert_eq!(profile.tariff, KilowattHourRate::new(0.63));
        assert_eq!(profile.days_per_year, 255);
        assert_eq!(profile.discount_rate, DiscountRate::new(0.05));
    }

    #[test]
    fn test_clamped() {
        let profile = UsageProfile::DEFAULT
            .with_hours_per_day(&Field::from("-1"))
            .with_days_per_year(&Field::from("400"))
            .with_discount_rate(&Field::from("-0.2"))
            .with_tariff(&Field::from("-3"));
        assert_eq!(profile.hours_per_day, UsageProfile::DEFAULT_HOURS_PER_DAY);
        assert_eq!(profile.days_per_year, 366);
        assert_eq!(profile.discount_rate, DiscountRate::ZERO);
        assert_eq!(profile.tariff, KilowattHourRate::ZERO);
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let profile: UsageProfile = toml::from_str("").unwrap();
        assert_eq!(profile, UsageProfile::DEFAULT);
    }
}
