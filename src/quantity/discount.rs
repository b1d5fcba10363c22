use std::fmt::{Debug, Display, Formatter};

use crate::{
    fmt::FormattedPercentage,
    quantity::{
        Quantity,
        cost::{Cost, CostPerYear},
    },
};

/// Real discount rate per year, as a fraction (`0.01` is one percent).
pub type DiscountRate = Quantity<f64, 0, -1, 0>;

impl DiscountRate {
    /// Compounding factor `(1 + rate)^years`.
    #[expect(clippy::cast_possible_wrap)]
    pub fn factor(self, years: u32) -> f64 {
        (1.0 + self.0).powi(years as i32)
    }

    /// Bring a cash amount occurring `years` from now to the present.
    pub fn present_value(self, cost: Cost, years: u32) -> Cost {
        cost / self.factor(years)
    }

    /// Present value of a flat yearly amount paid at the end of years `1..=years`.
    pub fn annuity(self, cost: CostPerYear, years: u32) -> Cost {
        (1..=years).map(|year| self.present_value(cost.over(1), year)).sum()
    }
}

impl Display for DiscountRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&FormattedPercentage(self.0), f)
    }
}

impl Debug for DiscountRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/yr", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_present_value() {
        let rate = DiscountRate::from(0.1);
        assert_abs_diff_eq!(rate.present_value(Cost::from(121.0), 2).0, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_present_value_now() {
        let rate = DiscountRate::from(0.05);
        assert_abs_diff_eq!(rate.present_value(Cost::from(42.0), 0).0, 42.0);
    }

    #[test]
    fn test_annuity() {
        let rate = DiscountRate::from(0.1);
        let annuity = rate.annuity(CostPerYear::from(100.0), 2);
        assert_abs_diff_eq!(annuity.0, 100.0 / 1.1 + 100.0 / 1.21, epsilon = 1e-9);
    }

    #[test]
    fn test_annuity_without_discounting() {
        let annuity = DiscountRate::ZERO.annuity(CostPerYear::from(100.0), 5);
        assert_abs_diff_eq!(annuity.0, 500.0);
    }
}
