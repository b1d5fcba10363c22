use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Amount of money in the session currency.
pub type Cost = Quantity<f64, 0, 0, 1>;

/// Recurring amount of money per year.
pub type CostPerYear = Quantity<f64, 0, -1, 1>;

impl Cost {
    pub const ONE_CENT: Self = Self(0.01);

    pub const fn abs(mut self) -> Self {
        self.0 = self.0.abs();
        self
    }

    /// Values below one cent are rendered as zero.
    pub fn is_negligible(self) -> bool {
        self.abs() < Self::ONE_CENT
    }
}

impl CostPerYear {
    /// Flat (non-escalating) total over the given number of years.
    pub fn over(self, years: u32) -> Cost {
        Quantity(self.0 * f64::from(years))
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl Display for CostPerYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} /yr", self.0)
    }
}

impl Debug for CostPerYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}/yr", self.0)
    }
}
