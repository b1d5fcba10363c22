use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use crate::quantity::{
    Quantity,
    cost::{Cost, CostPerYear},
    rate::KilowattHourRate,
};

pub type KilowattHours = Quantity<f64, 1, 0, 0>;

/// Rated yearly consumption, as printed on efficiency labels.
pub type KilowattHoursPerYear = Quantity<f64, 1, -1, 0>;

impl KilowattHoursPerYear {
    pub fn over(self, years: u32) -> KilowattHours {
        Quantity(self.0 * f64::from(years))
    }
}

impl Display for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} kWh", self.0)
    }
}

impl Debug for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}kWh", self.0)
    }
}

impl Display for KilowattHoursPerYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} kWh/yr", self.0)
    }
}

impl Debug for KilowattHoursPerYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}kWh/yr", self.0)
    }
}

impl Mul<KilowattHourRate> for KilowattHours {
    type Output = Cost;

    fn mul(self, rhs: KilowattHourRate) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}

impl Mul<KilowattHourRate> for KilowattHoursPerYear {
    type Output = CostPerYear;

    fn mul(self, rhs: KilowattHourRate) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}
