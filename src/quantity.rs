pub mod cost;
pub mod discount;
pub mod energy;
pub mod rate;

use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

/// Dimension-typed scalar: energy, time (years), and cost exponents are carried in the type.
#[derive(
    Clone,
    Copy,
    Deserialize,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
#[serde(transparent)]
pub struct Quantity<T, const ENERGY: isize, const TIME: isize, const COST: isize>(pub T);

impl<T, const ENERGY: isize, const TIME: isize, const COST: isize> Quantity<T, ENERGY, TIME, COST> {
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// Floor the value, for example at zero.
    #[must_use]
    pub fn max(self, floor: Self) -> Self
    where
        Self: PartialOrd,
    {
        if self < floor { floor } else { self }
    }
}

impl<const ENERGY: isize, const TIME: isize, const COST: isize> Quantity<f64, ENERGY, TIME, COST> {
    pub const ZERO: Self = Self(0.0);

    pub const fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl<const ENERGY: isize, const TIME: isize, const COST: isize> Default
    for Quantity<f64, ENERGY, TIME, COST>
{
    fn default() -> Self {
        Self::ZERO
    }
}

/// Scaling by a dimensionless factor keeps the dimension.
impl<T, const ENERGY: isize, const TIME: isize, const COST: isize> Mul<T>
    for Quantity<T, ENERGY, TIME, COST>
where
    T: Mul<T>,
{
    type Output = Quantity<T::Output, ENERGY, TIME, COST>;

    fn mul(self, rhs: T) -> Self::Output {
        Quantity(self.0 * rhs)
    }
}

impl<T, const ENERGY: isize, const TIME: isize, const COST: isize> Div<T>
    for Quantity<T, ENERGY, TIME, COST>
where
    T: Div<T>,
{
    type Output = Quantity<T::Output, ENERGY, TIME, COST>;

    fn div(self, rhs: T) -> Self::Output {
        Quantity(self.0 / rhs)
    }
}
