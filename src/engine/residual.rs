use crate::quantity::{cost::Cost, discount::DiscountRate};

/// Straight-line depreciation of the capital outlay per elapsed year.
pub const DEPRECIATION_PER_YEAR: f64 = 0.10;

/// Remaining worth of the full capital outlay after `years`, floored at zero, not discounted.
pub fn nominal_residual_value(capital_outlay: Cost, years: u32) -> Cost {
    (capital_outlay * (1.0 - DEPRECIATION_PER_YEAR * f64::from(years))).max(Cost::ZERO)
}

/// Residual value at disposal, discounted back over the same `years`.
pub fn residual_value(capital_outlay: Cost, years: u32, discount_rate: DiscountRate) -> Cost {
    discount_rate.present_value(nominal_residual_value(capital_outlay, years), years)
}
