use std::fmt::{Debug, Display, Formatter};

pub struct FormattedPercentage(pub f64);

impl Debug for FormattedPercentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for FormattedPercentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let value = if self.0.is_finite() { self.0 } else { 0.0 };
        write!(f, "{:.2}%", value * 100.0)
    }
}

/// Daily usage like `5h42min/day`.
pub struct FormattedHoursPerDay(pub f64);

impl Display for FormattedHoursPerDay {
    #[expect(clippy::cast_possible_truncation)]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let hours = self.0.floor();
        let mut minutes = ((self.0 - hours) * 60.0).round() as i64;
        let mut hours = hours as i64;
        if minutes == 60 {
            hours += 1;
            minutes = 0;
        }
        write!(f, "{hours}h{minutes:02}min/day")
    }
}
