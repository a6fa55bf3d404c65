//! Calendar helpers shared by the savings phase and scenario engines

use super::investment::annual_to_monthly;

/// Whole years completed before `month` starts (month 13 -> 1)
pub fn years_elapsed(month: u32) -> i32 {
    (month.saturating_sub(1) / 12) as i32
}

/// Amount adjusted once per year, at months 13, 25, 37, ...
pub fn stepped(base: f64, annual_rate: f64, month: u32) -> f64 {
    base * (1.0 + annual_rate).powi(years_elapsed(month))
}

/// Converts nominal amounts at a month into today's purchasing power
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deflator {
    monthly_inflation: f64,
}

impl Deflator {
    pub fn new(annual_inflation: f64) -> Self {
        Self {
            monthly_inflation: annual_to_monthly(annual_inflation),
        }
    }

    /// Cumulative price level at the end of `month` (1.0 at month 0)
    pub fn factor(&self, month: u32) -> f64 {
        (1.0 + self.monthly_inflation).powi(month as i32)
    }

    pub fn real(&self, nominal: f64, month: u32) -> f64 {
        nominal / self.factor(month)
    }
}
