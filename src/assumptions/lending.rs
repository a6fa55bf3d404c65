//! Mortgage rate policy: subsidized-program brackets and market adjustments

/// A subsidized housing-program bracket (MCMV)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubsidizedBracket {
    /// Maximum gross monthly household income
    pub max_income: f64,
    /// Maximum property price
    pub max_property: f64,
    /// Fixed annual rate offered in this bracket
    pub rate: f64,
}

/// Rate policy used by the rate estimator
#[derive(Debug, Clone, PartialEq)]
pub struct RatePolicy {
    /// Brackets in ascending income-ceiling order
    pub subsidized_brackets: Vec<SubsidizedBracket>,

    /// Market (SBPE) base rate before adjustments
    pub market_base_rate: f64,

    pub salaried_discount: f64,
    pub first_property_discount: f64,

    /// Premium charged to independent-income buyers
    pub independent_premium: f64,
}

impl RatePolicy {
    /// Variant that charges independent-income buyers a premium
    pub fn with_independent_premium(premium: f64) -> Self {
        Self {
            independent_premium: premium,
            ..Self::default()
        }
    }
}

impl Default for RatePolicy {
    fn default() -> Self {
        Self {
            subsidized_brackets: vec![
                SubsidizedBracket { max_income: 2_850.0, max_property: 270_000.0, rate: 0.05 },
                SubsidizedBracket { max_income: 4_700.0, max_property: 270_000.0, rate: 0.0816 },
                SubsidizedBracket { max_income: 8_600.0, max_property: 350_000.0, rate: 0.1025 },
                SubsidizedBracket { max_income: 12_000.0, max_property: 500_000.0, rate: 0.105 },
            ],
            market_base_rate: 0.11,
            salaried_discount: 0.005,
            first_property_discount: 0.005,
            independent_premium: 0.0,
        }
    }
}
