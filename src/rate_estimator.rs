//! Mortgage rate suggestion from a buyer profile

use crate::assumptions::RatePolicy;
use crate::inputs::{EmploymentType, SimulationInputs};
use serde::{Deserialize, Serialize};

/// Buyer attributes that drive the rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuyerProfile {
    pub monthly_income: f64,
    pub property_value: f64,
    pub employment_type: EmploymentType,
    pub is_first_property: bool,
}

impl BuyerProfile {
    pub fn from_inputs(inputs: &SimulationInputs) -> Self {
        Self {
            monthly_income: inputs.monthly_income,
            property_value: inputs.property_value,
            employment_type: inputs.employment_type,
            is_first_property: inputs.is_first_property,
        }
    }
}

/// Suggested annual rate and how it was derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEstimation {
    pub rate: f64,
    pub description: String,
}

/// Estimate an annual financing rate
///
/// The first subsidized bracket admitting both income and price wins.
/// Otherwise the market base rate is adjusted additively per attribute.
pub fn estimate_financing_rate(profile: &BuyerProfile, policy: &RatePolicy) -> RateEstimation {
    if let Some(bracket) = policy.subsidized_brackets.iter().find(|b| {
        profile.monthly_income <= b.max_income && profile.property_value <= b.max_property
    }) {
        return RateEstimation {
            rate: bracket.rate,
            description: format!("MCMV (income up to {:.0})", bracket.max_income),
        };
    }

    let mut rate = policy.market_base_rate;
    let mut parts = vec!["SBPE"];

    match profile.employment_type {
        EmploymentType::Salaried => {
            rate -= policy.salaried_discount;
            parts.push("salaried");
        }
        EmploymentType::Independent => {
            rate += policy.independent_premium;
            parts.push("independent");
        }
    }

    if profile.is_first_property {
        rate -= policy.first_property_discount;
        parts.push("first property");
    }

    RateEstimation {
        rate,
        description: parts.join(" + "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn profile(income: f64, price: f64, employment: EmploymentType, first: bool) -> BuyerProfile {
        BuyerProfile {
            monthly_income: income,
            property_value: price,
            employment_type: employment,
            is_first_property: first,
        }
    }

    #[test]
    fn test_lowest_subsidized_bracket() {
        let est = estimate_financing_rate(
            &profile(2_000.0, 200_000.0, EmploymentType::Salaried, true),
            &RatePolicy::default(),
        );
        assert_eq!(est.rate, 0.05);
        assert!(est.description.contains("MCMV"));
        assert!(est.description.contains("2850"));
    }

    #[test]
    fn test_price_ceiling_skips_bracket() {
        // Income fits the first bracket but price only fits the third
        let est = estimate_financing_rate(
            &profile(2_000.0, 300_000.0, EmploymentType::Salaried, true),
            &RatePolicy::default(),
        );
        assert_eq!(est.rate, 0.1025);
    }

    #[test]
    fn test_market_rate_salaried_first_property() {
        let est = estimate_financing_rate(
            &profile(20_000.0, 800_000.0, EmploymentType::Salaried, true),
            &RatePolicy::default(),
        );
        assert_abs_diff_eq!(est.rate, 0.10, epsilon = 1e-12);
        assert_eq!(est.description, "SBPE + salaried + first property");
    }

    #[test]
    fn test_market_rate_independent_not_first() {
        let est = estimate_financing_rate(
            &profile(20_000.0, 800_000.0, EmploymentType::Independent, false),
            &RatePolicy::default(),
        );
        assert_abs_diff_eq!(est.rate, 0.11, epsilon = 1e-12);
        assert_eq!(est.description, "SBPE + independent");
    }

    #[test]
    fn test_independent_premium_variant() {
        let est = estimate_financing_rate(
            &profile(20_000.0, 800_000.0, EmploymentType::Independent, true),
            &RatePolicy::with_independent_premium(0.005),
        );
        assert_abs_diff_eq!(est.rate, 0.11, epsilon = 1e-12);
    }
}
