//! Simulation input record and its closed selector types

use serde::{Deserialize, Serialize};

/// Loan amortization convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmortizationType {
    /// Constant principal per month (SAC), declining payment
    #[serde(alias = "SAC")]
    Constant,
    /// Fixed base installment (PRICE / French), increasing principal share
    #[serde(alias = "PRICE")]
    FixedInstallment,
}

impl AmortizationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmortizationType::Constant => "SAC",
            AmortizationType::FixedInstallment => "PRICE",
        }
    }
}

/// Price index a rental contract is adjusted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RentIndex {
    /// General market price index (IGP-M)
    #[serde(alias = "IGPM")]
    GeneralPrice,
    /// Consumer price index (IPCA)
    #[serde(alias = "IPCA")]
    ConsumerPrice,
}

impl RentIndex {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentIndex::GeneralPrice => "IGP-M",
            RentIndex::ConsumerPrice => "IPCA",
        }
    }
}

/// Employment class of the buyer, used for rate estimation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    /// Payroll employee (CLT)
    #[serde(alias = "CLT")]
    Salaried,
    /// Self-employed or company-paid (PJ)
    #[serde(alias = "PJ")]
    Independent,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::Salaried => "salaried",
            EmploymentType::Independent => "independent",
        }
    }
}

/// Longest horizon or loan term accepted, in years
pub const MAX_YEARS: u32 = 100;

/// Full configuration for one simulation run
///
/// All rates are decimals (0.045 = 4.5%). Monthly amounts are in currency
/// units at today's prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationInputs {
    // Property
    /// List price of the reference property
    pub property_value: f64,
    /// Real annual appreciation, above inflation
    pub property_appreciation_rate: f64,

    // Rent
    /// Market rent for the reference property
    pub monthly_rent: f64,
    pub rent_adjustment_index: RentIndex,
    /// Contractual annual rent adjustment; falls back to the index rate when absent
    pub rent_adjustment_rate: Option<f64>,

    // Financing
    /// Down payment as a fraction of the list price
    pub down_payment_percent: f64,
    /// Annual total cost of credit (CET)
    pub financing_rate: f64,
    pub financing_term_years: u32,
    pub amortization_type: AmortizationType,
    /// Subsidized-fund balance (FGTS) applied toward the down payment
    pub fund_offset: Option<f64>,

    // Cash purchase
    /// Discount obtained for paying in full
    pub cash_discount_percent: f64,

    // Ownership costs
    /// Annual property tax as a fraction of the property value
    pub property_tax_rate: f64,
    pub condo_fee_monthly: f64,
    pub transfer_tax_rate: f64,
    pub deed_fee_rate: f64,
    pub registry_fee_rate: f64,
    pub renter_insurance_monthly: f64,

    // Mortgage insurance and fees
    /// Monthly life insurance rate on the outstanding balance (MIP)
    pub balance_insurance_rate: f64,
    /// Monthly damage insurance rate on the property value (DFI)
    pub property_insurance_rate: f64,
    pub admin_fee_monthly: f64,
    /// One-time bank appraisal fee
    pub appraisal_fee: f64,

    // Macro
    /// Policy base rate (SELIC), informational
    pub base_rate: f64,
    /// Annual consumer inflation (IPCA)
    pub inflation_rate: f64,
    /// Real spread of the inflation-linked bond
    pub bond_spread: f64,
    /// Annual general price index rate (IGP-M), drives condo fees
    pub rent_index_rate: f64,

    // Buyer profile
    pub monthly_income: f64,
    pub employment_type: EmploymentType,
    pub is_first_property: bool,

    // Current situation
    pub current_capital: f64,
    /// Rent paid today, 0 when living rent-free
    pub current_rent: f64,
    pub monthly_savings: f64,

    pub horizon_years: u32,
    pub show_real_values: bool,

    /// Key into a city-default table, used only to pre-fill fields
    pub city: Option<String>,
}

impl Default for SimulationInputs {
    fn default() -> Self {
        Self {
            property_value: 500_000.0,
            property_appreciation_rate: 0.02,

            monthly_rent: 2_615.0,
            rent_adjustment_index: RentIndex::GeneralPrice,
            rent_adjustment_rate: Some(0.055),

            down_payment_percent: 0.2,
            financing_rate: 0.0999,
            financing_term_years: 30,
            amortization_type: AmortizationType::Constant,
            fund_offset: None,

            cash_discount_percent: 0.1,

            property_tax_rate: 0.006,
            condo_fee_monthly: 800.0,
            transfer_tax_rate: 0.03,
            deed_fee_rate: 0.008,
            registry_fee_rate: 0.008,
            renter_insurance_monthly: 50.0,

            balance_insurance_rate: 0.0003,
            property_insurance_rate: 0.00015,
            admin_fee_monthly: 25.0,
            appraisal_fee: 3_000.0,

            base_rate: 0.15,
            inflation_rate: 0.045,
            bond_spread: 0.07,
            rent_index_rate: 0.035,

            monthly_income: 10_000.0,
            employment_type: EmploymentType::Salaried,
            is_first_property: true,

            current_capital: 0.0,
            current_rent: 0.0,
            monthly_savings: 0.0,

            horizon_years: 20,
            show_real_values: false,

            city: Some("SAO_PAULO".to_string()),
        }
    }
}

impl SimulationInputs {
    /// Number of simulated months
    pub fn total_months(&self) -> u32 {
        self.horizon_years.saturating_mul(12)
    }

    /// Loan term in months
    pub fn financing_months(&self) -> u32 {
        self.financing_term_years.saturating_mul(12)
    }

    /// Annual rent growth: contractual rate, or the selected index's rate
    pub fn rent_growth_rate(&self) -> f64 {
        self.rent_adjustment_rate.unwrap_or(match self.rent_adjustment_index {
            RentIndex::GeneralPrice => self.rent_index_rate,
            RentIndex::ConsumerPrice => self.inflation_rate,
        })
    }

    /// Fund balance applied at purchase (0 when unused)
    pub fn fund_offset_amount(&self) -> f64 {
        self.fund_offset.unwrap_or(0.0).max(0.0)
    }

    /// Reject values the engine cannot give a meaning to
    pub fn validate(&self) -> crate::Result<()> {
        let checks = [
            ("property_value", self.property_value),
            ("monthly_rent", self.monthly_rent),
            ("down_payment_percent", self.down_payment_percent),
            ("cash_discount_percent", self.cash_discount_percent),
            ("condo_fee_monthly", self.condo_fee_monthly),
            ("current_capital", self.current_capital),
            ("current_rent", self.current_rent),
            ("monthly_savings", self.monthly_savings),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(crate::SimulatorError::InvalidInput {
                    field: field.to_string(),
                    reason: format!("must be a non-negative number, got {}", value),
                });
            }
        }
        for (field, years) in [
            ("horizon_years", self.horizon_years),
            ("financing_term_years", self.financing_term_years),
        ] {
            if years > MAX_YEARS {
                return Err(crate::SimulatorError::InvalidInput {
                    field: field.to_string(),
                    reason: format!("must be at most {} years, got {}", MAX_YEARS, years),
                });
            }
        }
        if self.down_payment_percent > 1.0 {
            return Err(crate::SimulatorError::InvalidInput {
                field: "down_payment_percent".to_string(),
                reason: "cannot exceed 100% of the price".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rent_growth_falls_back_to_index() {
        let mut inputs = SimulationInputs {
            rent_adjustment_rate: None,
            ..Default::default()
        };
        assert_eq!(inputs.rent_growth_rate(), inputs.rent_index_rate);

        inputs.rent_adjustment_index = RentIndex::ConsumerPrice;
        assert_eq!(inputs.rent_growth_rate(), inputs.inflation_rate);

        inputs.rent_adjustment_rate = Some(0.07);
        assert_eq!(inputs.rent_growth_rate(), 0.07);
    }

    #[test]
    fn test_month_counts() {
        let inputs = SimulationInputs::default();
        assert_eq!(inputs.total_months(), 240);
        assert_eq!(inputs.financing_months(), 360);
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let inputs = SimulationInputs {
            property_value: -1.0,
            ..Default::default()
        };
        assert!(inputs.validate().is_err());
        assert!(SimulationInputs::default().validate().is_ok());
    }

    #[test]
    fn test_validate_caps_horizon_and_term() {
        let long_horizon = SimulationInputs {
            horizon_years: 400_000_000,
            ..Default::default()
        };
        assert!(matches!(
            long_horizon.validate(),
            Err(crate::SimulatorError::InvalidInput { ref field, .. }) if field == "horizon_years"
        ));

        let long_term = SimulationInputs {
            financing_term_years: 400_000_000,
            ..Default::default()
        };
        assert!(matches!(
            long_term.validate(),
            Err(crate::SimulatorError::InvalidInput { ref field, .. }) if field == "financing_term_years"
        ));

        let at_ceiling = SimulationInputs {
            horizon_years: MAX_YEARS,
            financing_term_years: MAX_YEARS,
            ..Default::default()
        };
        assert!(at_ceiling.validate().is_ok());
        assert_eq!(at_ceiling.total_months(), 1_200);
    }

    #[test]
    fn test_legacy_selector_names_deserialize() {
        let json = r#"{"amortization_type":"PRICE","rent_adjustment_index":"IPCA","employment_type":"PJ"}"#;
        let inputs: SimulationInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.amortization_type, AmortizationType::FixedInstallment);
        assert_eq!(inputs.rent_adjustment_index, RentIndex::ConsumerPrice);
        assert_eq!(inputs.employment_type, EmploymentType::Independent);
        // Missing fields take defaults
        assert_eq!(inputs.property_value, 500_000.0);
    }
}
