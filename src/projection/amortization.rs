//! Monthly loan schedules for constant-amortization (SAC) and
//! fixed-installment (PRICE) loans

use super::investment::annual_to_monthly;
use crate::inputs::AmortizationType;
use crate::{Result, SimulatorError};
use serde::{Deserialize, Serialize};

/// One month of a loan schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Loan month (1-indexed)
    pub month: u32,
    /// Total paid: principal + interest + insurance + admin fee
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    /// Balance-linked (MIP) plus property-linked (DFI) insurance
    pub insurance: f64,
    pub admin_fee: f64,
    /// Balance after this month's principal
    pub outstanding_balance: f64,
}

/// Loan terms shared by both conventions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    pub loan_amount: f64,
    /// Annual cost of credit, converted to monthly by compounding
    pub annual_rate: f64,
    pub term_months: u32,
    /// Reference value for the property-linked insurance
    pub property_value: f64,
    /// Monthly insurance rate on the outstanding balance
    pub balance_insurance_rate: f64,
    /// Monthly insurance rate on the property value
    pub property_insurance_rate: f64,
    /// Flat monthly administration fee
    pub admin_fee: f64,
}

impl LoanTerms {
    fn insurance_on(&self, balance: f64) -> f64 {
        balance * self.balance_insurance_rate + self.property_value * self.property_insurance_rate
    }
}

/// Generate the full schedule for the chosen convention
pub fn generate_schedule(kind: AmortizationType, terms: &LoanTerms) -> Result<Vec<AmortizationRow>> {
    match kind {
        AmortizationType::Constant => constant_schedule(terms),
        AmortizationType::FixedInstallment => fixed_installment_schedule(terms),
    }
}

/// SAC: fixed principal, declining interest and total payment
pub fn constant_schedule(terms: &LoanTerms) -> Result<Vec<AmortizationRow>> {
    if terms.term_months == 0 {
        return Err(SimulatorError::InvalidTerm { months: 0 });
    }

    let monthly_rate = annual_to_monthly(terms.annual_rate);
    let principal = terms.loan_amount / terms.term_months as f64;
    let mut balance = terms.loan_amount;
    let mut schedule = Vec::with_capacity(terms.term_months as usize);

    for month in 1..=terms.term_months {
        let interest = balance * monthly_rate;
        let insurance = terms.insurance_on(balance);
        let payment = principal + interest + insurance + terms.admin_fee;

        // Clamp absorbs floating-point drift on the last row
        balance = (balance - principal).max(0.0);

        schedule.push(AmortizationRow {
            month,
            payment,
            principal,
            interest,
            insurance,
            admin_fee: terms.admin_fee,
            outstanding_balance: balance,
        });
    }

    Ok(schedule)
}

/// PRICE: fixed annuity installment, principal share grows over time.
/// Insurance and fee float on top, so the total payment is only roughly level.
pub fn fixed_installment_schedule(terms: &LoanTerms) -> Result<Vec<AmortizationRow>> {
    if terms.term_months == 0 {
        return Err(SimulatorError::InvalidTerm { months: 0 });
    }

    let monthly_rate = annual_to_monthly(terms.annual_rate);
    let n = terms.term_months as f64;
    let installment = if monthly_rate.abs() < 1e-15 {
        terms.loan_amount / n
    } else {
        let growth = (1.0 + monthly_rate).powf(n);
        terms.loan_amount * monthly_rate * growth / (growth - 1.0)
    };

    let mut balance = terms.loan_amount;
    let mut schedule = Vec::with_capacity(terms.term_months as usize);

    for month in 1..=terms.term_months {
        let interest = balance * monthly_rate;
        let principal = installment - interest;
        let insurance = terms.insurance_on(balance);
        let payment = installment + insurance + terms.admin_fee;

        balance = (balance - principal).max(0.0);

        schedule.push(AmortizationRow {
            month,
            payment,
            principal,
            interest,
            insurance,
            admin_fee: terms.admin_fee,
            outstanding_balance: balance,
        });
    }

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn terms(loan: f64, rate: f64, months: u32) -> LoanTerms {
        LoanTerms {
            loan_amount: loan,
            annual_rate: rate,
            term_months: months,
            property_value: 500_000.0,
            balance_insurance_rate: 0.0003,
            property_insurance_rate: 0.00015,
            admin_fee: 25.0,
        }
    }

    #[test]
    fn test_constant_schedule_reference_case() {
        let schedule = constant_schedule(&terms(400_000.0, 0.0999, 360)).unwrap();

        assert_eq!(schedule.len(), 360);
        assert_abs_diff_eq!(schedule[0].principal, 1_111.11, epsilon = 0.01);
        assert_abs_diff_eq!(schedule.last().unwrap().outstanding_balance, 0.0, epsilon = 1e-6);

        let total_principal: f64 = schedule.iter().map(|r| r.principal).sum();
        assert_relative_eq!(total_principal, 400_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_constant_schedule_payment_declines() {
        let schedule = constant_schedule(&terms(400_000.0, 0.0999, 360)).unwrap();
        assert!(schedule.windows(2).all(|w| w[1].payment < w[0].payment));
        assert!(schedule
            .windows(2)
            .all(|w| w[1].outstanding_balance <= w[0].outstanding_balance));
    }

    #[test]
    fn test_compound_monthly_rate_used() {
        let schedule = constant_schedule(&terms(400_000.0, 0.0999, 360)).unwrap();
        let expected = 400_000.0 * (1.0999_f64.powf(1.0 / 12.0) - 1.0);
        assert_relative_eq!(schedule[0].interest, expected, epsilon = 1e-9);
        // Naive division would overstate the first month's interest
        assert!(schedule[0].interest < 400_000.0 * 0.0999 / 12.0);
    }

    #[test]
    fn test_fixed_installment_base_is_level() {
        let schedule = fixed_installment_schedule(&terms(300_000.0, 0.11, 240)).unwrap();
        assert_eq!(schedule.len(), 240);

        let base = schedule[0].payment - schedule[0].insurance - schedule[0].admin_fee;
        for row in &schedule {
            assert_abs_diff_eq!(row.payment - row.insurance - row.admin_fee, base, epsilon = 1e-8);
        }
        assert_abs_diff_eq!(schedule.last().unwrap().outstanding_balance, 0.0, epsilon = 1e-4);
        assert!(schedule.windows(2).all(|w| w[1].principal > w[0].principal));
    }

    #[test]
    fn test_fixed_installment_zero_rate() {
        let schedule = fixed_installment_schedule(&terms(120_000.0, 0.0, 120)).unwrap();
        assert_relative_eq!(schedule[0].principal, 1_000.0);
        assert_abs_diff_eq!(schedule.last().unwrap().outstanding_balance, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_term_is_rejected() {
        for kind in [AmortizationType::Constant, AmortizationType::FixedInstallment] {
            let err = generate_schedule(kind, &terms(100_000.0, 0.1, 0)).unwrap_err();
            assert!(matches!(err, SimulatorError::InvalidTerm { months: 0 }));
        }
    }

    #[test]
    fn test_insurance_tracks_balance_and_property() {
        let schedule = constant_schedule(&terms(100_000.0, 0.1, 10)).unwrap();
        assert_relative_eq!(schedule[0].insurance, 100_000.0 * 0.0003 + 500_000.0 * 0.00015);
        assert_relative_eq!(schedule[1].insurance, 90_000.0 * 0.0003 + 500_000.0 * 0.00015, epsilon = 1e-9);
    }
}
