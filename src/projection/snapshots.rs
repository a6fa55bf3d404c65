//! Per-month output rows and per-scenario results

use serde::{Deserialize, Serialize};

/// Housing strategy being simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    Rent,
    BuyCash,
    Finance,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Rent, Strategy::BuyCash, Strategy::Finance];

    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Rent => "Rent",
            Strategy::BuyCash => "Buy outright",
            Strategy::Finance => "Finance",
        }
    }
}

/// Which part of a scenario's life a month belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Renting and saving toward the entry cost
    Saving,
    /// Renting the reference property for the whole horizon
    Renting,
    /// Owning the property
    Owning,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Saving => "saving",
            Phase::Renting => "renting",
            Phase::Owning => "owning",
        }
    }
}

/// One month of a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    // Timing
    /// Simulation month (1-indexed)
    pub month: u32,
    /// Simulation year (1-indexed)
    pub year: u32,
    pub phase: Phase,

    // Outflows this month
    pub rent_paid: f64,
    /// Total loan payment including insurance and admin fee
    pub mortgage_payment: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub insurance_paid: f64,
    pub admin_fee_paid: f64,
    pub condo_payment: f64,
    pub property_tax_payment: f64,
    /// Entry cost, paid in the first owning month only
    pub upfront_paid: f64,

    // Balances
    /// Net (after withholding and custody) investment value
    pub investment_balance: f64,
    /// Budget minus outflow, invested this month (negative = disinvested)
    pub investment_contribution: f64,
    pub property_value: f64,
    pub outstanding_debt: f64,
    /// Tax that would be owed if the property were sold this month
    pub capital_gains_tax: f64,

    // Totals
    pub total_spent: f64,
    pub total_spent_real: f64,
    pub total_wealth: f64,
    pub total_wealth_real: f64,
}

impl MonthlySnapshot {
    /// Empty row for a month; callers fill in what applies
    pub fn new(month: u32, phase: Phase) -> Self {
        Self {
            month,
            year: (month + 11) / 12,
            phase,
            rent_paid: 0.0,
            mortgage_payment: 0.0,
            principal_paid: 0.0,
            interest_paid: 0.0,
            insurance_paid: 0.0,
            admin_fee_paid: 0.0,
            condo_payment: 0.0,
            property_tax_payment: 0.0,
            upfront_paid: 0.0,
            investment_balance: 0.0,
            investment_contribution: 0.0,
            property_value: 0.0,
            outstanding_debt: 0.0,
            capital_gains_tax: 0.0,
            total_spent: 0.0,
            total_spent_real: 0.0,
            total_wealth: 0.0,
            total_wealth_real: 0.0,
        }
    }

    /// Property value net of debt and exit tax (0 while not owning)
    pub fn ownership_equity(&self) -> f64 {
        self.property_value - self.outstanding_debt - self.capital_gains_tax
    }

    /// Recurring housing cost this month, excluding the upfront payment
    pub fn housing_cost(&self) -> f64 {
        // Loan insurance is already inside the mortgage payment
        let standalone_insurance = if self.mortgage_payment > 0.0 { 0.0 } else { self.insurance_paid };
        self.rent_paid
            + self.mortgage_payment
            + self.condo_payment
            + self.property_tax_payment
            + standalone_insurance
    }
}

/// Where a scenario's money went, reconstructed from its snapshots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub upfront: f64,
    pub rent: f64,
    pub interest: f64,
    pub principal: f64,
    pub condo: f64,
    pub property_tax: f64,
    pub insurance: f64,
    pub admin_fees: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.upfront
            + self.rent
            + self.interest
            + self.principal
            + self.condo
            + self.property_tax
            + self.insurance
            + self.admin_fees
    }
}

/// Complete result for one strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub strategy: Strategy,

    /// One row per simulated month
    pub monthly_snapshots: Vec<MonthlySnapshot>,

    /// Every 12th month
    pub yearly_snapshots: Vec<MonthlySnapshot>,

    pub final_wealth: f64,
    pub final_wealth_real: f64,
    pub total_spent: f64,
    pub total_spent_real: f64,
    pub average_monthly_cost: f64,
    pub average_monthly_cost_real: f64,

    /// Interest on loan rows consumed inside the horizon
    pub total_interest_paid: f64,
    pub upfront_cost: f64,

    /// Months spent saving before the strategy could start
    pub savings_phase_months: u32,
}

impl ScenarioResult {
    /// Build the result from its monthly rows
    ///
    /// `fallback_wealth` is reported when there are no rows (zero horizon).
    pub fn from_snapshots(
        strategy: Strategy,
        monthly_snapshots: Vec<MonthlySnapshot>,
        total_interest_paid: f64,
        upfront_cost: f64,
        savings_phase_months: u32,
        fallback_wealth: f64,
    ) -> Self {
        let yearly_snapshots: Vec<MonthlySnapshot> = monthly_snapshots
            .iter()
            .filter(|s| s.month % 12 == 0)
            .cloned()
            .collect();

        let (final_wealth, final_wealth_real, total_spent, total_spent_real) =
            match monthly_snapshots.last() {
                Some(last) => (
                    last.total_wealth,
                    last.total_wealth_real,
                    last.total_spent,
                    last.total_spent_real,
                ),
                None => (fallback_wealth, fallback_wealth, 0.0, 0.0),
            };

        let months = monthly_snapshots.len() as f64;
        let (average_monthly_cost, average_monthly_cost_real) = if months > 0.0 {
            (total_spent / months, total_spent_real / months)
        } else {
            (0.0, 0.0)
        };

        Self {
            strategy,
            monthly_snapshots,
            yearly_snapshots,
            final_wealth,
            final_wealth_real,
            total_spent,
            total_spent_real,
            average_monthly_cost,
            average_monthly_cost_real,
            total_interest_paid,
            upfront_cost,
            savings_phase_months,
        }
    }

    pub fn label(&self) -> &'static str {
        self.strategy.label()
    }

    /// Final wealth, nominal or deflated to today's money
    pub fn wealth_metric(&self, real: bool) -> f64 {
        if real {
            self.final_wealth_real
        } else {
            self.final_wealth
        }
    }

    /// Spend by category over the whole horizon
    pub fn cost_breakdown(&self) -> CostBreakdown {
        let mut costs = CostBreakdown {
            upfront: self.upfront_cost,
            interest: self.total_interest_paid,
            ..Default::default()
        };
        for s in &self.monthly_snapshots {
            costs.rent += s.rent_paid;
            costs.principal += s.principal_paid;
            costs.condo += s.condo_payment;
            costs.property_tax += s.property_tax_payment;
            costs.insurance += s.insurance_paid;
            costs.admin_fees += s.admin_fee_paid;
        }
        costs
    }

    /// Get summary statistics
    pub fn summary(&self) -> ScenarioSummary {
        let total_contributed: f64 = self
            .monthly_snapshots
            .iter()
            .map(|s| s.investment_contribution)
            .sum();
        let months_disinvesting = self
            .monthly_snapshots
            .iter()
            .filter(|s| s.investment_contribution < 0.0)
            .count() as u32;
        let last = self.monthly_snapshots.last();

        ScenarioSummary {
            strategy: self.strategy,
            total_months: self.monthly_snapshots.len() as u32,
            savings_phase_months: self.savings_phase_months,
            total_contributed,
            months_disinvesting,
            final_property_value: last.map(|s| s.property_value).unwrap_or(0.0),
            final_investment_balance: last.map(|s| s.investment_balance).unwrap_or(0.0),
            final_wealth: self.final_wealth,
            final_wealth_real: self.final_wealth_real,
        }
    }
}

/// Summary statistics for a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub strategy: Strategy,
    pub total_months: u32,
    pub savings_phase_months: u32,
    /// Net amount invested from the monthly budget
    pub total_contributed: f64,
    pub months_disinvesting: u32,
    pub final_property_value: f64,
    pub final_investment_balance: f64,
    pub final_wealth: f64,
    pub final_wealth_real: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(month: u32, wealth: f64) -> MonthlySnapshot {
        let mut s = MonthlySnapshot::new(month, Phase::Renting);
        s.rent_paid = 1_000.0;
        s.condo_payment = 100.0;
        s.total_spent = 1_100.0 * month as f64;
        s.total_spent_real = 1_000.0 * month as f64;
        s.total_wealth = wealth;
        s.total_wealth_real = wealth * 0.9;
        s
    }

    #[test]
    fn test_year_numbering() {
        assert_eq!(MonthlySnapshot::new(1, Phase::Saving).year, 1);
        assert_eq!(MonthlySnapshot::new(12, Phase::Saving).year, 1);
        assert_eq!(MonthlySnapshot::new(13, Phase::Saving).year, 2);
    }

    #[test]
    fn test_result_from_snapshots() {
        let rows: Vec<_> = (1..=24).map(|m| row(m, m as f64 * 10.0)).collect();
        let result = ScenarioResult::from_snapshots(Strategy::Rent, rows, 0.0, 0.0, 0, 0.0);

        assert_eq!(result.yearly_snapshots.len(), 2);
        assert_eq!(result.yearly_snapshots[1].month, 24);
        assert_eq!(result.final_wealth, 240.0);
        assert_eq!(result.total_spent, 26_400.0);
        assert_eq!(result.average_monthly_cost, 1_100.0);
        assert_eq!(result.wealth_metric(true), 216.0);

        let costs = result.cost_breakdown();
        assert_eq!(costs.rent, 24_000.0);
        assert_eq!(costs.condo, 2_400.0);
        assert_eq!(costs.total(), 26_400.0);
    }

    #[test]
    fn test_summary_tracks_contributions() {
        let mut rows: Vec<_> = (1..=4).map(|m| row(m, 1_000.0)).collect();
        rows[0].investment_contribution = 500.0;
        rows[1].investment_contribution = -200.0;
        rows[2].investment_contribution = 300.0;
        rows[3].investment_contribution = -50.0;
        rows[3].property_value = 600_000.0;
        rows[3].investment_balance = 12_345.0;

        let summary = ScenarioResult::from_snapshots(Strategy::Finance, rows, 0.0, 0.0, 2, 0.0).summary();
        assert_eq!(summary.strategy, Strategy::Finance);
        assert_eq!(summary.total_months, 4);
        assert_eq!(summary.savings_phase_months, 2);
        assert_eq!(summary.total_contributed, 550.0);
        assert_eq!(summary.months_disinvesting, 2);
        assert_eq!(summary.final_property_value, 600_000.0);
        assert_eq!(summary.final_investment_balance, 12_345.0);
        assert_eq!(summary.final_wealth, 1_000.0);
    }

    #[test]
    fn test_empty_result_uses_fallback() {
        let result = ScenarioResult::from_snapshots(Strategy::BuyCash, Vec::new(), 0.0, 0.0, 0, 42.0);
        assert_eq!(result.final_wealth, 42.0);
        assert_eq!(result.average_monthly_cost, 0.0);
        assert!(result.yearly_snapshots.is_empty());
    }
}
