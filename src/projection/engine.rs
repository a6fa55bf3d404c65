//! Month-by-month scenario engines for renting, buying outright and financing
//!
//! Each engine runs the savings phase toward its own entry cost, then
//! projects the remaining months with a shared monthly budget. Whatever the
//! budget does not spend on housing is invested; a shortfall disinvests.

use super::amortization::{generate_schedule, AmortizationRow, LoanTerms};
use super::investment::{annual_to_monthly, monthly_gross_rate, net_value};
use super::savings::{simulate_savings_phase, SavingsPhaseConfig, SavingsPhaseResult};
use super::snapshots::{MonthlySnapshot, Phase, ScenarioResult, Strategy};
use super::state::InvestmentState;
use super::taxes::capital_gains_tax;
use super::timeline::{stepped, Deflator};
use crate::assumptions::Assumptions;
use crate::inputs::SimulationInputs;
use crate::Result;
use log::{debug, warn};

/// Cash needed and debt taken on when a financed purchase starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancePlan {
    /// Down payment paid from savings, after the fund offset
    pub cash_down: f64,
    /// Cash down plus closing costs
    pub entry_cost: f64,
    pub loan_amount: f64,
}

impl FinancePlan {
    pub fn from_inputs(inputs: &SimulationInputs) -> Self {
        let price = inputs.property_value;
        let offset = inputs.fund_offset_amount();
        let cash_down = (inputs.down_payment_percent * price - offset).max(0.0);

        // The loan contract stands in for the deed, so no deed fee here
        let entry_cost = cash_down
            + price * inputs.transfer_tax_rate
            + price * inputs.registry_fee_rate
            + inputs.appraisal_fee;

        Self {
            cash_down,
            entry_cost,
            loan_amount: (price - cash_down - offset).max(0.0),
        }
    }

    pub fn loan_terms(&self, inputs: &SimulationInputs) -> LoanTerms {
        LoanTerms {
            loan_amount: self.loan_amount,
            annual_rate: inputs.financing_rate,
            term_months: inputs.financing_months(),
            property_value: inputs.property_value,
            balance_insurance_rate: inputs.balance_insurance_rate,
            property_insurance_rate: inputs.property_insurance_rate,
            admin_fee: inputs.admin_fee_monthly,
        }
    }

    /// Full loan schedule (empty when nothing is borrowed)
    pub fn schedule(&self, inputs: &SimulationInputs) -> Result<Vec<AmortizationRow>> {
        if self.loan_amount <= 0.0 {
            return Ok(Vec::new());
        }
        generate_schedule(inputs.amortization_type, &self.loan_terms(inputs))
    }
}

/// Lump sum a strategy needs before it can start
pub fn entry_cost(strategy: Strategy, inputs: &SimulationInputs) -> f64 {
    match strategy {
        Strategy::Rent => 0.0,
        Strategy::BuyCash => {
            let discounted = inputs.property_value * (1.0 - inputs.cash_discount_percent);
            discounted
                * (1.0 + inputs.transfer_tax_rate + inputs.deed_fee_rate + inputs.registry_fee_rate)
        }
        Strategy::Finance => FinancePlan::from_inputs(inputs).entry_cost,
    }
}

/// Monthly property tax at today's prices
fn base_property_tax(inputs: &SimulationInputs) -> f64 {
    inputs.property_value * inputs.property_tax_rate / 12.0
}

/// Total housing outflow of a strategy's first month, before any step-up
pub fn first_month_cost(strategy: Strategy, inputs: &SimulationInputs) -> Result<f64> {
    let ownership = inputs.condo_fee_monthly + base_property_tax(inputs);
    let cost = match strategy {
        Strategy::Rent => inputs.monthly_rent + ownership + inputs.renter_insurance_monthly,
        Strategy::BuyCash => ownership,
        Strategy::Finance => {
            let schedule = FinancePlan::from_inputs(inputs).schedule(inputs)?;
            schedule.first().map(|row| row.payment).unwrap_or(0.0) + ownership
        }
    };
    Ok(cost)
}

/// Runs the three strategies against one shared monthly budget
///
/// A purchase made after a savings phase still pays today's list price, and
/// that price is the capital-gains basis. Condo fees and property tax step up
/// on the global month count, so renter and owner pay the same amounts in any
/// given month.
pub struct ScenarioEngine {
    assumptions: Assumptions,
    monthly_budget: f64,
}

impl ScenarioEngine {
    pub fn new(assumptions: Assumptions, monthly_budget: f64) -> Self {
        Self {
            assumptions,
            monthly_budget,
        }
    }

    pub fn monthly_budget(&self) -> f64 {
        self.monthly_budget
    }

    /// Run one strategy
    pub fn project(&self, strategy: Strategy, inputs: &SimulationInputs) -> Result<ScenarioResult> {
        match strategy {
            Strategy::Rent => Ok(self.project_rent(inputs)),
            Strategy::BuyCash => self.project_buy_cash(inputs),
            Strategy::Finance => self.project_finance(inputs),
        }
    }

    /// Rent the reference property for the whole horizon and invest the rest
    pub fn project_rent(&self, inputs: &SimulationInputs) -> ScenarioResult {
        let months = inputs.total_months();
        let savings = self.save_toward(0.0, inputs);
        if savings.exhausted_horizon(months) {
            return self.savings_only(Strategy::Rent, savings, inputs);
        }

        let investment_rate = monthly_gross_rate(inputs.inflation_rate, inputs.bond_spread);
        let deflator = Deflator::new(inputs.inflation_rate);
        let table = &self.assumptions.withholding;

        let start = savings.months;
        let mut investment = InvestmentState::seeded(net_value(&savings.final_investment, table));
        let mut total_spent = savings.total_rent_paid;
        let mut total_spent_real = savings.total_rent_paid_real;
        let mut snapshots = savings.snapshots;

        for month in (start + 1)..=months {
            let mut row = MonthlySnapshot::new(month, Phase::Renting);
            row.rent_paid = stepped(inputs.monthly_rent, inputs.rent_growth_rate(), month);
            row.condo_payment = stepped(inputs.condo_fee_monthly, inputs.rent_index_rate, month);
            row.property_tax_payment = stepped(base_property_tax(inputs), inputs.inflation_rate, month);
            row.insurance_paid = inputs.renter_insurance_monthly;

            let outflow = row.housing_cost();
            let budget = stepped(self.monthly_budget, inputs.inflation_rate, month);
            row.investment_contribution = budget - outflow;
            investment = investment.advance(investment_rate, row.investment_contribution);
            row.investment_balance = net_value(&investment, table);

            total_spent += outflow;
            total_spent_real += deflator.real(outflow, month);
            row.total_spent = total_spent;
            row.total_spent_real = total_spent_real;
            row.total_wealth = row.investment_balance;
            row.total_wealth_real = deflator.real(row.total_wealth, month);
            snapshots.push(row);
        }

        ScenarioResult::from_snapshots(Strategy::Rent, snapshots, 0.0, 0.0, start, inputs.current_capital)
    }

    /// Save up for the discounted price plus closing costs, then own outright
    pub fn project_buy_cash(&self, inputs: &SimulationInputs) -> Result<ScenarioResult> {
        let entry = entry_cost(Strategy::BuyCash, inputs);
        debug!("Buy outright: entry cost {:.2}", entry);
        Ok(self.project_ownership(Strategy::BuyCash, inputs, entry, &[]))
    }

    /// Save up for the down payment plus closing costs, then own with a loan
    pub fn project_finance(&self, inputs: &SimulationInputs) -> Result<ScenarioResult> {
        let plan = FinancePlan::from_inputs(inputs);
        let schedule = plan.schedule(inputs)?;
        debug!(
            "Finance: entry cost {:.2}, loan {:.2} over {} months ({})",
            plan.entry_cost,
            plan.loan_amount,
            schedule.len(),
            inputs.amortization_type.as_str()
        );
        Ok(self.project_ownership(Strategy::Finance, inputs, plan.entry_cost, &schedule))
    }

    fn save_toward(&self, target: f64, inputs: &SimulationInputs) -> SavingsPhaseResult {
        let config = SavingsPhaseConfig {
            current_capital: inputs.current_capital,
            current_rent: inputs.current_rent,
            monthly_budget: self.monthly_budget,
            target,
            investment_rate: monthly_gross_rate(inputs.inflation_rate, inputs.bond_spread),
            inflation_rate: inputs.inflation_rate,
            rent_growth_rate: Some(inputs.rent_growth_rate()),
            max_months: inputs.total_months(),
        };
        simulate_savings_phase(&config, &self.assumptions.withholding)
    }

    /// Result for a strategy that never got past saving
    fn savings_only(
        &self,
        strategy: Strategy,
        savings: SavingsPhaseResult,
        inputs: &SimulationInputs,
    ) -> ScenarioResult {
        let months = inputs.total_months();
        if months > 0 {
            warn!(
                "{}: saving for the entry cost took the whole {}-month horizon",
                strategy.label(),
                months
            );
        }
        ScenarioResult::from_snapshots(strategy, savings.snapshots, 0.0, 0.0, months, inputs.current_capital)
    }

    /// Shared ownership loop. `schedule` is empty for an outright purchase.
    fn project_ownership(
        &self,
        strategy: Strategy,
        inputs: &SimulationInputs,
        entry: f64,
        schedule: &[AmortizationRow],
    ) -> ScenarioResult {
        let months = inputs.total_months();
        let savings = self.save_toward(entry, inputs);
        if savings.exhausted_horizon(months) {
            return self.savings_only(strategy, savings, inputs);
        }

        let table = &self.assumptions.withholding;
        let investment_rate = monthly_gross_rate(inputs.inflation_rate, inputs.bond_spread);
        let deflator = Deflator::new(inputs.inflation_rate);
        let appreciation = annual_to_monthly(
            (1.0 + inputs.property_appreciation_rate) * (1.0 + inputs.inflation_rate) - 1.0,
        );

        let start = savings.months;
        let capital_at_entry = net_value(&savings.final_investment, table);
        debug!(
            "{}: entering at month {} with {:.2} against {:.2}",
            strategy.label(),
            start,
            capital_at_entry,
            entry
        );

        // Shortfall at entry is carried as a negative balance
        let mut investment = InvestmentState::seeded(capital_at_entry - entry);
        let mut property_value = inputs.property_value;
        let mut total_spent = savings.total_rent_paid;
        let mut total_spent_real = savings.total_rent_paid_real;
        let mut total_interest = 0.0;
        let mut snapshots = savings.snapshots;

        for month in (start + 1)..=months {
            property_value *= 1.0 + appreciation;

            let mut row = MonthlySnapshot::new(month, Phase::Owning);
            row.property_value = property_value;
            row.condo_payment = stepped(inputs.condo_fee_monthly, inputs.rent_index_rate, month);
            row.property_tax_payment = stepped(base_property_tax(inputs), inputs.inflation_rate, month);

            // Past the end of the term the loan is paid off
            let loan_month = (month - start) as usize;
            if let Some(loan) = schedule.get(loan_month - 1) {
                row.mortgage_payment = loan.payment;
                row.principal_paid = loan.principal;
                row.interest_paid = loan.interest;
                row.insurance_paid = loan.insurance;
                row.admin_fee_paid = loan.admin_fee;
                row.outstanding_debt = loan.outstanding_balance;
                total_interest += loan.interest;
            }

            let outflow = row.housing_cost();
            let budget = stepped(self.monthly_budget, inputs.inflation_rate, month);
            row.investment_contribution = budget - outflow;
            investment = investment.advance(investment_rate, row.investment_contribution);
            row.investment_balance = net_value(&investment, table);

            row.capital_gains_tax = capital_gains_tax(
                property_value - inputs.property_value,
                property_value,
                inputs.is_first_property,
                &self.assumptions.capital_gains,
            );

            total_spent += outflow;
            total_spent_real += deflator.real(outflow, month);
            if month == start + 1 {
                row.upfront_paid = entry;
                total_spent += entry;
                total_spent_real += deflator.real(entry, start);
            }
            row.total_spent = total_spent;
            row.total_spent_real = total_spent_real;
            row.total_wealth = row.ownership_equity() + row.investment_balance;
            row.total_wealth_real = deflator.real(row.total_wealth, month);
            snapshots.push(row);
        }

        ScenarioResult::from_snapshots(strategy, snapshots, total_interest, entry, start, inputs.current_capital)
    }
}
