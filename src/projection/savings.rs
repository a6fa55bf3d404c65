//! Pre-purchase savings phase
//!
//! The buyer keeps paying their current rent and invests the rest of the
//! monthly budget until the net investment value covers the entry cost.

use super::investment::net_value;
use super::snapshots::{MonthlySnapshot, Phase};
use super::state::InvestmentState;
use super::timeline::{stepped, Deflator};
use crate::assumptions::WithholdingTable;
use log::debug;

/// Parameters for one savings run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsPhaseConfig {
    pub current_capital: f64,
    /// Rent paid today
    pub current_rent: f64,
    pub monthly_budget: f64,
    /// Net investment value needed to enter the strategy
    pub target: f64,
    /// Monthly investment return
    pub investment_rate: f64,
    /// Annual inflation, grows the budget and deflates spend
    pub inflation_rate: f64,
    /// Annual rent growth; inflation when absent
    pub rent_growth_rate: Option<f64>,
    pub max_months: u32,
}

/// Outcome of a savings run
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsPhaseResult {
    /// Months elapsed (max_months when the target was never reached)
    pub months: u32,
    pub final_investment: InvestmentState,
    pub snapshots: Vec<MonthlySnapshot>,
    pub total_rent_paid: f64,
    pub total_rent_paid_real: f64,
    pub target_reached: bool,
}

impl SavingsPhaseResult {
    /// True when saving consumed the horizon and the strategy never starts
    pub fn exhausted_horizon(&self, horizon_months: u32) -> bool {
        !self.target_reached || self.months >= horizon_months
    }
}

/// Run the savings phase
pub fn simulate_savings_phase(config: &SavingsPhaseConfig, table: &WithholdingTable) -> SavingsPhaseResult {
    let mut investment = InvestmentState::seeded(config.current_capital);

    if config.current_capital >= config.target {
        return SavingsPhaseResult {
            months: 0,
            final_investment: investment,
            snapshots: Vec::new(),
            total_rent_paid: 0.0,
            total_rent_paid_real: 0.0,
            target_reached: true,
        };
    }

    let rent_growth = config.rent_growth_rate.unwrap_or(config.inflation_rate);
    let deflator = Deflator::new(config.inflation_rate);
    let mut total_rent_paid = 0.0;
    let mut total_rent_paid_real = 0.0;
    let mut snapshots = Vec::with_capacity(config.max_months as usize);

    for month in 1..=config.max_months {
        let rent = stepped(config.current_rent, rent_growth, month);
        let budget = stepped(config.monthly_budget, config.inflation_rate, month);

        total_rent_paid += rent;
        total_rent_paid_real += deflator.real(rent, month);

        let contribution = budget - rent;
        investment = investment.advance(config.investment_rate, contribution);
        let net = net_value(&investment, table);

        let mut snapshot = MonthlySnapshot::new(month, Phase::Saving);
        snapshot.rent_paid = rent;
        snapshot.investment_balance = net;
        snapshot.investment_contribution = contribution;
        snapshot.total_spent = total_rent_paid;
        snapshot.total_spent_real = total_rent_paid_real;
        snapshot.total_wealth = net;
        snapshot.total_wealth_real = deflator.real(net, month);
        snapshots.push(snapshot);

        if net >= config.target {
            debug!("Savings target {:.2} reached after {} months", config.target, month);
            return SavingsPhaseResult {
                months: month,
                final_investment: investment,
                snapshots,
                total_rent_paid,
                total_rent_paid_real,
                target_reached: true,
            };
        }
    }

    SavingsPhaseResult {
        months: config.max_months,
        final_investment: investment,
        snapshots,
        total_rent_paid,
        total_rent_paid_real,
        target_reached: false,
    }
}
