//! Simulation orchestrator
//!
//! Picks one shared monthly budget, runs the three strategy engines against
//! it, ranks them and builds the yearly wealth chart.

use crate::assumptions::Assumptions;
use crate::inputs::SimulationInputs;
use crate::projection::{first_month_cost, ScenarioEngine, ScenarioResult, Strategy};
use crate::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Rule for the monthly budget every strategy gets
///
/// The budget decides how much each strategy invests, so the rule affects
/// the winner. `FirstMonthCostCeiling` guarantees no strategy starts out
/// disinvesting, but can assume more money than the household has today.
/// `RentPlusSavings` reflects current cash flow, but a loan payment above it
/// makes the finance strategy disinvest from month one.
pub trait BudgetPolicy: Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn monthly_budget(&self, inputs: &SimulationInputs) -> Result<f64>;
}

/// Largest first-month housing cost across the three strategies (default)
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMonthCostCeiling;

impl BudgetPolicy for FirstMonthCostCeiling {
    fn name(&self) -> &'static str {
        "first-month-cost"
    }

    fn monthly_budget(&self, inputs: &SimulationInputs) -> Result<f64> {
        let mut budget: f64 = 0.0;
        for strategy in Strategy::ALL {
            budget = budget.max(first_month_cost(strategy, inputs)?);
        }
        Ok(budget)
    }
}

/// What the household spends on rent today plus what it saves
#[derive(Debug, Clone, Copy, Default)]
pub struct RentPlusSavings;

impl BudgetPolicy for RentPlusSavings {
    fn name(&self) -> &'static str {
        "rent-plus-savings"
    }

    fn monthly_budget(&self, inputs: &SimulationInputs) -> Result<f64> {
        Ok(inputs.current_rent + inputs.monthly_savings)
    }
}

/// Value every strategy's chart line starts from at year 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartBaseline {
    #[default]
    StartingCapital,
    /// List price plus transfer, deed and registry costs
    AcquisitionCost,
}

impl ChartBaseline {
    fn value(&self, inputs: &SimulationInputs) -> f64 {
        match self {
            ChartBaseline::StartingCapital => inputs.current_capital,
            ChartBaseline::AcquisitionCost => {
                inputs.property_value
                    * (1.0 + inputs.transfer_tax_rate + inputs.deed_fee_rate + inputs.registry_fee_rate)
            }
        }
    }
}

/// Wealth of each strategy at the end of a year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub year: u32,
    pub rent: f64,
    pub buy_cash: f64,
    pub finance: f64,
}

/// Complete output of one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResults {
    pub rent: ScenarioResult,
    pub buy_cash: ScenarioResult,
    pub finance: ScenarioResult,

    pub winner: Strategy,
    /// Strategies from best to worst
    pub ranking: Vec<Strategy>,
    /// Winner's wealth minus the runner-up's
    pub advantage: f64,
    /// Advantage relative to the runner-up's wealth (0 when that is 0)
    pub advantage_percent: f64,
    /// Whether ranking and chart use deflated values
    pub real_values: bool,

    pub chart: Vec<ChartPoint>,

    pub starting_capital: f64,
    pub monthly_budget: f64,
    pub monthly_savings: f64,
}

impl SimulationResults {
    pub fn result(&self, strategy: Strategy) -> &ScenarioResult {
        match strategy {
            Strategy::Rent => &self.rent,
            Strategy::BuyCash => &self.buy_cash,
            Strategy::Finance => &self.finance,
        }
    }

    /// Results in `Strategy::ALL` order
    pub fn scenarios(&self) -> [&ScenarioResult; 3] {
        [&self.rent, &self.buy_cash, &self.finance]
    }

    pub fn winner_result(&self) -> &ScenarioResult {
        self.result(self.winner)
    }
}

/// Runs complete simulations with a fixed set of assumptions and policies
///
/// # Example
/// ```ignore
/// let simulator = Simulator::new().with_budget_policy(RentPlusSavings);
/// let results = simulator.run(&inputs)?;
/// println!("{} wins by {:.0}", results.winner.label(), results.advantage);
/// ```
#[derive(Debug)]
pub struct Simulator {
    assumptions: Assumptions,
    budget_policy: Box<dyn BudgetPolicy>,
    chart_baseline: ChartBaseline,
}

impl Simulator {
    /// Statutory tables, first-month-cost budget, starting-capital baseline
    pub fn new() -> Self {
        Self::with_assumptions(Assumptions::statutory())
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            assumptions,
            budget_policy: Box::new(FirstMonthCostCeiling),
            chart_baseline: ChartBaseline::default(),
        }
    }

    pub fn with_budget_policy<P: BudgetPolicy + 'static>(mut self, policy: P) -> Self {
        self.budget_policy = Box::new(policy);
        self
    }

    pub fn with_chart_baseline(mut self, baseline: ChartBaseline) -> Self {
        self.chart_baseline = baseline;
        self
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn budget_policy(&self) -> &dyn BudgetPolicy {
        self.budget_policy.as_ref()
    }

    /// Run all three strategies and rank them
    pub fn run(&self, inputs: &SimulationInputs) -> Result<SimulationResults> {
        inputs.validate()?;

        let monthly_budget = self.budget_policy.monthly_budget(inputs)?;
        info!(
            "Simulating {} years with a {:.2} monthly budget ({})",
            inputs.horizon_years,
            monthly_budget,
            self.budget_policy.name()
        );

        let engine = ScenarioEngine::new(self.assumptions.clone(), monthly_budget);
        let rent = engine.project_rent(inputs);
        let buy_cash = engine.project_buy_cash(inputs)?;
        let finance = engine.project_finance(inputs)?;

        let real = inputs.show_real_values;
        let mut ranked = [&rent, &buy_cash, &finance];
        // Stable sort keeps Strategy::ALL order on ties
        ranked.sort_by(|a, b| b.wealth_metric(real).total_cmp(&a.wealth_metric(real)));

        let top = ranked[0].wealth_metric(real);
        let runner_up = ranked[1].wealth_metric(real);
        let advantage = top - runner_up;
        let advantage_percent = if runner_up != 0.0 {
            advantage / runner_up.abs() * 100.0
        } else {
            0.0
        };
        let winner = ranked[0].strategy;
        let ranking = ranked.iter().map(|r| r.strategy).collect();

        info!(
            "{} wins by {:.2} ({:.1}%)",
            winner.label(),
            advantage,
            advantage_percent
        );

        let chart = self.build_chart(inputs, [&rent, &buy_cash, &finance]);

        Ok(SimulationResults {
            rent,
            buy_cash,
            finance,
            winner,
            ranking,
            advantage,
            advantage_percent,
            real_values: real,
            chart,
            starting_capital: inputs.current_capital,
            monthly_budget,
            monthly_savings: inputs.monthly_savings,
        })
    }

    fn build_chart(&self, inputs: &SimulationInputs, results: [&ScenarioResult; 3]) -> Vec<ChartPoint> {
        let real = inputs.show_real_values;
        let baseline = self.chart_baseline.value(inputs);

        let wealth_at = |result: &ScenarioResult, year: u32| -> f64 {
            let index = (year * 12) as usize - 1;
            match result.monthly_snapshots.get(index) {
                Some(s) if real => s.total_wealth_real,
                Some(s) => s.total_wealth,
                None => result.wealth_metric(real),
            }
        };

        let mut chart = Vec::with_capacity(inputs.horizon_years as usize + 1);
        chart.push(ChartPoint {
            year: 0,
            rent: baseline,
            buy_cash: baseline,
            finance: baseline,
        });
        for year in 1..=inputs.horizon_years {
            chart.push(ChartPoint {
                year,
                rent: wealth_at(results[0], year),
                buy_cash: wealth_at(results[1], year),
                finance: wealth_at(results[2], year),
            });
        }
        chart
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}
