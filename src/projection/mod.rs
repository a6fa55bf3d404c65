//! Monthly projection: loan schedules, investment accumulation, taxes and
//! the per-strategy scenario engines

pub mod amortization;
mod engine;
pub mod investment;
mod savings;
mod snapshots;
mod state;
pub mod taxes;
mod timeline;

pub use amortization::{generate_schedule, AmortizationRow, LoanTerms};
pub use engine::{entry_cost, first_month_cost, FinancePlan, ScenarioEngine};
pub use investment::{annual_to_monthly, monthly_gross_rate, net_value};
pub use savings::{simulate_savings_phase, SavingsPhaseConfig, SavingsPhaseResult};
pub use snapshots::{
    CostBreakdown, MonthlySnapshot, Phase, ScenarioResult, ScenarioSummary, Strategy,
};
pub use state::InvestmentState;
pub use taxes::capital_gains_tax;
pub use timeline::Deflator;
