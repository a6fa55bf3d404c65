//! Rent or Buy - monthly wealth simulation for housing decisions
//!
//! This library provides:
//! - Rent, buy-outright and finance scenario projections over a shared budget
//! - SAC and PRICE loan schedules with balance and property insurance
//! - Inflation-linked investment accumulation net of withholding and custody
//! - Progressive capital-gains tax with the primary-residence exemption
//! - City defaults, rate estimation and CSV/markdown reports

pub mod error;
pub mod inputs;
pub mod assumptions;
pub mod rate_estimator;
pub mod projection;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use error::{Result, SimulatorError};
pub use inputs::{SimulationInputs, AmortizationType, RentIndex, EmploymentType};
pub use assumptions::{Assumptions, CityTable, RatePolicy};
pub use projection::{ScenarioEngine, ScenarioResult, MonthlySnapshot, Strategy};
pub use scenario::{Simulator, SimulationResults, BudgetPolicy, ChartBaseline};
