//! Simulation inputs, JSON loading and city-default resolution

mod data;
pub mod loader;
pub mod resolve;

pub use data::{SimulationInputs, AmortizationType, RentIndex, EmploymentType, MAX_YEARS};
pub use loader::{load_inputs, load_inputs_from_reader};
pub use resolve::apply_city_defaults;
