//! Static assumptions: tax tables, lending policy and city defaults

mod city;
mod lending;
mod tax_tables;
pub mod loader;

pub use city::{CityDefaults, CityTable};
pub use lending::{RatePolicy, SubsidizedBracket};
pub use tax_tables::{
    CapitalGainsBracket, CapitalGainsTable, WithholdingBracket, WithholdingTable,
};

/// Container for the tables a simulation run depends on
#[derive(Debug, Clone, Default)]
pub struct Assumptions {
    pub withholding: WithholdingTable,
    pub capital_gains: CapitalGainsTable,
}

impl Assumptions {
    /// Current statutory tables
    pub fn statutory() -> Self {
        Self {
            withholding: WithholdingTable::regressive(),
            capital_gains: CapitalGainsTable::progressive(),
        }
    }
}
