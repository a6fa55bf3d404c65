//! City-specific defaults used to pre-fill simulation inputs
//!
//! Sources: FipeZAP Dec/2025 rental yields, appreciation and rent adjustment;
//! municipal legislation for effective property-tax and transfer-tax rates.

use super::loader;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Location-dependent defaults for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityDefaults {
    /// Display name
    pub label: String,
    /// State / region code
    pub region: String,
    /// Effective annual property tax as a fraction of market value
    pub property_tax_rate: f64,
    /// Real annual appreciation above inflation
    pub real_appreciation_rate: f64,
    pub transfer_tax_rate: f64,
    /// Monthly rent as a fraction of property value
    pub rent_to_price: f64,
    /// Annual rent adjustment for existing contracts
    pub rent_adjustment_rate: f64,
}

/// (key, label, region, [property tax, real appreciation, transfer tax, rent-to-price, rent adjustment])
const BUILTIN_CITIES: [(&str, &str, &str, [f64; 5]); 13] = [
    ("SAO_PAULO", "São Paulo", "SP", [0.006, 0.02, 0.03, 0.00523, 0.055]),
    ("RIO_DE_JANEIRO", "Rio de Janeiro", "RJ", [0.005, 0.015, 0.03, 0.00493, 0.05]),
    ("BELO_HORIZONTE", "Belo Horizonte", "MG", [0.007, 0.03, 0.03, 0.00426, 0.055]),
    ("CURITIBA", "Curitiba", "PR", [0.004, 0.035, 0.027, 0.00379, 0.055]),
    ("PORTO_ALEGRE", "Porto Alegre", "RS", [0.004, 0.02, 0.03, 0.00581, 0.05]),
    ("BRASILIA", "Brasília", "DF", [0.003, 0.015, 0.02, 0.00529, 0.045]),
    ("SALVADOR", "Salvador", "BA", [0.005, 0.035, 0.03, 0.00593, 0.06]),
    ("RECIFE", "Recife", "PE", [0.006, 0.02, 0.03, 0.00698, 0.055]),
    ("FORTALEZA", "Fortaleza", "CE", [0.005, 0.03, 0.04, 0.00386, 0.055]),
    ("GOIANIA", "Goiânia", "GO", [0.005, 0.02, 0.02, 0.00498, 0.045]),
    ("FLORIANOPOLIS", "Florianópolis", "SC", [0.004, 0.03, 0.02, 0.00467, 0.055]),
    ("CAMPINAS", "Campinas", "SP", [0.005, 0.025, 0.027, 0.0057, 0.05]),
    ("SOROCABA", "Sorocaba", "SP", [0.006, 0.02, 0.025, 0.00458, 0.045]),
];

/// Read-only lookup from a location key to its defaults
#[derive(Debug, Clone, Default)]
pub struct CityTable {
    entries: BTreeMap<String, CityDefaults>,
}

impl CityTable {
    /// Build from (key, defaults) pairs
    pub fn from_entries(entries: Vec<(String, CityDefaults)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Load from a CSV file
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_entries(loader::load_city_defaults(path)?))
    }

    /// Built-in dataset of 13 Brazilian cities
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_CITIES
                .iter()
                .map(|&(key, label, region, rates)| {
                    let [property_tax_rate, real_appreciation_rate, transfer_tax_rate, rent_to_price, rent_adjustment_rate] =
                        rates;
                    (
                        key.to_string(),
                        CityDefaults {
                            label: label.to_string(),
                            region: region.to_string(),
                            property_tax_rate,
                            real_appreciation_rate,
                            transfer_tax_rate,
                            rent_to_price,
                            rent_adjustment_rate,
                        },
                    )
                })
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&CityDefaults> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CityDefaults)> {
        self.entries.iter()
    }

    /// (key, "Label - REGION") pairs sorted by display label
    pub fn options(&self) -> Vec<(String, String)> {
        let mut options: Vec<(String, String)> = self
            .entries
            .iter()
            .map(|(key, city)| (key.clone(), format!("{} - {}", city.label, city.region)))
            .collect();
        options.sort_by(|a, b| a.1.cmp(&b.1));
        options
    }
}
