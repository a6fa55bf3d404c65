//! CSV-based assumption loader
//!
//! Loads city defaults from a CSV file with columns
//! `key,label,region,property_tax_rate,real_appreciation_rate,transfer_tax_rate,rent_to_price,rent_adjustment_rate`

use super::CityDefaults;
use crate::Result;
use csv::Reader;
use std::path::Path;

/// Raw CSV row for one city
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    key: String,
    label: String,
    region: String,
    property_tax_rate: f64,
    real_appreciation_rate: f64,
    transfer_tax_rate: f64,
    rent_to_price: f64,
    rent_adjustment_rate: f64,
}

impl CsvRow {
    fn into_entry(self) -> (String, CityDefaults) {
        (
            self.key,
            CityDefaults {
                label: self.label,
                region: self.region,
                property_tax_rate: self.property_tax_rate,
                real_appreciation_rate: self.real_appreciation_rate,
                transfer_tax_rate: self.transfer_tax_rate,
                rent_to_price: self.rent_to_price,
                rent_adjustment_rate: self.rent_adjustment_rate,
            },
        )
    }
}

/// Load city defaults from a CSV file
pub fn load_city_defaults<P: AsRef<Path>>(path: P) -> Result<Vec<(String, CityDefaults)>> {
    let reader = Reader::from_path(path)?;
    read_rows(reader)
}

/// Load city defaults from any reader
pub fn load_city_defaults_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<(String, CityDefaults)>> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<(String, CityDefaults)>> {
    let mut entries = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        entries.push(row.into_entry());
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_city_rows() {
        let data = "\
key,label,region,property_tax_rate,real_appreciation_rate,transfer_tax_rate,rent_to_price,rent_adjustment_rate
LONDRINA,Londrina,PR,0.005,0.025,0.02,0.0045,0.05
NATAL,Natal,RN,0.004,0.02,0.03,0.005,0.055
";
        let entries = load_city_defaults_from_reader(data.as_bytes()).expect("parses");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "LONDRINA");
        assert_eq!(entries[1].1.region, "RN");
        assert_eq!(entries[1].1.rent_adjustment_rate, 0.055);
    }

    #[test]
    fn test_load_rejects_bad_number() {
        let data = "\
key,label,region,property_tax_rate,real_appreciation_rate,transfer_tax_rate,rent_to_price,rent_adjustment_rate
X,X,X,abc,0.02,0.02,0.004,0.05
";
        assert!(load_city_defaults_from_reader(data.as_bytes()).is_err());
    }
}
