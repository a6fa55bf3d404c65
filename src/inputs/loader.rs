//! Load simulation inputs from JSON

use super::SimulationInputs;
use crate::Result;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load inputs from a JSON file; missing fields take their defaults
pub fn load_inputs<P: AsRef<Path>>(path: P) -> Result<SimulationInputs> {
    let file = File::open(path)?;
    load_inputs_from_reader(BufReader::new(file))
}

/// Load inputs from any reader (e.g., stdin, string buffer)
pub fn load_inputs_from_reader<R: std::io::Read>(reader: R) -> Result<SimulationInputs> {
    let inputs: SimulationInputs = serde_json::from_reader(reader)?;
    inputs.validate()?;
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::AmortizationType;

    #[test]
    fn test_load_partial_json() {
        let json = r#"{
            "property_value": 350000,
            "financing_term_years": 25,
            "amortization_type": "FixedInstallment",
            "city": null
        }"#;
        let inputs = load_inputs_from_reader(json.as_bytes()).expect("valid inputs");

        assert_eq!(inputs.property_value, 350_000.0);
        assert_eq!(inputs.financing_term_years, 25);
        assert_eq!(inputs.amortization_type, AmortizationType::FixedInstallment);
        assert!(inputs.city.is_none());
        assert_eq!(inputs.condo_fee_monthly, 800.0);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let json = r#"{ "down_payment_percent": 1.5 }"#;
        assert!(load_inputs_from_reader(json.as_bytes()).is_err());
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        assert!(load_inputs_from_reader("{ not json".as_bytes()).is_err());
    }
}
