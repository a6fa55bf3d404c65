//! Input resolution: pre-fill fields from an injected city table

use super::SimulationInputs;
use crate::assumptions::CityTable;
use crate::{Result, SimulatorError};
use log::debug;

/// Overwrite location-dependent fields from the city table
///
/// Returns the inputs unchanged when no city is selected. The monthly rent is
/// derived from the city's rent-to-price ratio and the property value.
pub fn apply_city_defaults(inputs: &SimulationInputs, table: &CityTable) -> Result<SimulationInputs> {
    let Some(key) = inputs.city.as_deref() else {
        return Ok(inputs.clone());
    };

    let city = table
        .get(key)
        .ok_or_else(|| SimulatorError::UnknownCity(key.to_string()))?;

    debug!("Applying city defaults for {} ({})", city.label, city.region);

    Ok(SimulationInputs {
        property_tax_rate: city.property_tax_rate,
        property_appreciation_rate: city.real_appreciation_rate,
        transfer_tax_rate: city.transfer_tax_rate,
        rent_adjustment_rate: Some(city.rent_adjustment_rate),
        monthly_rent: (inputs.property_value * city.rent_to_price).round(),
        ..inputs.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::CityDefaults;

    fn single_city_table() -> CityTable {
        CityTable::from_entries(vec![(
            "TESTVILLE".to_string(),
            CityDefaults {
                label: "Testville".to_string(),
                region: "TS".to_string(),
                property_tax_rate: 0.01,
                real_appreciation_rate: 0.04,
                transfer_tax_rate: 0.02,
                rent_to_price: 0.005,
                rent_adjustment_rate: 0.06,
            },
        )])
    }

    #[test]
    fn test_no_city_leaves_inputs_alone() {
        let inputs = SimulationInputs {
            city: None,
            ..Default::default()
        };
        let resolved = apply_city_defaults(&inputs, &single_city_table()).unwrap();
        assert_eq!(resolved, inputs);
    }

    #[test]
    fn test_city_fields_are_applied() {
        let inputs = SimulationInputs {
            city: Some("TESTVILLE".to_string()),
            property_value: 400_000.0,
            ..Default::default()
        };
        let resolved = apply_city_defaults(&inputs, &single_city_table()).unwrap();

        assert_eq!(resolved.property_tax_rate, 0.01);
        assert_eq!(resolved.property_appreciation_rate, 0.04);
        assert_eq!(resolved.transfer_tax_rate, 0.02);
        assert_eq!(resolved.rent_adjustment_rate, Some(0.06));
        assert_eq!(resolved.monthly_rent, 2_000.0);
        // Untouched fields survive
        assert_eq!(resolved.condo_fee_monthly, inputs.condo_fee_monthly);
    }

    #[test]
    fn test_unknown_city_is_an_error() {
        let inputs = SimulationInputs {
            city: Some("NOWHERE".to_string()),
            ..Default::default()
        };
        let err = apply_city_defaults(&inputs, &single_city_table()).unwrap_err();
        assert!(matches!(err, SimulatorError::UnknownCity(ref k) if k == "NOWHERE"));
    }
}
