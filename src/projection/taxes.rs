//! Capital-gains tax on a property sale

use crate::assumptions::CapitalGainsTable;

/// Tax owed on selling a property for `sale_price` with `nominal_gain`
///
/// Sole properties sold at or below the exemption ceiling pay nothing.
/// Otherwise each bracket taxes only the slice of gain that falls inside it.
pub fn capital_gains_tax(
    nominal_gain: f64,
    sale_price: f64,
    is_only_property: bool,
    table: &CapitalGainsTable,
) -> f64 {
    if nominal_gain <= 0.0 {
        return 0.0;
    }
    if is_only_property && sale_price <= table.exemption_ceiling {
        return 0.0;
    }

    let mut remaining = nominal_gain;
    let mut floor = 0.0;
    let mut tax = 0.0;

    for bracket in table.brackets() {
        let slice = remaining.min(bracket.max_gain - floor);
        if slice <= 0.0 {
            break;
        }
        tax += slice * bracket.rate;
        remaining -= slice;
        floor = bracket.max_gain;
    }

    tax
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn table() -> CapitalGainsTable {
        CapitalGainsTable::progressive()
    }

    #[test]
    fn test_no_gain_no_tax() {
        assert_eq!(capital_gains_tax(0.0, 700_000.0, false, &table()), 0.0);
        assert_eq!(capital_gains_tax(-50_000.0, 700_000.0, false, &table()), 0.0);
    }

    #[test]
    fn test_primary_residence_exemption() {
        assert_eq!(capital_gains_tax(100_000.0, 440_000.0, true, &table()), 0.0);
        // Exemption needs both conditions
        assert!(capital_gains_tax(100_000.0, 440_000.0, false, &table()) > 0.0);
        assert!(capital_gains_tax(100_000.0, 440_001.0, true, &table()) > 0.0);
    }

    #[test]
    fn test_first_bracket_flat() {
        assert_relative_eq!(capital_gains_tax(100_000.0, 700_000.0, false, &table()), 15_000.0);
    }

    #[test]
    fn test_marginal_across_brackets() {
        // 5M at 15% + 1M at 17.5%
        let tax = capital_gains_tax(6_000_000.0, 9_000_000.0, false, &table());
        assert_relative_eq!(tax, 750_000.0 + 175_000.0);
        assert!(tax < 6_000_000.0 * 0.175);

        // 5M@15 + 5M@17.5 + 20M@20 + 10M@22.5
        let tax = capital_gains_tax(40_000_000.0, 50_000_000.0, false, &table());
        assert_relative_eq!(tax, 750_000.0 + 875_000.0 + 4_000_000.0 + 2_250_000.0);
    }
}
