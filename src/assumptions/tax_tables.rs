//! Tax tables: regressive withholding on investment gains and progressive
//! capital-gains brackets on property sales

/// One band of the regressive withholding table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WithholdingBracket {
    /// Inclusive upper bound on average holding days
    pub max_days: f64,
    pub rate: f64,
}

/// Withholding on investment gains, decreasing with holding period,
/// plus the annual custody fee charged on the balance
#[derive(Debug, Clone, PartialEq)]
pub struct WithholdingTable {
    brackets: Vec<WithholdingBracket>,

    /// Annual custody fee rate
    pub custody_fee_annual: f64,
}

impl WithholdingTable {
    /// Inflation-linked treasury bond table
    pub fn regressive() -> Self {
        Self {
            brackets: vec![
                WithholdingBracket { max_days: 180.0, rate: 0.225 },
                WithholdingBracket { max_days: 360.0, rate: 0.20 },
                WithholdingBracket { max_days: 720.0, rate: 0.175 },
                WithholdingBracket { max_days: f64::INFINITY, rate: 0.15 },
            ],
            custody_fee_annual: 0.002,
        }
    }

    /// Withholding rate for an average holding period in days
    pub fn rate_for_days(&self, holding_days: f64) -> f64 {
        self.brackets
            .iter()
            .find(|b| holding_days <= b.max_days)
            .or(self.brackets.last())
            .map(|b| b.rate)
            .unwrap_or(0.0)
    }
}

impl Default for WithholdingTable {
    fn default() -> Self {
        Self::regressive()
    }
}

/// One band of the capital-gains table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapitalGainsBracket {
    /// Cumulative gain ceiling for this band
    pub max_gain: f64,
    pub rate: f64,
}

/// Progressive capital-gains table with a primary-residence exemption
#[derive(Debug, Clone, PartialEq)]
pub struct CapitalGainsTable {
    brackets: Vec<CapitalGainsBracket>,

    /// Sale price at or below which a sole property is exempt
    pub exemption_ceiling: f64,
}

impl CapitalGainsTable {
    pub fn progressive() -> Self {
        Self {
            brackets: vec![
                CapitalGainsBracket { max_gain: 5_000_000.0, rate: 0.15 },
                CapitalGainsBracket { max_gain: 10_000_000.0, rate: 0.175 },
                CapitalGainsBracket { max_gain: 30_000_000.0, rate: 0.20 },
                CapitalGainsBracket { max_gain: f64::INFINITY, rate: 0.225 },
            ],
            exemption_ceiling: 440_000.0,
        }
    }

    pub fn brackets(&self) -> &[CapitalGainsBracket] {
        &self.brackets
    }
}

impl Default for CapitalGainsTable {
    fn default() -> Self {
        Self::progressive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withholding_boundaries_are_inclusive() {
        let table = WithholdingTable::regressive();
        assert_eq!(table.rate_for_days(0.0), 0.225);
        assert_eq!(table.rate_for_days(180.0), 0.225);
        assert_eq!(table.rate_for_days(180.5), 0.20);
        assert_eq!(table.rate_for_days(360.0), 0.20);
        assert_eq!(table.rate_for_days(720.0), 0.175);
        assert_eq!(table.rate_for_days(721.0), 0.15);
        assert_eq!(table.rate_for_days(10_000.0), 0.15);
    }

    #[test]
    fn test_capital_gains_brackets_ascend() {
        let table = CapitalGainsTable::progressive();
        let ceilings: Vec<f64> = table.brackets().iter().map(|b| b.max_gain).collect();
        assert!(ceilings.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(table.exemption_ceiling, 440_000.0);
    }
}
