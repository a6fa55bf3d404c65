//! Investment balance state tracked through a projection

use serde::{Deserialize, Serialize};

/// Compounding investment balance at a point in time
///
/// The gross balance may go negative: a scenario whose monthly cost exceeds
/// its budget disinvests, and a shortfall beyond the balance is carried as
/// implicit borrowing at the investment rate. No floor is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentState {
    /// Balance before withholding tax and custody fees
    pub gross_balance: f64,

    /// Sum of all contributions, including the seed (signed)
    pub total_contributed: f64,

    /// Months the balance has been compounding
    pub months_elapsed: u32,
}

impl InvestmentState {
    /// Fresh state seeded with an initial amount counted as contributed
    pub fn seeded(amount: f64) -> Self {
        Self {
            gross_balance: amount,
            total_contributed: amount,
            months_elapsed: 0,
        }
    }

    /// Accrue one month of growth, then add the (signed) contribution
    pub fn advance(self, monthly_rate: f64, contribution: f64) -> Self {
        Self {
            gross_balance: self.gross_balance + self.gross_balance * monthly_rate + contribution,
            total_contributed: self.total_contributed + contribution,
            months_elapsed: self.months_elapsed + 1,
        }
    }

    /// Gross gain over contributions (may be negative)
    pub fn gross_gain(&self) -> f64 {
        self.gross_balance - self.total_contributed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_advance_compounds_then_contributes() {
        let state = InvestmentState::seeded(1_000.0).advance(0.01, 100.0);
        assert_relative_eq!(state.gross_balance, 1_110.0);
        assert_eq!(state.total_contributed, 1_100.0);
        assert_eq!(state.months_elapsed, 1);
    }

    #[test]
    fn test_negative_contribution_can_go_below_zero() {
        let state = InvestmentState::seeded(100.0).advance(0.0, -250.0);
        assert_eq!(state.gross_balance, -150.0);
        assert_eq!(state.total_contributed, -150.0);
        assert_eq!(state.gross_gain(), 0.0);
    }

    #[test]
    fn test_advance_leaves_input_state_untouched() {
        let start = InvestmentState::seeded(500.0);
        let _next = start.advance(0.02, 10.0);
        assert_eq!(start, InvestmentState::seeded(500.0));
    }
}
