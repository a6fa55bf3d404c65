//! Inflation-linked bond accumulator: growth rate and net-of-tax value

use super::state::InvestmentState;
use crate::assumptions::WithholdingTable;

/// Average holding days per elapsed month: contributions arrive evenly, so the
/// mean age of the pool is half the elapsed time (30-day months)
const HOLDING_DAYS_PER_MONTH: f64 = 15.0;

/// Convert an annual rate to its compound-equivalent monthly rate
pub fn annual_to_monthly(annual: f64) -> f64 {
    (1.0 + annual).powf(1.0 / 12.0) - 1.0
}

/// Monthly gross return of an inflation-linked bond paying `spread` over `inflation`
pub fn monthly_gross_rate(inflation: f64, spread: f64) -> f64 {
    annual_to_monthly((1.0 + inflation) * (1.0 + spread) - 1.0)
}

/// Value realizable today: gross balance less withholding on the gain and
/// the accrued custody fee
///
/// A balance with no gain (including any negative balance) is returned as-is.
pub fn net_value(state: &InvestmentState, table: &WithholdingTable) -> f64 {
    let gain = state.gross_gain();
    if gain <= 0.0 {
        return state.gross_balance;
    }

    let holding_days = state.months_elapsed as f64 * HOLDING_DAYS_PER_MONTH;
    let tax = gain * table.rate_for_days(holding_days);

    // Custody accrues on the average of what went in and what is there now
    let average_balance = (state.total_contributed + state.gross_balance) / 2.0;
    let custody_fee =
        average_balance * table.custody_fee_annual * (state.months_elapsed as f64 / 12.0);

    state.gross_balance - tax - custody_fee
}
