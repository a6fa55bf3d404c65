//! Report output: per-month CSV and a markdown summary

use crate::inputs::SimulationInputs;
use crate::projection::{Deflator, MonthlySnapshot, ScenarioResult, Strategy};
use crate::scenario::SimulationResults;
use crate::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

/// One CSV line: a strategy's month
#[derive(Debug, Serialize)]
struct SnapshotCsvRow<'a> {
    strategy: &'a str,
    month: u32,
    year: u32,
    phase: &'a str,
    rent_paid: f64,
    mortgage_payment: f64,
    principal_paid: f64,
    interest_paid: f64,
    insurance_paid: f64,
    admin_fee_paid: f64,
    condo_payment: f64,
    property_tax_payment: f64,
    upfront_paid: f64,
    investment_contribution: f64,
    investment_balance: f64,
    property_value: f64,
    outstanding_debt: f64,
    capital_gains_tax: f64,
    total_spent: f64,
    total_spent_real: f64,
    total_wealth: f64,
    total_wealth_real: f64,
}

impl<'a> SnapshotCsvRow<'a> {
    fn new(strategy: &'a str, s: &MonthlySnapshot) -> Self {
        Self {
            strategy,
            month: s.month,
            year: s.year,
            phase: s.phase.as_str(),
            rent_paid: s.rent_paid,
            mortgage_payment: s.mortgage_payment,
            principal_paid: s.principal_paid,
            interest_paid: s.interest_paid,
            insurance_paid: s.insurance_paid,
            admin_fee_paid: s.admin_fee_paid,
            condo_payment: s.condo_payment,
            property_tax_payment: s.property_tax_payment,
            upfront_paid: s.upfront_paid,
            investment_contribution: s.investment_contribution,
            investment_balance: s.investment_balance,
            property_value: s.property_value,
            outstanding_debt: s.outstanding_debt,
            capital_gains_tax: s.capital_gains_tax,
            total_spent: s.total_spent,
            total_spent_real: s.total_spent_real,
            total_wealth: s.total_wealth,
            total_wealth_real: s.total_wealth_real,
        }
    }
}

/// Write every month of every strategy as CSV, with a header line
pub fn write_snapshots_csv<W: Write>(writer: W, results: &SimulationResults) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for scenario in results.scenarios() {
        let name = strategy_key(scenario.strategy);
        for snapshot in &scenario.monthly_snapshots {
            wtr.serialize(SnapshotCsvRow::new(name, snapshot))?;
        }
    }
    wtr.flush()?;
    Ok(())
}

fn strategy_key(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Rent => "rent",
        Strategy::BuyCash => "buy_cash",
        Strategy::Finance => "finance",
    }
}

/// Currency with thousands separators and two decimals
pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, cents % 100)
}

/// Short form for wide tables: 1.2M, 350k
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

fn format_percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

fn or_dash(value: f64) -> String {
    if value > 0.0 {
        format_money(value)
    } else {
        "-".to_string()
    }
}

/// Right-aligned markdown table
fn markdown_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r.get(i).map_or(0, |c| c.chars().count()))
                .fold(h.chars().count(), usize::max)
        })
        .collect();

    let line = |cells: Vec<String>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:>width$}", c, width = *w))
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let mut out = vec![
        line(headers.iter().map(|h| h.to_string()).collect()),
        line(widths.iter().map(|w| "-".repeat(*w)).collect()),
    ];
    out.extend(rows.iter().map(|r| line(r.clone())));
    out.join("\n")
}

fn savings_duration(months: u32) -> String {
    if months == 0 {
        "-".to_string()
    } else {
        format!("{}y {}m", months / 12, months % 12)
    }
}

/// Year-end rows of one strategy; month values are deflated when `deflator` is set
fn yearly_table(scenario: &ScenarioResult, deflator: Option<&Deflator>) -> String {
    let owns = scenario.strategy != Strategy::Rent;
    let finances = scenario.strategy == Strategy::Finance;

    let mut headers = vec!["Year", "Cost/month", "Invested/month", "Spent", "Investments"];
    if owns {
        headers.push("Property");
    }
    if finances {
        headers.push("Debt");
    }
    headers.push("Wealth");

    let rows: Vec<Vec<String>> = scenario
        .yearly_snapshots
        .iter()
        .map(|snap| {
            let value = |x: f64| match deflator {
                Some(d) => d.real(x, snap.month),
                None => x,
            };
            let (spent, wealth) = match deflator {
                Some(_) => (snap.total_spent_real, snap.total_wealth_real),
                None => (snap.total_spent, snap.total_wealth),
            };

            let mut cells = vec![
                snap.year.to_string(),
                format_compact(value(snap.housing_cost())),
                format_compact(value(snap.investment_contribution)),
                format_compact(spent),
                format_compact(value(snap.investment_balance)),
            ];
            if owns {
                cells.push(format_compact(value(snap.property_value)));
            }
            if finances {
                cells.push(if snap.outstanding_debt > 0.0 {
                    format_compact(value(snap.outstanding_debt))
                } else {
                    "-".to_string()
                });
            }
            cells.push(format_compact(wealth));
            cells
        })
        .collect();

    markdown_table(&headers, &rows)
}

/// Render the results as a markdown report dated `date`
pub fn to_markdown(inputs: &SimulationInputs, results: &SimulationResults, date: NaiveDate) -> String {
    let real = results.real_values;
    let mode = if real { "Real values (deflated)" } else { "Nominal values" };
    let scenarios = results.scenarios();
    let mut lines: Vec<String> = Vec::new();

    lines.push("# Rent or Buy? Simulation".to_string());
    lines.push(String::new());
    lines.push(format!("> Generated on {} · {}", date.format("%Y-%m-%d"), mode));
    lines.push(String::new());

    lines.push("## Result".to_string());
    lines.push(String::new());
    lines.push(format!(
        "**{}** is the best option, ending with **{}** (+{:.1}%) more wealth than the runner-up.",
        results.winner.label(),
        format_money(results.advantage),
        results.advantage_percent
    ));
    lines.push(String::new());
    lines.push(format!("- **Starting capital:** {}", format_money(results.starting_capital)));
    lines.push(format!("- **Monthly savings:** {}/month", format_money(results.monthly_savings)));
    lines.push(format!("- **Monthly budget:** {}/month", format_money(results.monthly_budget)));
    lines.push(String::new());

    lines.push("## Scenario Summary".to_string());
    lines.push(String::new());
    let summary_rows: Vec<Vec<String>> = scenarios
        .iter()
        .map(|s| {
            vec![
                s.label().to_string(),
                format_money(s.wealth_metric(real)),
                format_money(if real { s.total_spent_real } else { s.total_spent }),
                format_money(if real { s.average_monthly_cost_real } else { s.average_monthly_cost }),
                or_dash(s.total_interest_paid),
                format_money(s.upfront_cost),
                savings_duration(s.savings_phase_months),
            ]
        })
        .collect();
    lines.push(markdown_table(
        &["Scenario", "Final wealth", "Total spent", "Avg monthly cost", "Interest", "Upfront", "Saving"],
        &summary_rows,
    ));
    lines.push(String::new());

    lines.push("## Where the Money Went".to_string());
    lines.push(String::new());
    let cost_rows: Vec<Vec<String>> = scenarios
        .iter()
        .map(|s| {
            let c = s.cost_breakdown();
            vec![
                s.label().to_string(),
                format_money(c.upfront),
                or_dash(c.rent),
                or_dash(c.interest),
                or_dash(c.principal),
                format_money(c.condo),
                format_money(c.property_tax),
                or_dash(c.insurance),
                or_dash(c.admin_fees),
            ]
        })
        .collect();
    lines.push(markdown_table(
        &["Scenario", "Upfront", "Rent", "Interest", "Principal", "Condo", "Property tax", "Insurance", "Admin fees"],
        &cost_rows,
    ));
    lines.push(String::new());

    lines.push("## Yearly Detail".to_string());
    lines.push(String::new());
    let deflator = Deflator::new(inputs.inflation_rate);
    let deflator = real.then_some(&deflator);
    for s in scenarios {
        lines.push(format!("### {}", s.label()));
        lines.push(String::new());
        lines.push(yearly_table(s, deflator));
        lines.push(String::new());
    }

    lines.push("## Parameters".to_string());
    lines.push(String::new());
    lines.push(markdown_table(&["Parameter", "Value"], &parameter_rows(inputs)));
    lines.push(String::new());

    lines.join("\n")
}

fn parameter_rows(inputs: &SimulationInputs) -> Vec<Vec<String>> {
    let mut rows: Vec<(&str, String)> = vec![
        ("**Current situation**", String::new()),
        ("Capital", format_money(inputs.current_capital)),
        ("Current rent", format_money(inputs.current_rent)),
        ("Monthly savings", format_money(inputs.monthly_savings)),
        ("**Property**", String::new()),
        ("Price", format_money(inputs.property_value)),
        ("Real appreciation", format_percent(inputs.property_appreciation_rate)),
        ("**Rent**", String::new()),
        ("Market rent", format_money(inputs.monthly_rent)),
        ("Adjustment index", inputs.rent_adjustment_index.as_str().to_string()),
        ("Adjustment rate", format_percent(inputs.rent_growth_rate())),
        ("**Financing**", String::new()),
        ("Down payment", format_percent(inputs.down_payment_percent)),
        ("Annual rate (CET)", format_percent(inputs.financing_rate)),
        ("Term", format!("{} years", inputs.financing_term_years)),
        ("Amortization", inputs.amortization_type.as_str().to_string()),
    ];
    if let Some(offset) = inputs.fund_offset {
        rows.push(("Fund offset", format_money(offset)));
    }
    rows.extend([
        ("**Cash purchase**", String::new()),
        ("Cash discount", format_percent(inputs.cash_discount_percent)),
        ("**Ownership costs**", String::new()),
        ("Property tax (per year)", format_percent(inputs.property_tax_rate)),
        ("Condo fee", format_money(inputs.condo_fee_monthly)),
        ("Transfer tax", format_percent(inputs.transfer_tax_rate)),
        ("Deed fee", format_percent(inputs.deed_fee_rate)),
        ("Registry fee", format_percent(inputs.registry_fee_rate)),
        ("Renter insurance", format_money(inputs.renter_insurance_monthly)),
        ("**Loan insurance and fees**", String::new()),
        ("Balance insurance (monthly)", format_percent(inputs.balance_insurance_rate)),
        ("Property insurance (monthly)", format_percent(inputs.property_insurance_rate)),
        ("Admin fee", format_money(inputs.admin_fee_monthly)),
        ("Appraisal fee", format_money(inputs.appraisal_fee)),
        ("**Macro**", String::new()),
        ("Base rate", format_percent(inputs.base_rate)),
        ("Inflation", format_percent(inputs.inflation_rate)),
        ("Bond spread", format_percent(inputs.bond_spread)),
        ("General price index", format_percent(inputs.rent_index_rate)),
        ("**Buyer**", String::new()),
        ("Monthly income", format_money(inputs.monthly_income)),
        ("Employment", inputs.employment_type.as_str().to_string()),
        ("First property", (if inputs.is_first_property { "Yes" } else { "No" }).to_string()),
        ("**Horizon**", String::new()),
        ("Years", inputs.horizon_years.to_string()),
    ]);
    if let Some(city) = &inputs.city {
        rows.push(("City", city.clone()));
    }

    rows.into_iter()
        .map(|(name, value)| vec![name.to_string(), value])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Simulator;

    fn run() -> (SimulationInputs, SimulationResults) {
        let inputs = SimulationInputs {
            current_capital: 150_000.0,
            current_rent: 2_000.0,
            monthly_savings: 3_000.0,
            horizon_years: 5,
            ..Default::default()
        };
        let results = Simulator::new().run(&inputs).unwrap();
        (inputs, results)
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(1_234_567.891), "1,234,567.89");
        assert_eq!(format_money(-950.5), "-950.50");
        assert_eq!(format_money(100.0), "100.00");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(1_500_000.0), "1.50M");
        assert_eq!(format_compact(350_000.0), "350.0k");
        assert_eq!(format_compact(-2_000.0), "-2.0k");
        assert_eq!(format_compact(12.0), "12");
    }

    #[test]
    fn test_csv_has_one_row_per_month_per_strategy() {
        let (_, results) = run();
        let mut buf = Vec::new();
        write_snapshots_csv(&mut buf, &results).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 3 * 60);
        assert!(lines[0].starts_with("strategy,month,year,phase,rent_paid"));
        assert!(lines[1].starts_with("rent,1,1,"));
        assert!(lines.last().unwrap().starts_with("finance,60,5,"));
    }

    #[test]
    fn test_markdown_sections() {
        let (inputs, results) = run();
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let md = to_markdown(&inputs, &results, date);

        assert!(md.starts_with("# Rent or Buy? Simulation"));
        assert!(md.contains("Generated on 2025-03-14"));
        assert!(md.contains(&format!("**{}** is the best option", results.winner.label())));
        for heading in ["## Scenario Summary", "## Where the Money Went", "## Yearly Detail", "## Parameters"] {
            assert!(md.contains(heading), "missing {}", heading);
        }
        for strategy in Strategy::ALL {
            assert!(md.contains(&format!("### {}", strategy.label())));
        }
        assert!(md.contains("SAO_PAULO |"));
    }

    #[test]
    fn test_real_yearly_rows_deflate_with_zero_wealth() {
        let mut snap = MonthlySnapshot::new(12, crate::projection::Phase::Renting);
        snap.rent_paid = 10_000.0;
        let scenario = ScenarioResult::from_snapshots(Strategy::Rent, vec![snap], 0.0, 0.0, 0, 0.0);

        let nominal = yearly_table(&scenario, None);
        assert!(nominal.contains("10.0k"));

        let deflator = Deflator::new(0.045);
        let real = yearly_table(&scenario, Some(&deflator));
        assert!(real.contains("9.6k"), "{}", real);
        assert!(!real.contains("10.0k"));
    }

    #[test]
    fn test_markdown_table_alignment() {
        let table = markdown_table(&["A", "Long"], &[vec!["123".to_string(), "x".to_string()]]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "|   A | Long |");
        assert_eq!(lines[1], "| --- | ---- |");
        assert_eq!(lines[2], "| 123 |    x |");
    }
}
