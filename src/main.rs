//! Rent or Buy CLI
//!
//! Runs one simulation and prints a per-strategy summary. Optional outputs:
//! monthly CSV, markdown report, or the full results as JSON on stdout.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use rent_or_buy::assumptions::RatePolicy;
use rent_or_buy::inputs::{apply_city_defaults, load_inputs};
use rent_or_buy::rate_estimator::{estimate_financing_rate, BuyerProfile};
use rent_or_buy::report::{format_money, to_markdown, write_snapshots_csv};
use rent_or_buy::scenario::{FirstMonthCostCeiling, RentPlusSavings};
use rent_or_buy::{ChartBaseline, CityTable, SimulationInputs, SimulationResults, Simulator, SimulatorError};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BudgetPolicyArg {
    FirstMonthCost,
    RentPlusSavings,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ChartBaselineArg {
    StartingCapital,
    AcquisitionCost,
}

#[derive(Parser, Debug)]
#[command(
    name = "rent_or_buy",
    about = "Compare renting, buying outright and financing a home over a horizon"
)]
struct Cli {
    #[arg(long, help = "JSON file with simulation inputs; missing fields take defaults")]
    inputs: Option<PathBuf>,
    #[arg(long, help = "City key used to pre-fill location fields, e.g. SAO_PAULO")]
    city: Option<String>,
    #[arg(long, help = "CSV file replacing the built-in city table")]
    city_table: Option<PathBuf>,
    #[arg(long, help = "Print the available city keys and exit")]
    list_cities: bool,
    #[arg(long, help = "Replace the financing rate with one estimated from the buyer profile")]
    estimate_rate: bool,
    #[arg(long, help = "Rank and chart on inflation-deflated values")]
    real: bool,
    #[arg(long, value_enum, default_value_t = BudgetPolicyArg::FirstMonthCost)]
    budget_policy: BudgetPolicyArg,
    #[arg(long, value_enum, default_value_t = ChartBaselineArg::StartingCapital)]
    chart_baseline: ChartBaselineArg,
    #[arg(long, help = "Write every month of every strategy to this CSV file")]
    csv: Option<PathBuf>,
    #[arg(long, help = "Write a markdown report to this file")]
    markdown: Option<PathBuf>,
    #[arg(long, help = "Print the full results as JSON instead of the summary")]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let cities = match &cli.city_table {
        Some(path) => CityTable::from_csv_path(path)
            .with_context(|| format!("loading city table {}", path.display()))?,
        None => CityTable::builtin(),
    };

    if cli.list_cities {
        for (key, label) in cities.options() {
            println!("{:<16} {}", key, label);
        }
        return Ok(());
    }

    let mut inputs = match &cli.inputs {
        Some(path) => load_inputs(path).with_context(|| format!("loading inputs {}", path.display()))?,
        None => SimulationInputs::default(),
    };
    if cli.city.is_some() {
        inputs.city = cli.city.clone();
    }
    if cli.real {
        inputs.show_real_values = true;
    }

    inputs = match apply_city_defaults(&inputs, &cities) {
        Ok(resolved) => resolved,
        Err(SimulatorError::UnknownCity(key)) => {
            warn!("City {} not in table, keeping inputs as given", key);
            inputs
        }
        Err(e) => return Err(e.into()),
    };

    if cli.estimate_rate {
        let estimate = estimate_financing_rate(&BuyerProfile::from_inputs(&inputs), &RatePolicy::default());
        info!("Estimated financing rate {:.4} ({})", estimate.rate, estimate.description);
        inputs.financing_rate = estimate.rate;
    }

    let simulator = Simulator::new().with_chart_baseline(match cli.chart_baseline {
        ChartBaselineArg::StartingCapital => ChartBaseline::StartingCapital,
        ChartBaselineArg::AcquisitionCost => ChartBaseline::AcquisitionCost,
    });
    let simulator = match cli.budget_policy {
        BudgetPolicyArg::FirstMonthCost => simulator.with_budget_policy(FirstMonthCostCeiling),
        BudgetPolicyArg::RentPlusSavings => simulator.with_budget_policy(RentPlusSavings),
    };

    let results = simulator.run(&inputs).context("running simulation")?;

    if let Some(path) = &cli.csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write_snapshots_csv(BufWriter::new(file), &results)?;
        info!("Monthly results written to {}", path.display());
    }

    if let Some(path) = &cli.markdown {
        let today = chrono::Local::now().date_naive();
        std::fs::write(path, to_markdown(&inputs, &results, today))
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Markdown report written to {}", path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_summary(&inputs, &results);
    }

    Ok(())
}

fn print_summary(inputs: &SimulationInputs, results: &SimulationResults) {
    let real = results.real_values;

    println!("Rent or Buy v0.1.0");
    println!("==================\n");
    println!("Property: {}  Horizon: {} years  ({})",
        format_money(inputs.property_value),
        inputs.horizon_years,
        if real { "real values" } else { "nominal values" },
    );
    println!("Monthly budget: {}\n", format_money(results.monthly_budget));

    println!("{:<14} {:>16} {:>16} {:>14} {:>14} {:>14} {:>8}",
        "Strategy", "Final Wealth", "Total Spent", "Avg/Month", "Interest", "Upfront", "Saving");
    println!("{}", "-".repeat(102));

    for scenario in results.scenarios() {
        let spent = if real { scenario.total_spent_real } else { scenario.total_spent };
        let average = if real { scenario.average_monthly_cost_real } else { scenario.average_monthly_cost };
        println!("{:<14} {:>16} {:>16} {:>14} {:>14} {:>14} {:>7}m",
            scenario.label(),
            format_money(scenario.wealth_metric(real)),
            format_money(spent),
            format_money(average),
            format_money(scenario.total_interest_paid),
            format_money(scenario.upfront_cost),
            scenario.savings_phase_months,
        );
    }

    println!("\nWinner: {} by {} ({:.1}%)",
        results.winner.label(),
        format_money(results.advantage),
        results.advantage_percent,
    );

    println!("\nSummary:");
    for scenario in results.scenarios() {
        let summary = scenario.summary();
        println!("  {:<14} Property={:>16} Investments={:>16} Net Invested={:>16} Disinvesting={}/{}m",
            scenario.label(),
            format_money(summary.final_property_value),
            format_money(summary.final_investment_balance),
            format_money(summary.total_contributed),
            summary.months_disinvesting,
            summary.total_months,
        );
    }

    println!("\nWealth by year:");
    for point in &results.chart {
        println!("  Year {:>2}: rent={:>16} buy={:>16} finance={:>16}",
            point.year,
            format_money(point.rent),
            format_money(point.buy_cash),
            format_money(point.finance),
        );
    }
}
