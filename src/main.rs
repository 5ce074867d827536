//! Coverage Planner CLI
//!
//! Command-line interface for household projections, scenario comparison
//! and insurance recommendations

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use coverage_planner::assumptions::loader::DEFAULT_ASSUMPTIONS_PATH;
use coverage_planner::projection::YearlyProjection;
use coverage_planner::scenario::DEFAULT_CATALOG_PATH;
use coverage_planner::{
    load_profile, FinancialPlanner, FinancialProfile, GrowthAssumptions, LifeEvent,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "coverage-planner")]
#[command(about = "Household financial projections and life-insurance planning")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

/// Where the reference data is read from
#[derive(ClapArgs, Debug)]
struct DataDirs {
    /// Directory holding growth_rates.csv
    #[arg(long, default_value = DEFAULT_ASSUMPTIONS_PATH)]
    assumptions: PathBuf,

    /// Directory holding scenarios.csv and insurance_products.csv
    #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project one profile year by year
    Project {
        /// Profile JSON file
        #[arg(short, long)]
        profile: PathBuf,

        /// Years to project (default: to life expectancy, 50 to 60 years)
        #[arg(short, long)]
        years: Option<u32>,

        #[arg(long)]
        marriage_age: Option<u32>,

        #[arg(long)]
        child_birth_age: Option<u32>,

        /// Write the full series to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        #[command(flatten)]
        data: DataDirs,
    },

    /// Compare the scenario catalog against the baseline
    Scenarios {
        #[arg(short, long)]
        profile: PathBuf,

        #[arg(short, long)]
        years: Option<u32>,

        #[command(flatten)]
        data: DataDirs,
    },

    /// Coverage need and ranked insurance products
    Insurance {
        #[arg(short, long)]
        profile: PathBuf,

        /// Scenario id adding a coverage buffer (job_loss, medical, new_dependent, recession)
        #[arg(short, long)]
        scenario: Option<String>,

        /// Years of income to replace
        #[arg(short, long)]
        years: Option<u32>,

        /// Print the recommendation as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        data: DataDirs,
    },
}

/// Flat CSV record for one projected year
#[derive(Debug, Serialize)]
struct CsvRecord {
    year: u32,
    age: u32,
    is_alive: bool,
    is_working: bool,
    annual_active_income: f64,
    annual_passive_income: f64,
    base_annual_expense: f64,
    life_event_bump: f64,
    annual_expense: f64,
    net_cashflow: f64,
    opening_bank_balance: f64,
    savings_withdrawn: f64,
    bank_balance: f64,
    is_shortfall: bool,
    retirement_balance: f64,
    investment_balance: f64,
    net_worth: f64,
    covered_by_active: f64,
    covered_by_passive: f64,
    covered_by_savings: f64,
    uncovered: f64,
}

impl From<&YearlyProjection> for CsvRecord {
    fn from(row: &YearlyProjection) -> Self {
        Self {
            year: row.year,
            age: row.age,
            is_alive: row.is_alive,
            is_working: row.is_working,
            annual_active_income: row.annual_active_income,
            annual_passive_income: row.annual_passive_income,
            base_annual_expense: row.base_annual_expense,
            life_event_bump: row.life_event_bump,
            annual_expense: row.annual_expense,
            net_cashflow: row.net_cashflow,
            opening_bank_balance: row.opening_bank_balance,
            savings_withdrawn: row.savings_withdrawn,
            bank_balance: row.bank_balance,
            is_shortfall: row.is_shortfall,
            retirement_balance: row.retirement_balance,
            investment_balance: row.investment_balance,
            net_worth: row.net_worth,
            covered_by_active: row.expense_coverage.active_income,
            covered_by_passive: row.expense_coverage.passive_income,
            covered_by_savings: row.expense_coverage.savings_used,
            uncovered: row.expense_coverage.uncovered,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    match args.command {
        Command::Project { profile, years, marriage_age, child_birth_age, csv, data } => {
            let profile = read_profile(&profile)?;
            let mut events = Vec::new();
            if let Some(age) = marriage_age {
                events.push(LifeEvent::marriage(age));
            }
            if let Some(age) = child_birth_age {
                events.push(LifeEvent::child_birth(age));
            }
            // Projection needs the growth rates only
            let planner = FinancialPlanner::with_assumptions(load_assumptions(&data)?);
            run_project(&planner, &profile, &events, years, csv.as_deref())
        }
        Command::Scenarios { profile, years, data } => {
            let profile = read_profile(&profile)?;
            run_scenarios(&load_planner(&data)?, &profile, years)
        }
        Command::Insurance { profile, scenario, years, json, data } => {
            let profile = read_profile(&profile)?;
            let planner = load_planner(&data)?;
            run_insurance(&planner, &profile, scenario.as_deref(), years, json)
        }
    }
}

fn read_profile(path: &Path) -> Result<FinancialProfile> {
    load_profile(path).with_context(|| format!("loading profile {}", path.display()))
}

fn load_assumptions(data: &DataDirs) -> Result<GrowthAssumptions> {
    GrowthAssumptions::from_csv_path(&data.assumptions)
        .with_context(|| format!("loading growth rates from {}", data.assumptions.display()))
}

fn load_planner(data: &DataDirs) -> Result<FinancialPlanner> {
    FinancialPlanner::from_csv_path(&data.assumptions, &data.catalog).with_context(|| {
        format!(
            "loading planner data from {} and {}",
            data.assumptions.display(),
            data.catalog.display()
        )
    })
}

fn run_project(
    planner: &FinancialPlanner,
    profile: &FinancialProfile,
    events: &[LifeEvent],
    years: Option<u32>,
    csv_out: Option<&Path>,
) -> Result<()> {
    let result = planner.project(Some(profile), events, years)?;

    println!("Coverage Planner v{}", env!("CARGO_PKG_VERSION"));
    println!("========================\n");
    println!("Profile:");
    println!("  Age: {} (retire at {})", profile.current_age, profile.retirement_age);
    println!("  Active Income: ${:.2}/month", profile.monthly_active_income);
    println!("  Passive Income: ${:.2}/month", profile.monthly_passive_income);
    println!("  Expense: ${:.2}/month", profile.monthly_expense);
    println!("  Bank Balance: ${:.2}", profile.initial_bank_balance);
    println!("  Risk Tolerance: {}", profile.risk_tolerance.as_str());
    println!();

    println!("Projection Results ({} years):", result.years.len());
    println!(
        "{:>4} {:>4} {:>12} {:>12} {:>12} {:>14} {:>14} {:>9}",
        "Year", "Age", "Income", "Expense", "NetCF", "Bank", "NetWorth", "Shortfall"
    );
    println!("{}", "-".repeat(90));

    for row in result.years.iter().take(20) {
        println!(
            "{:>4} {:>4} {:>12.2} {:>12.2} {:>12.2} {:>14.2} {:>14.2} {:>9}",
            row.year,
            row.age,
            row.total_income(),
            row.annual_expense,
            row.net_cashflow,
            row.bank_balance,
            row.net_worth,
            if row.is_shortfall { "yes" } else { "" },
        );
    }

    if result.years.len() > 20 {
        println!("... ({} more years)", result.years.len() - 20);
    }

    if let Some(path) = csv_out {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        for row in &result.years {
            writer.serialize(CsvRecord::from(row))?;
        }
        writer.flush()?;
        println!("\nFull results written to: {}", path.display());
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Total Years: {}", summary.total_years);
    println!("  Shortfall Years: {}", summary.shortfall_years);
    println!("  First Shortfall Age: {}", year_or_none(summary.first_shortfall_age));
    println!("  Final Bank Balance: ${:.2}", summary.final_bank_balance);
    println!("  Final Net Worth: ${:.2}", summary.final_net_worth);
    println!("  First Million Year: {}", year_or_none(summary.first_million_year));
    println!("  Retirement Ready Year: {}", year_or_none(summary.retirement_ready_year));

    let targets = &summary.targets;
    println!("\nTargets:");
    println!("  Emergency Fund: ${:.0}", targets.emergency_fund);
    println!("  Retirement Target: ${:.0}", targets.retirement_target);
    println!("  Life Cover: ${:.0}", targets.life_cover);
    println!("  Savings Rate: {:.0}%", targets.savings_rate_pct);

    Ok(())
}

fn year_or_none(value: Option<u32>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.to_string())
}

fn run_scenarios(
    planner: &FinancialPlanner,
    profile: &FinancialProfile,
    years: Option<u32>,
) -> Result<()> {
    let comparison = planner.compare_scenarios(Some(profile), &[], years)?;

    println!(
        "Scenario Comparison ({} scenarios, {} years):",
        comparison.scenarios.len(),
        comparison.baseline.len()
    );
    println!(
        "{:<20} {:<9} {:>14} {:>14} {:>14} {:>9} {:>8}",
        "Scenario", "Tone", "Impact 10y", "Impact 20y", "Impact 50y", "Shortfall", "1M Year"
    );
    println!("{}", "-".repeat(94));

    for scenario in &comparison.scenarios {
        println!(
            "{:<20} {:<9} {:>14.0} {:>14.0} {:>14.0} {:>9} {:>8}",
            scenario.name,
            scenario.tone.as_str(),
            scenario.impact_10yr,
            scenario.impact_20yr,
            scenario.impact_50yr,
            scenario.summary.shortfall_years,
            year_or_none(scenario.summary.first_million_year),
        );
    }

    Ok(())
}

fn run_insurance(
    planner: &FinancialPlanner,
    profile: &FinancialProfile,
    scenario: Option<&str>,
    years: Option<u32>,
    json: bool,
) -> Result<()> {
    let recommendation = planner.recommend_insurance(Some(profile), scenario, years)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
        return Ok(());
    }

    let need = &recommendation.coverage;
    println!("Coverage Need ({}, {} years):", need.scenario.id(), need.years);
    println!("  Income Replacement:   ${:>14.2}", need.income_replacement);
    println!("  Education Fund:       ${:>14.2}", need.education_fund);
    println!("  Outstanding Mortgage: ${:>14.2}", need.outstanding_mortgage);
    println!("  Emergency Buffer:     ${:>14.2}", need.emergency_buffer);
    println!("  Scenario Buffer:      ${:>14.2}", need.scenario_buffer);
    println!("  Less Current Savings: ${:>14.2}", need.current_savings);
    println!("  Recommended Coverage: ${:>14.2}", need.total_coverage);
    println!();

    if recommendation.products.is_empty() {
        println!(
            "No products accept age {} and coverage ${:.0}",
            profile.current_age, need.total_coverage
        );
        return Ok(());
    }

    println!(
        "{:<22} {:<12} {:>10} {:>12} {:>10} {:>12}",
        "Product", "Provider", "Monthly", "Annual", "Per 100k", "Value"
    );
    println!("{}", "-".repeat(82));
    for ranked in &recommendation.products {
        println!(
            "{:<22} {:<12} {:>10.0} {:>12.0} {:>10.0} {:>12.0}",
            ranked.product.name,
            ranked.product.provider,
            ranked.monthly_premium,
            ranked.annual_premium,
            ranked.cost_per_100k,
            ranked.value_score,
        );
    }

    Ok(())
}
