//! CPF Projection CLI
//!
//! Projects account balances year by year and prints a summary table

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use cpf_projection::{
    AccountBalances, AgeSource, CashFlowEvent, Horizon, ProjectionConfig, ProjectionEngine, ProjectionInputs,
    RateTables, YearMonth,
};

#[derive(Parser, Debug)]
#[command(name = "cpf_projection", about = "Project CPF account balances year by year")]
struct Cli {
    /// Annual salary in the first year
    #[arg(long)]
    salary: f64,

    /// Annual bonus in the first year
    #[arg(long, default_value_t = 0.0)]
    bonus: f64,

    /// Month the bonus is paid (1-12)
    #[arg(long, default_value_t = 12)]
    bonus_month: u32,

    /// Year-over-year salary increase, e.g. 0.03
    #[arg(long, default_value_t = 0.0)]
    salary_growth: f64,

    /// Year-over-year bonus increase, defaults to the salary increase
    #[arg(long)]
    bonus_growth: Option<f64>,

    /// Date of birth as YYYYMM
    #[arg(long, conflicts_with = "age")]
    dob: Option<String>,

    /// Age in the first year, if no date of birth is given
    #[arg(long)]
    age: Option<u32>,

    #[arg(long, default_value_t = 0.0)]
    oa: f64,

    #[arg(long, default_value_t = 0.0)]
    sa: f64,

    #[arg(long, default_value_t = 0.0)]
    ma: f64,

    /// Number of years to project, counting the start year
    #[arg(long, conflicts_with = "target_year")]
    years: Option<u32>,

    /// Last year to project
    #[arg(long)]
    target_year: Option<i32>,

    /// First projected month as YYYYMM, defaults to the current month
    #[arg(long)]
    start: Option<String>,

    /// JSON file with a list of top-ups and withdrawals
    #[arg(long)]
    cash_flows: Option<PathBuf>,

    /// Directory with contribution_rates.csv and allocation_rates.csv
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Write the yearly results to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let rates = match &cli.rates {
        Some(dir) => RateTables::from_csv_path(dir)
            .with_context(|| format!("loading rate tables from {}", dir.display()))?,
        None => RateTables::statutory(),
    };

    let start = match &cli.start {
        Some(s) => YearMonth::parse_yyyymm(s)?,
        None => YearMonth::current(),
    };

    let horizon = match (cli.years, cli.target_year) {
        (Some(n), _) => Horizon::Years(n),
        (None, Some(year)) => Horizon::TargetYear(year),
        (None, None) => bail!("one of --years or --target-year is required"),
    };

    let age = match (&cli.dob, cli.age) {
        (Some(dob), _) => AgeSource::DateOfBirth(YearMonth::parse_yyyymm(dob)?),
        (None, Some(age)) => AgeSource::Fixed(age),
        (None, None) => bail!("one of --dob or --age is required"),
    };

    if !(1..=12).contains(&cli.bonus_month) {
        bail!("--bonus-month must be between 1 and 12");
    }

    let cash_flows: Vec<CashFlowEvent> = match &cli.cash_flows {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => Vec::new(),
    };

    let config = ProjectionConfig {
        start,
        horizon,
        salary_growth: cli.salary_growth,
        bonus_growth: cli.bonus_growth,
        bonus_month: cli.bonus_month,
    };

    let inputs = ProjectionInputs {
        monthly_salary: cli.salary / 12.0,
        bonus: cli.bonus,
        age,
        opening: AccountBalances::new(cli.oa, cli.sa, cli.ma),
        cash_flows,
    };

    let engine = ProjectionEngine::new(&rates, config);
    let result = engine.project(&inputs);

    println!("CPF Projection v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");
    println!("Start: {}  Years: {}  Cash flows: {}", start, engine.n_years(), inputs.cash_flows.len());
    println!();

    println!(
        "{:>4} {:>6} {:>3} {:>12} {:>12} {:>12} {:>10} {:>10} {:>10}",
        "Year", "Cal", "Age", "OA", "SA", "MA", "OA Int", "SA Int", "MA Int"
    );
    println!("{}", "-".repeat(88));

    for (i, year) in result.iter().enumerate() {
        println!(
            "{:>4} {:>6} {:>3} {:>12.2} {:>12.2} {:>12.2} {:>10.2} {:>10.2} {:>10.2}",
            i + 1,
            year.year,
            year.age,
            year.closing.oa,
            year.closing.sa,
            year.closing.ma,
            year.interest.oa,
            year.interest.sa,
            year.interest.ma,
        );
    }

    if let Some(last) = result.final_year() {
        let interest = result.total_interest();
        println!("\nSummary:");
        println!("  Final balance: ${:.2}", last.closing.total());
        println!("  Total interest: ${:.2}", interest.oa + interest.sa + interest.ma);
    }

    if let Some(path) = &cli.output {
        let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
        writer.write_record(["year", "calendar_year", "age", "oa", "sa", "ma", "oa_interest", "sa_interest", "ma_interest"])?;
        for (i, year) in result.iter().enumerate() {
            writer.write_record([
                (i + 1).to_string(),
                year.year.to_string(),
                year.age.to_string(),
                format!("{:.2}", year.closing.oa),
                format!("{:.2}", year.closing.sa),
                format!("{:.2}", year.closing.ma),
                format!("{:.2}", year.interest.oa),
                format!("{:.2}", year.interest.sa),
                format!("{:.2}", year.interest.ma),
            ])?;
        }
        writer.flush()?;
        println!("\nFull results written to: {}", path.display());
    }

    Ok(())
}
