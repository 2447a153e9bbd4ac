//! Covid Dashboard CLI
//!
//! Fetches the dashboard data once and prints it:
//! - Full dashboard summary
//! - State table
//! - District table
//! - Chart series
//! - Default config file

use clap::{Parser, Subcommand};
use covid_dashboard::config::{generate_default_config, Config};
use covid_dashboard::dashboard::{DashboardController, DashboardView, DistrictRow, FetchOutcome};
use covid_dashboard::logging::init_cli_tracing;
use covid_dashboard::source::{CaseRecord, Covid19Client};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "covid-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "COVID-19 India dashboard in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations, then environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data API base URL, overrides the config file
    #[arg(long, global = true)]
    pub source_url: Option<String>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch everything and print a summary
    Show,

    /// Print the state table (Total first)
    States,

    /// Print the district table
    Districts {
        /// Only districts of this state
        #[arg(short, long)]
        state: Option<String>,
    },

    /// Print the chart series
    Chart,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let config = generate_default_config();
        match output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &config)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", config),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.source_url {
        config.source.base_url = url.clone();
    }
    // stdout carries the command output
    init_cli_tracing(&config.logging);

    let client = Arc::new(Covid19Client::new(config.source.clone())?);
    let controller = DashboardController::new(client, config.dashboard.clone());
    let report = controller.load().await;

    if report.cases == FetchOutcome::Failed && report.districts == FetchOutcome::Failed {
        eprintln!("Cannot reach the data API at {}", config.source.base_url);
        std::process::exit(1);
    }

    let view = controller.current();

    match &cli.command {
        Commands::Show => print_summary(&view),
        Commands::States => {
            let rows = view.table_rows();
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
                "csv" => write_states_csv(&rows)?,
                _ => print_states_table(&rows),
            }
        }
        Commands::Districts { state } => {
            let rows: Vec<&DistrictRow> = match (state, &view.districts) {
                (Some(name), Some(panel)) => panel.for_state(name),
                _ => view.district_rows().iter().collect(),
            };
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
                "csv" => write_districts_csv(&rows)?,
                _ => print_districts_table(&rows),
            }
        }
        Commands::Chart => match cli.format.as_str() {
            "json" => println!("{}", serde_json::to_string_pretty(&view.chart())?),
            _ => print_chart(&view),
        },
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn print_summary(view: &DashboardView) {
    println!("Covid Dashboard v{}", env!("CARGO_PKG_VERSION"));
    println!();

    match &view.cases {
        Some(cases) => {
            if let Some(updated) = &cases.last_updated {
                println!("Last updated: {}", updated);
            }
            if let Some(total) = &cases.total {
                println!(
                    "Confirmed: {}  Active: {}  Recovered: {}  Deceased: {}",
                    total.confirmed, total.active, total.recovered, total.deaths
                );
            }
            println!();
            print_states_table(&view.table_rows());
            println!();
            print_chart(view);
        }
        None => println!("Nationwide data unavailable"),
    }

    println!();
    match &view.districts {
        Some(districts) => println!("Districts reported: {}", districts.rows.len()),
        None => println!("District data unavailable"),
    }
}

fn print_states_table(rows: &[&CaseRecord]) {
    if rows.is_empty() {
        println!("No state data");
        return;
    }

    println!(
        "{:<30} {:>10} {:>10} {:>10} {:>10}",
        "State", "Confirmed", "Active", "Recovered", "Deceased"
    );
    println!("{}", "-".repeat(74));

    for row in rows {
        println!(
            "{:<30} {:>10} {:>10} {:>10} {:>10}",
            row.state, row.confirmed, row.active, row.recovered, row.deaths
        );
    }
}

fn print_districts_table(rows: &[&DistrictRow]) {
    if rows.is_empty() {
        println!("No district data");
        return;
    }

    println!("{:<30} {:<30} {:>10}", "State", "District", "Confirmed");
    println!("{}", "-".repeat(72));

    for row in rows {
        println!("{:<30} {:<30} {:>10}", row.state, row.district, row.confirmed);
    }
}

fn print_chart(view: &DashboardView) {
    let series = match &view.cases {
        Some(cases) if !cases.series.is_empty() => &cases.series,
        _ => {
            println!("No chart data");
            return;
        }
    };

    let peak = series.values.iter().flatten().copied().max().unwrap_or(0);

    println!("CUMULATIVE CONFIRMED CASES");
    for (label, value) in series.labels.iter().zip(&series.values) {
        match value {
            Some(v) => {
                let bar = "#".repeat(bar_width(*v, peak, CHART_WIDTH));
                println!("{:<14} {:>9} {}", label, v, bar);
            }
            None => println!("{:<14} {:>9}", label, "-"),
        }
    }
}

const CHART_WIDTH: usize = 40;

/// Bar length for `value` scaled so that `peak` fills `width`
fn bar_width(value: u64, peak: u64, width: usize) -> usize {
    if peak == 0 {
        return 0;
    }
    let scaled = u128::from(value.min(peak)) * width as u128 / u128::from(peak);
    scaled as usize
}

fn write_states_csv(rows: &[&CaseRecord]) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(["state", "confirmed", "active", "recovered", "deceased"])?;
    for row in rows {
        writer.write_record([
            &row.state,
            &row.confirmed,
            &row.active,
            &row.recovered,
            &row.deaths,
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_districts_csv(rows: &[&DistrictRow]) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
